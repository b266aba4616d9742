use crate::SeqRes;
use crate::err::SeqErr;
use crate::group::GroupMap;
use crate::seq::Seq;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::iter::Sum;

/* ********************************************** 终端操作 ********************************************** */

impl<T: 'static> Seq<T> {
    /// 统计元素数量。
    pub fn count(&mut self) -> SeqRes<usize> {
        let mut count = 0;
        for item in self.take_iter()? {
            item?;
            count += 1;
        }
        Ok(count)
    }

    /// 收集为保持最终顺序的列表。
    pub fn to_list(&mut self) -> SeqRes<Vec<T>> {
        self.take_iter()?.collect()
    }

    /// 按键值投影收集为映射，键冲突时返回[`SeqErr::DuplicateKey`]。
    /// 需要覆盖或合并语义时使用[`Seq::to_map_with`]显式指定合并策略。
    pub fn to_map<K, V>(
        &mut self, mut key_fn: impl FnMut(&T) -> K, mut value_fn: impl FnMut(T) -> V,
    ) -> SeqRes<FxHashMap<K, V>>
    where
        K: Eq + Hash + Debug,
    {
        let mut map = FxHashMap::default();
        for item in self.take_iter()? {
            let value = item?;
            match map.entry(key_fn(&value)) {
                Entry::Occupied(entry) => return Err(SeqErr::DuplicateKey { key: format!("{:?}", entry.key()) }),
                Entry::Vacant(entry) => {
                    entry.insert(value_fn(value));
                }
            }
        }
        Ok(map)
    }

    /// 按键值投影收集为映射，键冲突时以`merge(旧值, 新值)`合并。
    pub fn to_map_with<K, V>(
        &mut self, mut key_fn: impl FnMut(&T) -> K, mut value_fn: impl FnMut(T) -> V,
        mut merge: impl FnMut(V, V) -> V,
    ) -> SeqRes<FxHashMap<K, V>>
    where
        K: Eq + Hash,
    {
        let mut map = FxHashMap::default();
        for item in self.take_iter()? {
            let value = item?;
            match map.entry(key_fn(&value)) {
                Entry::Occupied(entry) => {
                    let (key, old) = entry.remove_entry();
                    let new = value_fn(value);
                    map.insert(key, merge(old, new));
                }
                Entry::Vacant(entry) => {
                    entry.insert(value_fn(value));
                }
            }
        }
        Ok(map)
    }

    /// 以分隔符连接各元素的显示形式。
    pub fn joining(&mut self, sep: &str) -> SeqRes<String>
    where
        T: Display,
    {
        Ok(self.to_list()?.iter().join(sep))
    }

    /// 带前后缀的连接，空序列只产出前后缀。
    pub fn joining_with(&mut self, sep: &str, prefix: &str, postfix: &str) -> SeqRes<String>
    where
        T: Display,
    {
        Ok(format!("{}{}{}", prefix, self.joining(sep)?, postfix))
    }

    /// 按派生键分组，组按键首次出现顺序排列，组内元素保持相遇顺序。
    pub fn grouping_by<K>(&mut self, mut key_fn: impl FnMut(&T) -> K) -> SeqRes<GroupMap<K, T>>
    where
        K: Eq + Hash + Clone,
    {
        let mut groups = GroupMap::new();
        for item in self.take_iter()? {
            let value = item?;
            groups.insert(key_fn(&value), value);
        }
        Ok(groups)
    }

    /// 从`identity`出发对元素做单遍左折叠。
    /// `combiner`用于合并并行求值的部分累积结果，单线程顺序求值下不会被调用。
    pub fn reduce<U>(
        &mut self, identity: U, mut accumulator: impl FnMut(U, T) -> U, combiner: impl FnMut(U, U) -> U,
    ) -> SeqRes<U> {
        let _ = combiner; // 顺序求值不产生部分累积
        let mut acc = identity;
        for item in self.take_iter()? {
            acc = accumulator(acc, item?);
        }
        Ok(acc)
    }

    /// 对每个元素执行消费动作，驱动整条流水线。
    pub fn for_each(&mut self, mut consumer: impl FnMut(T)) -> SeqRes<()> {
        for item in self.take_iter()? {
            consumer(item?);
        }
        Ok(())
    }
}

/* ********************************************** 数值终端操作 ********************************************** */

impl<T: 'static> Seq<T> {
    /// 数值累加，空序列的和为加法单位元。
    pub fn sum(&mut self) -> SeqRes<T>
    where
        T: Sum<T>,
    {
        self.take_iter()?.sum()
    }

    /// 最大值，空序列返回`None`；相等时与[`Iterator::max`]一致保留靠后的元素。
    pub fn max(&mut self) -> SeqRes<Option<T>>
    where
        T: Ord,
    {
        self.max_by(T::cmp)
    }

    /// 最小值，空序列返回`None`；相等时保留靠前的元素。
    pub fn min(&mut self) -> SeqRes<Option<T>>
    where
        T: Ord,
    {
        self.min_by(T::cmp)
    }

    /// 按比较器求最大值，供无法提供全序的元素类型使用。
    pub fn max_by(&mut self, mut cmp: impl FnMut(&T, &T) -> Ordering) -> SeqRes<Option<T>> {
        let mut max = None;
        for item in self.take_iter()? {
            let value = item?;
            max = Some(match max {
                Some(best) if cmp(&value, &best) == Ordering::Less => best,
                _ => value,
            });
        }
        Ok(max)
    }

    /// 按比较器求最小值。
    pub fn min_by(&mut self, mut cmp: impl FnMut(&T, &T) -> Ordering) -> SeqRes<Option<T>> {
        let mut min = None;
        for item in self.take_iter()? {
            let value = item?;
            min = Some(match min {
                Some(best) if cmp(&value, &best) == Ordering::Less => value,
                Some(best) => best,
                None => value,
            });
        }
        Ok(min)
    }
}
