use crate::SeqRes;
use crate::err::SeqErr;
use itertools::Either;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::hash::Hash;
use std::iter;
use std::vec;

/// 流水线内部迭代项：元素或在途错误。
pub(crate) type SeqIter<T> = Box<dyn Iterator<Item = SeqRes<T>>>;

/// 惰性序列流水线。
///
/// 中间操作消耗`self`并返回新流水线，组合期间不访问数据源；
/// 终端操作（见`collect`模块）取走内部迭代器并驱动单遍求值，
/// 此后任何终端操作都返回[`SeqErr::Consumed`]。
///
/// 数据源产生的在途错误按原位置穿过所有中间操作，由终端操作首先遇到时上报。
pub struct Seq<T> {
    pub(crate) iter: Option<SeqIter<T>>,
}

/* ********************************************** 中间操作 ********************************************** */

impl<T: 'static> Seq<T> {
    pub(crate) fn new(iter: impl Iterator<Item = SeqRes<T>> + 'static) -> Seq<T> {
        Seq { iter: Some(Box::new(iter)) }
    }

    /// 包装内部迭代器，已消费状态原样向下传递。
    fn wrap<U>(self, f: impl FnOnce(SeqIter<T>) -> SeqIter<U>) -> Seq<U> {
        Seq { iter: self.iter.map(f) }
    }

    /// 取走内部迭代器，供终端操作消费。
    pub(crate) fn take_iter(&mut self) -> SeqRes<SeqIter<T>> {
        self.iter.take().ok_or(SeqErr::Consumed)
    }

    /// 保留满足条件的元素，相对顺序不变。
    pub fn filter(self, mut predicate: impl FnMut(&T) -> bool + 'static) -> Seq<T> {
        self.wrap(|iter| {
            Box::new(iter.filter(move |item| match item {
                Ok(value) => predicate(value),
                Err(_) => true, // 在途错误不参与过滤
            }))
        })
    }

    /// 逐元素转换，数量与顺序不变。
    pub fn map<U: 'static>(self, mut f: impl FnMut(T) -> U + 'static) -> Seq<U> {
        self.wrap(|iter| Box::new(iter.map(move |item| item.map(&mut f))))
    }

    /// 将每个元素展开为一条子流水线，并按源顺序连接各子序列。
    pub fn flat_map<U: 'static>(self, mut f: impl FnMut(T) -> Seq<U> + 'static) -> Seq<U> {
        self.wrap(|iter| {
            Box::new(iter.flat_map(move |item| match item {
                Ok(value) => match f(value).iter {
                    Some(inner) => Either::Left(inner),
                    // 子流水线已被消费，作为用法错误向下游传递
                    None => Either::Right(iter::once(Err(SeqErr::Consumed))),
                },
                Err(err) => Either::Right(iter::once(Err(err))),
            }))
        })
    }

    /// 按值相等去重，保留首次出现的元素，相对顺序不变。
    pub fn distinct(self) -> Seq<T>
    where
        T: Clone + Eq + Hash,
    {
        let mut seen = FxHashSet::default();
        self.wrap(|iter| {
            Box::new(iter.filter(move |item| match item {
                Ok(value) => seen.insert(value.clone()), // 首次出现时插入成功，保留
                Err(_) => true,
            }))
        })
    }

    /// 按派生键去重，保留首次出现的元素。
    pub fn distinct_by_key<K>(self, mut key_fn: impl FnMut(&T) -> K + 'static) -> Seq<T>
    where
        K: Eq + Hash + 'static,
    {
        let mut seen = FxHashSet::default();
        self.wrap(|iter| {
            Box::new(iter.filter(move |item| match item {
                Ok(value) => seen.insert(key_fn(value)),
                Err(_) => true,
            }))
        })
    }

    /// 按自然顺序稳定排序，首次拉取时物化上游全部元素。
    pub fn sorted(self) -> Seq<T>
    where
        T: Ord,
    {
        self.sorted_by(T::cmp)
    }

    /// 按比较器稳定排序，复合排序可用[`Ordering::then_with`]表达次级键。
    pub fn sorted_by(self, mut cmp: impl FnMut(&T, &T) -> Ordering + 'static) -> Seq<T> {
        self.wrap(|iter| Box::new(Materialize::new(iter, move |values| values.sort_by(&mut cmp))))
    }

    /// 按派生键稳定排序。
    pub fn sorted_by_key<K>(self, mut key_fn: impl FnMut(&T) -> K + 'static) -> Seq<T>
    where
        K: Ord + 'static,
    {
        self.wrap(|iter| Box::new(Materialize::new(iter, move |values| values.sort_by_key(&mut key_fn))))
    }

    /// 截断保留至多`n`个元素，是无界数据源唯一的收敛手段。
    pub fn limit(self, n: usize) -> Seq<T> {
        self.wrap(|iter| Box::new(iter.take(n)))
    }

    /// 只读观察被拉取的每个元素而不改变序列，副作用仅在终端遍历期间发生。
    pub fn peek(self, mut side_effect: impl FnMut(&T) + 'static) -> Seq<T> {
        self.wrap(|iter| {
            Box::new(iter.inspect(move |item| {
                if let Ok(value) = item {
                    side_effect(value);
                }
            }))
        })
    }
}

/* ********************************************** 物化适配器 ********************************************** */

/// 首次拉取时排干上游并整体变换缓冲，此后逐个输出。
/// 上游出现在途错误时丢弃已缓冲元素，仅输出该错误。
struct Materialize<T> {
    source: Option<(SeqIter<T>, Box<dyn FnOnce(&mut Vec<T>)>)>,
    drained: vec::IntoIter<SeqRes<T>>,
}

impl<T> Materialize<T> {
    fn new(source: SeqIter<T>, transform: impl FnOnce(&mut Vec<T>) + 'static) -> Materialize<T> {
        Materialize { source: Some((source, Box::new(transform))), drained: Vec::new().into_iter() }
    }
}

impl<T> Iterator for Materialize<T> {
    type Item = SeqRes<T>;

    fn next(&mut self) -> Option<SeqRes<T>> {
        if let Some((source, transform)) = self.source.take() {
            let mut values = Vec::new();
            for item in source {
                match item {
                    Ok(value) => values.push(value),
                    Err(err) => {
                        self.drained = vec![Err(err)].into_iter();
                        return self.drained.next();
                    }
                }
            }
            transform(&mut values);
            self.drained = values.into_iter().map(Ok).collect::<Vec<_>>().into_iter();
        }
        self.drained.next()
    }
}

/* ********************************************** 迭代出口 ********************************************** */

/// `for`循环遍历流水线的出口，产生[`SeqRes`]项。
pub struct IntoIter<T> {
    iter: SeqIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = SeqRes<T>;

    fn next(&mut self) -> Option<SeqRes<T>> {
        self.iter.next()
    }
}

impl<T: 'static> IntoIterator for Seq<T> {
    type Item = SeqRes<T>;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        match self.iter {
            Some(iter) => IntoIter { iter },
            // 已消费的流水线只迭代出一个用法错误
            None => IntoIter { iter: Box::new(iter::once(Err(SeqErr::Consumed))) },
        }
    }
}
