use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::hash::Hash;

/// [`Seq::grouping_by`]的结果：键按首次出现顺序排列的多值映射，组内元素保持相遇顺序。
///
/// [`Seq::grouping_by`]: crate::Seq::grouping_by
#[derive(Debug)]
pub struct GroupMap<K, V> {
    index: FxHashMap<K, usize>,
    groups: Vec<(K, Vec<V>)>,
}

impl<K: Eq + Hash + Clone, V> GroupMap<K, V> {
    pub(crate) fn new() -> GroupMap<K, V> {
        GroupMap { index: FxHashMap::default(), groups: Vec::new() }
    }

    pub(crate) fn insert(&mut self, key: K, value: V) {
        match self.index.get(&key) {
            Some(&at) => self.groups[at].1.push(value),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![value]));
            }
        }
    }
}

impl<K, V> GroupMap<K, V> {
    /// 组数。
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 按键查找组，键的借用形式与[`std::collections::HashMap::get`]一致。
    pub fn get<Q>(&self, key: &Q) -> Option<&[V]>
    where
        K: Borrow<Q> + Eq + Hash,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&at| &self.groups[at].1[..])
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Eq + Hash,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// 全部键，按首次出现顺序。
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(key, _)| key)
    }

    /// `(键, 组)`对，按键首次出现顺序。
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.groups.iter().map(|(key, values)| (key, &values[..]))
    }
}

impl<K, V> IntoIterator for GroupMap<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = std::vec::IntoIter<(K, Vec<V>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}
