use crate::bst::node::Node;
use crate::bst::policy::{AvlPolicy, BalancePolicy};
use crate::bst::tree::{self, Tree};
use crate::entry::Entry;
use std::borrow::Borrow;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a binary search tree with a pluggable
/// balancing policy.
///
/// The default policy is [`AvlPolicy`], which maintains the invariant that the
/// heights of the two child subtrees of any node differ by at most one, so
/// search, insert, and remove are logarithmic in the worst case regardless of
/// insertion order.
///
/// # Examples
///
/// ```
/// use balanced_collections::bst::AvlMap;
///
/// let mut map = AvlMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some((&0, &1)));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct OrderedMap<T, U, P = AvlPolicy>
where
    P: BalancePolicy<T, U>,
{
    tree: Tree<T, U, P::Metadata>,
    len: usize,
    policy: P,
}

impl<T, U, P> OrderedMap<T, U, P>
where
    P: BalancePolicy<T, U>,
{
    /// Constructs a new, empty `OrderedMap<T, U, P>` with a default policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// ```
    pub fn new() -> Self
    where
        P: Default,
    {
        Self::with_policy(P::default())
    }

    /// Constructs a new, empty `OrderedMap<T, U, P>` with the given policy
    /// value. Useful for policies that carry state, such as a seeded random
    /// number generator.
    pub fn with_policy(policy: P) -> Self {
        OrderedMap {
            tree: None,
            len: 0,
            policy,
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in
    /// the map, it will return and replace the old key-value pair without
    /// restructuring the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)>
    where
        T: Ord,
    {
        let OrderedMap { tree, len, policy } = self;
        let new_node = Node::new(key, value, policy.leaf_metadata());
        *len += 1;
        tree::insert::<T, U, P>(tree, new_node).map(|entry| {
            let Entry { key, value } = entry;
            *len -= 1;
            (key, value)
        })
    }

    /// Removes a key-value pair from the map. If the key exists in the map,
    /// it will return the associated key-value pair. Otherwise it will return
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let OrderedMap { tree, len, .. } = self;
        tree::remove::<T, U, P, V>(tree, key).map(|entry| {
            let Entry { key, value } = entry;
            *len -= 1;
            (key, value)
        })
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a
    /// particular key. It will return `None` if the key does not exist in the
    /// map.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular
    /// key. Returns `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get_mut(&mut self.tree, key).map(|entry| &mut entry.value)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
        self.len = 0;
    }

    /// Returns the height of the tree in edges: -1 for an empty map, 0 for a
    /// single entry. Intended for diagnostics and invariant testing; computed
    /// by walking the tree rather than reading policy metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.height(), -1);
    ///
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.insert(3, 3);
    /// assert_eq!(map.height(), 1);
    /// ```
    pub fn height(&self) -> isize {
        tree::height(&self.tree)
    }

    /// Returns a key in the map that is less than or equal to a particular
    /// key. Returns `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::floor(&self.tree, key).map(|entry| &entry.key)
    }

    /// Returns a key in the map that is greater than or equal to a particular
    /// key. Returns `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::ceil(&self.tree, key).map(|entry| &entry.key)
    }

    /// Returns the entry with the smallest key strictly greater than a
    /// particular key. Returns `None` if the key is the maximum or larger.
    /// The key itself does not need to exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 10);
    /// map.insert(3, 30);
    /// assert_eq!(map.successor(&1), Some((&3, &30)));
    /// assert_eq!(map.successor(&2), Some((&3, &30)));
    /// assert_eq!(map.successor(&3), None);
    /// ```
    pub fn successor<V>(&self, key: &V) -> Option<(&T, &U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::successor(&self.tree, key).map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the entry with the largest key strictly less than a particular
    /// key. Returns `None` if the key is the minimum or smaller.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 10);
    /// map.insert(3, 30);
    /// assert_eq!(map.predecessor(&3), Some((&1, &10)));
    /// assert_eq!(map.predecessor(&1), None);
    /// ```
    pub fn predecessor<V>(&self, key: &V) -> Option<(&T, &U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::predecessor(&self.tree, key).map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the entry with the minimum key of the map. Returns `None` if
    /// the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 10);
    /// map.insert(3, 30);
    /// assert_eq!(map.min(), Some((&1, &10)));
    /// ```
    pub fn min(&self) -> Option<(&T, &U)> {
        tree::min(&self.tree).map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the entry with the maximum key of the map. Returns `None` if
    /// the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 10);
    /// map.insert(3, 30);
    /// assert_eq!(map.max(), Some((&3, &30)));
    /// ```
    pub fn max(&self) -> Option<(&T, &U)> {
        tree::max(&self.tree).map(|entry| (&entry.key, &entry.value))
    }

    /// Returns an iterator over the map. The iterator will yield key-value
    /// pairs using in-order traversal with an explicit stack, so its
    /// auxiliary space is proportional to the tree height.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> OrderedMapIter<'_, T, U, P::Metadata> {
        OrderedMapIter {
            current: &self.tree,
            stack: Vec::new(),
        }
    }

    /// Returns a mutable iterator over the map. The iterator will yield
    /// key-value pairs using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::bst::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// for (key, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&2, &mut 3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> OrderedMapIterMut<'_, T, U, P::Metadata> {
        OrderedMapIterMut {
            current: self.tree.as_mut().map(|node| &mut **node),
            stack: Vec::new(),
        }
    }
}

impl<T, U, P> IntoIterator for OrderedMap<T, U, P>
where
    P: BalancePolicy<T, U>,
{
    type IntoIter = OrderedMapIntoIter<T, U, P::Metadata>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U, P> IntoIterator for &'a OrderedMap<T, U, P>
where
    T: 'a,
    U: 'a,
    P: BalancePolicy<T, U>,
{
    type IntoIter = OrderedMapIter<'a, T, U, P::Metadata>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, U, P> IntoIterator for &'a mut OrderedMap<T, U, P>
where
    T: 'a,
    U: 'a,
    P: BalancePolicy<T, U>,
{
    type IntoIter = OrderedMapIterMut<'a, T, U, P::Metadata>;
    type Item = (&'a T, &'a mut U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `OrderedMap<T, U, P>`.
///
/// This iterator traverses the elements of the map in-order and yields owned
/// entries.
pub struct OrderedMapIntoIter<T, U, M> {
    current: Tree<T, U, M>,
    stack: Vec<Node<T, U, M>>,
}

impl<T, U, M> Iterator for OrderedMapIntoIter<T, U, M> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node {
                entry: Entry { key, value },
                right,
                ..
            } = node;
            self.current = right;
            (key, value)
        })
    }
}

/// An iterator for `OrderedMap<T, U, P>`.
///
/// This iterator traverses the elements of the map in-order and yields
/// immutable references.
pub struct OrderedMapIter<'a, T, U, M>
where
    T: 'a,
    U: 'a,
    M: 'a,
{
    current: &'a Tree<T, U, M>,
    stack: Vec<&'a Node<T, U, M>>,
}

impl<'a, T, U, M> Iterator for OrderedMapIter<'a, T, U, M>
where
    T: 'a,
    U: 'a,
    M: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = *self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let Node {
                entry: Entry { ref key, ref value },
                ref right,
                ..
            } = *node;
            self.current = right;
            (key, value)
        })
    }
}

type IterEntryMut<'a, T, U, M> = Option<(&'a mut Entry<T, U>, NodeRefMut<'a, T, U, M>)>;
type NodeRefMut<'a, T, U, M> = Option<&'a mut Node<T, U, M>>;

/// A mutable iterator for `OrderedMap<T, U, P>`.
///
/// This iterator traverses the elements of the map in-order and yields
/// mutable references to the values.
pub struct OrderedMapIterMut<'a, T, U, M>
where
    T: 'a,
    U: 'a,
    M: 'a,
{
    current: Option<&'a mut Node<T, U, M>>,
    stack: Vec<IterEntryMut<'a, T, U, M>>,
}

impl<'a, T, U, M> Iterator for OrderedMapIterMut<'a, T, U, M>
where
    T: 'a,
    U: 'a,
    M: 'a,
{
    type Item = (&'a T, &'a mut U);

    fn next(&mut self) -> Option<Self::Item> {
        let OrderedMapIterMut { current, stack } = self;
        while current.is_some() {
            stack.push(current.take().map(|node| {
                *current = node.left.as_mut().map(|node| &mut **node);
                (&mut node.entry, node.right.as_mut().map(|node| &mut **node))
            }));
        }
        stack.pop().and_then(|pair_opt| match pair_opt {
            Some(pair) => {
                let (entry, right) = pair;
                let Entry {
                    ref key,
                    ref mut value,
                } = *entry;
                *current = right;
                Some((key, value))
            },
            None => None,
        })
    }
}

impl<T, U, P> Default for OrderedMap<T, U, P>
where
    P: BalancePolicy<T, U> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, U, P, V> Index<&'a V> for OrderedMap<T, U, P>
where
    T: Borrow<V>,
    P: BalancePolicy<T, U>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, P, V> IndexMut<&'a V> for OrderedMap<T, U, P>
where
    T: Borrow<V>,
    P: BalancePolicy<T, U>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}
