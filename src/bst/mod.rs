//! Ordered map and set built on a binary search tree whose balancing
//! discipline is a pluggable policy. The shipped policies are height-balanced
//! (AVL) rebalancing, randomized treap priorities, and a non-balancing
//! baseline; all of them compose the same two rotation primitives.

mod map;
mod node;
mod policy;
mod set;
mod tree;

pub use self::map::{OrderedMap, OrderedMapIntoIter, OrderedMapIter, OrderedMapIterMut};
pub use self::node::Node;
pub use self::policy::{AvlPolicy, BalancePolicy, TreapPolicy, UnbalancedPolicy};
pub use self::set::{OrderedSet, OrderedSetIntoIter, OrderedSetIter};
pub use self::tree::Tree;

/// An ordered map with the height-balanced policy.
pub type AvlMap<T, U> = OrderedMap<T, U, AvlPolicy>;

/// An ordered set with the height-balanced policy.
pub type AvlSet<T> = OrderedSet<T, AvlPolicy>;

/// An ordered map with the randomized treap policy.
pub type TreapMap<T, U> = OrderedMap<T, U, TreapPolicy>;

/// An ordered set with the randomized treap policy.
pub type TreapSet<T> = OrderedSet<T, TreapPolicy>;
