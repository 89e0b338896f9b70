use crate::bst::tree::Tree;
use crate::entry::Entry;

/// A struct representing an internal node of a binary search tree.
///
/// The `metadata` field holds whatever per-node bookkeeping the active balance
/// policy needs: a subtree height for the height-balanced policy, a random
/// priority for the treap policy. It is written only by the policy and is not
/// reachable through the map or set surface.
pub struct Node<T, U, M> {
    pub(crate) entry: Entry<T, U>,
    pub(crate) metadata: M,
    pub(crate) left: Tree<T, U, M>,
    pub(crate) right: Tree<T, U, M>,
}

impl<T, U, M> Node<T, U, M> {
    pub(crate) fn new(key: T, value: U, metadata: M) -> Self {
        Node {
            entry: Entry { key, value },
            metadata,
            left: None,
            right: None,
        }
    }
}
