use crate::bst::node::Node;
use crate::bst::tree::{self, Tree};
use rand::{Rng, XorShiftRng};
use std::cmp;

/// A balancing discipline for a binary search tree.
///
/// The node layout, rotation primitives, and engine operations are shared
/// across disciplines; a policy decides what per-node metadata to keep and
/// when to rotate. `rebalance` is invoked at every frame of the unwinding
/// descent after an insert or remove, and `fuse` rebuilds a subtree from the
/// two children of a removed root.
pub trait BalancePolicy<T, U> {
    type Metadata;

    /// Returns the metadata for a freshly created leaf.
    fn leaf_metadata(&mut self) -> Self::Metadata;

    /// Recomputes a node's metadata from its children. Called after every
    /// relinking, strictly bottom-up.
    fn update(node: &mut Node<T, U, Self::Metadata>);

    /// Restores the policy invariant at the root of a subtree after a
    /// structural change in one of its children.
    fn rebalance(tree: &mut Tree<T, U, Self::Metadata>);

    /// Fuses the former children of a detached root into a single subtree.
    /// All keys in `left` are less than all keys in `right`.
    fn fuse(
        left: Tree<T, U, Self::Metadata>,
        right: Tree<T, U, Self::Metadata>,
    ) -> Tree<T, U, Self::Metadata>;
}

/// The height-balanced (AVL) policy: the heights of the two child subtrees of
/// any node differ by at most one, bounding tree height to about
/// 1.44 * log2(n).
#[derive(Clone, Copy, Debug, Default)]
pub struct AvlPolicy;

fn avl_height<T, U>(tree: &Tree<T, U, usize>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.metadata,
    }
}

fn balance_factor<T, U>(node: &Node<T, U, usize>) -> i32 {
    (avl_height(&node.left) as i32) - (avl_height(&node.right) as i32)
}

impl<T, U> BalancePolicy<T, U> for AvlPolicy {
    type Metadata = usize;

    fn leaf_metadata(&mut self) -> usize {
        1
    }

    fn update(node: &mut Node<T, U, usize>) {
        node.metadata = cmp::max(avl_height(&node.left), avl_height(&node.right)) + 1;
    }

    fn rebalance(tree: &mut Tree<T, U, usize>) {
        let mut node = match tree.take() {
            Some(node) => node,
            None => return,
        };

        Self::update(&mut node);

        if balance_factor(&node) > 1 {
            // Left-heavy; a right-heavy left child is the zig-zag case and
            // takes a preliminary left rotation.
            if let Some(child) = node.left.take() {
                if balance_factor(&child) < 0 {
                    node.left = Some(tree::rotate_left::<T, U, Self>(child));
                } else {
                    node.left = Some(child);
                }
            }
            node = tree::rotate_right::<T, U, Self>(node);
        } else if balance_factor(&node) < -1 {
            if let Some(child) = node.right.take() {
                if balance_factor(&child) > 0 {
                    node.right = Some(tree::rotate_right::<T, U, Self>(child));
                } else {
                    node.right = Some(child);
                }
            }
            node = tree::rotate_left::<T, U, Self>(node);
        }

        *tree = Some(node);
    }

    fn fuse(left: Tree<T, U, usize>, mut right: Tree<T, U, usize>) -> Tree<T, U, usize> {
        match tree::detach_min::<T, U, Self>(&mut right) {
            Some(mut new_root) => {
                new_root.left = left;
                new_root.right = right;
                let mut fused = Some(new_root);
                Self::rebalance(&mut fused);
                fused
            },
            None => left,
        }
    }
}

/// The treap policy: each node carries a random priority and the tree also
/// satisfies the max-heap property on priorities, giving an expected height
/// proportional to log2(n).
pub struct TreapPolicy {
    rng: XorShiftRng,
}

impl Default for TreapPolicy {
    fn default() -> Self {
        TreapPolicy {
            rng: XorShiftRng::new_unseeded(),
        }
    }
}

impl<T, U> BalancePolicy<T, U> for TreapPolicy {
    type Metadata = u32;

    fn leaf_metadata(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn update(_node: &mut Node<T, U, u32>) {}

    fn rebalance(tree: &mut Tree<T, U, u32>) {
        let mut node = match tree.take() {
            Some(node) => node,
            None => return,
        };

        // At most one child can violate heap order here: the one on the side
        // that was just modified.
        let lift_left = node
            .left
            .as_ref()
            .map_or(false, |child| child.metadata > node.metadata);
        let lift_right = node
            .right
            .as_ref()
            .map_or(false, |child| child.metadata > node.metadata);

        if lift_left {
            node = tree::rotate_right::<T, U, Self>(node);
        } else if lift_right {
            node = tree::rotate_left::<T, U, Self>(node);
        }

        *tree = Some(node);
    }

    fn fuse(mut left: Tree<T, U, u32>, right: Tree<T, U, u32>) -> Tree<T, U, u32> {
        merge(&mut left, right);
        left
    }
}

// Merges two treaps; all keys in `l_tree` must be less than all keys in
// `r_tree`. The root with the higher priority wins each step.
fn merge<T, U>(l_tree: &mut Tree<T, U, u32>, r_tree: Tree<T, U, u32>) {
    match (l_tree.take(), r_tree) {
        (Some(mut l_node), Some(mut r_node)) => {
            if l_node.metadata > r_node.metadata {
                merge(&mut l_node.right, Some(r_node));
                *l_tree = Some(l_node);
            } else {
                let mut new_tree = Some(l_node);
                merge(&mut new_tree, r_node.left.take());
                r_node.left = new_tree;
                *l_tree = Some(r_node);
            }
        },
        (new_tree, None) | (None, new_tree) => *l_tree = new_tree,
    }
}

/// A policy that never rebalances, producing a plain binary search tree whose
/// height depends entirely on insertion order. Useful as a baseline when
/// measuring what the balancing policies buy.
///
/// Inserts and removes descend recursively, so sorted insertion sequences
/// build a chain whose depth grows with every key; keep such sequences small
/// under this policy or the descent itself can exhaust the call stack.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnbalancedPolicy;

impl<T, U> BalancePolicy<T, U> for UnbalancedPolicy {
    type Metadata = ();

    fn leaf_metadata(&mut self) -> Self::Metadata {}

    fn update(_node: &mut Node<T, U, ()>) {}

    fn rebalance(_tree: &mut Tree<T, U, ()>) {}

    fn fuse(left: Tree<T, U, ()>, mut right: Tree<T, U, ()>) -> Tree<T, U, ()> {
        match tree::detach_min::<T, U, Self>(&mut right) {
            Some(mut new_root) => {
                new_root.left = left;
                new_root.right = right;
                Some(new_root)
            },
            None => left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AvlPolicy, TreapPolicy, UnbalancedPolicy};
    use crate::bst::node::Node;
    use crate::bst::tree::{self, Tree};
    use rand::{Rng, SeedableRng, XorShiftRng};
    use std::cmp;

    // Checks height metadata and the AVL invariant at every node; returns the
    // subtree height in nodes.
    fn check_avl(tree: &Tree<u32, u32, usize>) -> usize {
        match tree {
            None => 0,
            Some(ref node) => {
                let left = check_avl(&node.left);
                let right = check_avl(&node.right);
                assert_eq!(node.metadata, cmp::max(left, right) + 1);
                assert!((left as i32 - right as i32).abs() <= 1);
                node.metadata
            },
        }
    }

    fn check_heap(tree: &Tree<u32, u32, u32>) {
        if let Some(ref node) = tree {
            if let Some(ref child) = node.left {
                assert!(child.metadata <= node.metadata);
            }
            if let Some(ref child) = node.right {
                assert!(child.metadata <= node.metadata);
            }
            check_heap(&node.left);
            check_heap(&node.right);
        }
    }

    fn collect_keys<M>(tree: &Tree<u32, u32, M>, keys: &mut Vec<u32>) {
        if let Some(ref node) = tree {
            collect_keys(&node.left, keys);
            keys.push(node.entry.key);
            collect_keys(&node.right, keys);
        }
    }

    fn check_ascending<M>(tree: &Tree<u32, u32, M>) {
        let mut keys = Vec::new();
        collect_keys(tree, &mut keys);
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_avl_invariant_random_inserts() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 2, 3, 4]);
        let mut root: Tree<u32, u32, usize> = None;
        for _ in 0..1000 {
            let key = rng.next_u32() % 2048;
            tree::insert::<u32, u32, AvlPolicy>(&mut root, Node::new(key, 0, 1));
            check_avl(&root);
            check_ascending(&root);
        }
    }

    #[test]
    fn test_avl_invariant_random_removes() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([5, 6, 7, 8]);
        let mut root: Tree<u32, u32, usize> = None;
        let mut keys = Vec::new();
        for _ in 0..1000 {
            let key = rng.next_u32() % 2048;
            tree::insert::<u32, u32, AvlPolicy>(&mut root, Node::new(key, 0, 1));
            keys.push(key);
        }
        for key in keys {
            tree::remove::<u32, u32, AvlPolicy, u32>(&mut root, &key);
            check_avl(&root);
            check_ascending(&root);
        }
        assert!(root.is_none());
    }

    #[test]
    fn test_avl_invariant_ascending_inserts() {
        let mut root: Tree<u32, u32, usize> = None;
        for key in 0..1024 {
            tree::insert::<u32, u32, AvlPolicy>(&mut root, Node::new(key, 0, 1));
            check_avl(&root);
        }
        // 1024 nodes fit in the AVL height bound 1.44 * log2(n + 1).
        assert!(tree::height(&root) <= 14);
    }

    #[test]
    fn test_avl_remove_two_child_root() {
        let mut root: Tree<u32, u32, usize> = None;
        for key in &[5, 3, 8, 1, 4, 7, 9, 2, 6] {
            tree::insert::<u32, u32, AvlPolicy>(&mut root, Node::new(*key, 0, 1));
        }
        let removed = tree::remove::<u32, u32, AvlPolicy, u32>(&mut root, &5);
        assert_eq!(removed.map(|entry| entry.key), Some(5));
        check_avl(&root);

        let mut keys = Vec::new();
        collect_keys(&root, &mut keys);
        assert_eq!(keys, vec![1, 2, 3, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn test_avl_remove_absent_key() {
        let mut root: Tree<u32, u32, usize> = None;
        tree::insert::<u32, u32, AvlPolicy>(&mut root, Node::new(1, 0, 1));
        assert!(tree::remove::<u32, u32, AvlPolicy, u32>(&mut root, &2).is_none());
        check_avl(&root);
    }

    #[test]
    fn test_treap_invariants_random_operations() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([9, 10, 11, 12]);
        let mut root: Tree<u32, u32, u32> = None;
        let mut keys = Vec::new();
        for _ in 0..1000 {
            let key = rng.next_u32() % 2048;
            let priority = rng.next_u32();
            tree::insert::<u32, u32, TreapPolicy>(&mut root, Node::new(key, 0, priority));
            keys.push(key);
        }
        check_heap(&root);
        check_ascending(&root);

        for key in keys {
            tree::remove::<u32, u32, TreapPolicy, u32>(&mut root, &key);
        }
        assert!(root.is_none());
    }

    #[test]
    fn test_unbalanced_ascending_inserts_skew() {
        let mut root: Tree<u32, u32, ()> = None;
        for key in 1..=7 {
            tree::insert::<u32, u32, UnbalancedPolicy>(&mut root, Node::new(key, 0, ()));
        }
        check_ascending(&root);
        assert_eq!(tree::height(&root), 6);
    }

    #[test]
    fn test_rotations_preserve_order() {
        let mut root: Tree<u32, u32, usize> = None;
        for key in &[2, 1, 4, 3, 5] {
            tree::insert::<u32, u32, AvlPolicy>(&mut root, Node::new(*key, 0, 1));
        }
        let node = root.take().unwrap();
        let rotated = tree::rotate_left::<u32, u32, AvlPolicy>(node);
        root = Some(tree::rotate_right::<u32, u32, AvlPolicy>(rotated));
        check_ascending(&root);
        check_avl(&root);
    }
}
