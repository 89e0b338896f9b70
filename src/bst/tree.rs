use crate::bst::node::Node;
use crate::bst::policy::BalancePolicy;
use crate::entry::Entry;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

pub type Tree<T, U, M> = Option<Box<Node<T, U, M>>>;

/// Rotates `node` to the left, returning its right child as the new subtree
/// root with `node` as the left child. The child subtree that changes sides
/// is re-attached before metadata is recomputed, so recomputation is strictly
/// bottom-up.
///
/// # Panics
///
/// Panics if `node` has no right child.
pub fn rotate_left<T, U, P>(mut node: Box<Node<T, U, P::Metadata>>) -> Box<Node<T, U, P::Metadata>>
where
    P: BalancePolicy<T, U>,
{
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    P::update(&mut node);
    child.left = Some(node);
    P::update(&mut child);
    child
}

/// Rotates `node` to the right, returning its left child as the new subtree
/// root with `node` as the right child.
///
/// # Panics
///
/// Panics if `node` has no left child.
pub fn rotate_right<T, U, P>(mut node: Box<Node<T, U, P::Metadata>>) -> Box<Node<T, U, P::Metadata>>
where
    P: BalancePolicy<T, U>,
{
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    P::update(&mut node);
    child.right = Some(node);
    P::update(&mut child);
    child
}

/// Detaches the minimum node of `tree`, rebalancing every frame of the unwind
/// path so the policy invariant holds along the entire former search path.
/// Returns `None` if the tree is empty.
pub fn detach_min<T, U, P>(tree: &mut Tree<T, U, P::Metadata>) -> Option<Box<Node<T, U, P::Metadata>>>
where
    P: BalancePolicy<T, U>,
{
    let has_left = match tree {
        Some(ref node) => node.left.is_some(),
        None => return None,
    };

    if has_left {
        let min = match tree {
            Some(ref mut node) => detach_min::<T, U, P>(&mut node.left),
            None => unreachable!(),
        };
        P::rebalance(tree);
        min
    } else {
        tree.take().map(|mut node| {
            *tree = node.right.take();
            node
        })
    }
}

/// Inserts `new_node` into `tree`, rebalancing on the way back up. If the key
/// already exists, the old entry is replaced and returned with no structural
/// change.
pub fn insert<T, U, P>(tree: &mut Tree<T, U, P::Metadata>, new_node: Node<T, U, P::Metadata>) -> Option<Entry<T, U>>
where
    T: Ord,
    P: BalancePolicy<T, U>,
{
    let ret = match tree {
        Some(ref mut node) => match new_node.entry.key.cmp(&node.entry.key) {
            Ordering::Less => insert::<T, U, P>(&mut node.left, new_node),
            Ordering::Greater => insert::<T, U, P>(&mut node.right, new_node),
            Ordering::Equal => {
                return Some(mem::replace(&mut node.entry, new_node.entry));
            },
        },
        None => {
            *tree = Some(Box::new(new_node));
            return None;
        },
    };

    P::rebalance(tree);
    ret
}

/// Removes the node with the given key from `tree` and returns its entry,
/// rebalancing every frame of the unwind path. A node with two children is
/// replaced by fusing its subtrees, which promotes its in-order successor.
pub fn remove<T, U, P, V>(tree: &mut Tree<T, U, P::Metadata>, key: &V) -> Option<Entry<T, U>>
where
    T: Borrow<V>,
    P: BalancePolicy<T, U>,
    V: Ord + ?Sized,
{
    let ret = match tree.take() {
        Some(mut node) => match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => {
                let ret = remove::<T, U, P, V>(&mut node.left, key);
                *tree = Some(node);
                ret
            },
            Ordering::Greater => {
                let ret = remove::<T, U, P, V>(&mut node.right, key);
                *tree = Some(node);
                ret
            },
            Ordering::Equal => {
                let unboxed_node = *node;
                let Node { entry, left, right, .. } = unboxed_node;
                *tree = P::fuse(left, right);
                Some(entry)
            },
        },
        None => return None,
    };

    P::rebalance(tree);
    ret
}

pub fn get<'a, T, U, M, V>(tree: &'a Tree<T, U, M>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Less => get(&node.left, key),
        Ordering::Greater => get(&node.right, key),
        Ordering::Equal => Some(&node.entry),
    })
}

pub fn get_mut<'a, T, U, M, V>(tree: &'a mut Tree<T, U, M>, key: &V) -> Option<&'a mut Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_mut().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Less => get_mut(&mut node.left, key),
        Ordering::Greater => get_mut(&mut node.right, key),
        Ordering::Equal => Some(&mut node.entry),
    })
}

/// Returns the entry with the smallest key greater than or equal to `key`.
pub fn ceil<'a, T, U, M, V>(tree: &'a Tree<T, U, M>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Greater => ceil(&node.right, key),
        Ordering::Less => match ceil(&node.left, key) {
            None => Some(&node.entry),
            res => res,
        },
        Ordering::Equal => Some(&node.entry),
    })
}

/// Returns the entry with the largest key less than or equal to `key`.
pub fn floor<'a, T, U, M, V>(tree: &'a Tree<T, U, M>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Less => floor(&node.left, key),
        Ordering::Greater => match floor(&node.right, key) {
            None => Some(&node.entry),
            res => res,
        },
        Ordering::Equal => Some(&node.entry),
    })
}

/// Returns the entry with the smallest key strictly greater than `key`. The
/// last ancestor for which the target lay in the left subtree is the answer
/// when the key's own right subtree cannot supply one.
pub fn successor<'a, T, U, M, V>(tree: &'a Tree<T, U, M>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Less => match successor(&node.left, key) {
            None => Some(&node.entry),
            res => res,
        },
        _ => successor(&node.right, key),
    })
}

/// Returns the entry with the largest key strictly less than `key`.
pub fn predecessor<'a, T, U, M, V>(tree: &'a Tree<T, U, M>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Greater => match predecessor(&node.right, key) {
            None => Some(&node.entry),
            res => res,
        },
        _ => predecessor(&node.left, key),
    })
}

pub fn min<T, U, M>(tree: &Tree<T, U, M>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.entry
    })
}

pub fn max<T, U, M>(tree: &Tree<T, U, M>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.entry
    })
}

/// Height of `tree` in edges, computed structurally rather than from policy
/// metadata. An empty tree has height -1 and a single node has height 0.
/// Walks the tree with an explicit stack, so it stays usable on degenerate
/// trees whose depth would exhaust the call stack.
pub fn height<T, U, M>(tree: &Tree<T, U, M>) -> isize {
    let mut height = -1;
    let mut stack = Vec::new();
    if let Some(ref node) = tree {
        stack.push((node, 0));
    }
    while let Some((node, depth)) = stack.pop() {
        if depth > height {
            height = depth;
        }
        if let Some(ref child) = node.left {
            stack.push((child, depth + 1));
        }
        if let Some(ref child) = node.right {
            stack.push((child, depth + 1));
        }
    }
    height
}
