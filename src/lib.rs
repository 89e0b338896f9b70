//! Ordered map and set collections backed by a self-balancing binary search
//! tree. The balancing discipline is a strategy: the default height-balanced
//! (AVL) policy guarantees logarithmic worst-case operations, and alternative
//! policies reuse the same nodes, rotations, and engine.

mod entry;

pub mod bst;

pub use crate::entry::Entry;
