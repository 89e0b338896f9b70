use serde_derive::{Deserialize, Serialize};

/// A key-value pair stored in a tree node.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct Entry<T, U> {
    pub key: T,
    pub value: U,
}
