//! Node identifiers.
//!
//! This module provides the [`NodeId`] type used to address nodes of a
//! behavior tree. Identifiers are assigned by the tree's owner, are unique
//! within one tree and stay stable across edits, so layouts can be matched
//! back to nodes between successive layout passes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a single behavior-tree node.
///
/// # Examples
///
/// ```
/// use arbor_core::identifier::NodeId;
///
/// let id = NodeId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id, NodeId::from(7));
/// assert_eq!(id.to_string(), "#7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a `NodeId` from its raw value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value of the identifier.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_ordering() {
        let mut ids = vec![NodeId::new(3), NodeId::new(1), NodeId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![NodeId::new(1), NodeId::new(2), NodeId::new(3)]);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::new(0).to_string(), "#0");
        assert_eq!(format!("{}", NodeId::from(42)), "#42");
    }
}
