//! Arbor Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Arbor layout
//! engine and its consumers. It includes:
//!
//! - **Identifiers**: Stable node identifiers ([`identifier::NodeId`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Tree**: The immutable behavior-tree input model ([`tree`] module)

pub mod geometry;
pub mod identifier;
pub mod tree;
