//! Virtual file system for the terminal.
//!
//! The tree is assembled once through [`VfsBuilder`] and is read-only
//! afterwards. Nodes live in an arena and refer to each other by
//! [`NodeId`]; parents are plain back-indices, so the tree owns every node
//! exactly once.

pub mod content;
mod tree;

pub use content::{
    ABOUT_FILE, DECOY_DIRS, HINTS_FILE, PROJECTS_FILE, RESUME_FILE, portfolio_tree,
};
pub use tree::{FileContent, Node, NodeId, NodeKind, Vfs, VfsBuilder};
