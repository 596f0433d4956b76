//! Core module - the snapshot tree and the pure passes over it
//!
//! This module provides:
//! - The snapshot tree model (Node) and its one-shot builder
//! - The built-in default ignore filter
//! - Token estimation for interactive budgeting
//! - Path normalization utilities
//! - Rendering of the final file map and file contents sections

pub mod estimate;
pub mod filter;
pub mod paths;
pub mod render;
pub mod tree;
