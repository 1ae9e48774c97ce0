//! Standard catalog for linkflow
//!
//! Connectors that compute locally and never touch the network:
//! - Hashing (MD5, SHA-1, SHA-256, SHA-512)
//! - Calculator
//! - Random text generation

use std::sync::Arc;

pub use linkflow_catalog_core::{NodeConstructor, NodeLogic, inventory, register_node};

pub mod utils;

pub fn get_catalog() -> Vec<Arc<dyn NodeLogic>> {
    linkflow_catalog_core::get_catalog()
}
