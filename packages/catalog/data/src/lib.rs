//! SaaS connectors for linkflow
//!
//! Each service lives under [`data`] with a `provider` module (auth
//! requirement, provider struct, base URL) and one module per operation.
//! Polling triggers go through [`linkflow::flow::polling::SincePoller`].

use std::sync::Arc;

pub use linkflow_catalog_core::{NodeConstructor, NodeLogic, inventory, register_node};

pub mod data;

pub fn get_catalog() -> Vec<Arc<dyn NodeLogic>> {
    linkflow_catalog_core::get_catalog()
}
