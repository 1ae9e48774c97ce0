//! Every linkflow connector in one registry.
//!
//! Linking this crate pulls in the standard and data catalogs so their
//! `#[register_node]` submissions are visible to [`Catalog::from_inventory`].

use std::sync::Arc;

use linkflow::ConnectorError;

pub use linkflow_catalog_core::{Catalog, NodeConstructor, NodeLogic};
pub use linkflow_catalog_data as data;
pub use linkflow_catalog_std as utils;

pub fn get_catalog() -> Vec<Arc<dyn NodeLogic>> {
    let nodes = linkflow_catalog_core::get_catalog();
    tracing::debug!(nodes = nodes.len(), "collected registered nodes");
    nodes
}

/// Builds the id → node registry, failing on duplicate ids.
pub fn catalog() -> Result<Catalog, ConnectorError> {
    Catalog::from_nodes(get_catalog())
}
