//! Core catalog plumbing for linkflow
//!
//! - `NodeConstructor` and the `inventory` collection fed by `#[register_node]`
//! - `Catalog`, the id → node registry built once at startup
//! - the host entry points: execute, resolve options, start and stop

use std::sync::Arc;

pub use linkflow::flow::node::NodeLogic;

pub use inventory;
pub use linkflow_catalog_macros::register_node;

mod registry;

pub use registry::Catalog;

/// A node constructor function type
pub struct NodeConstructor {
    constructor: fn() -> Arc<dyn NodeLogic>,
}

impl NodeConstructor {
    pub const fn new(constructor: fn() -> Arc<dyn NodeLogic>) -> Self {
        Self { constructor }
    }

    pub fn construct(&self) -> Arc<dyn NodeLogic> {
        (self.constructor)()
    }
}

inventory::collect!(NodeConstructor);

pub fn get_catalog() -> Vec<Arc<dyn NodeLogic>> {
    inventory::iter::<NodeConstructor>()
        .map(|nc| nc.construct())
        .collect()
}
