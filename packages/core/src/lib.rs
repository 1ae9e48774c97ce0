//! Connector contract for linkflow.
//!
//! Every connector operation is a [`flow::node::NodeLogic`] that describes
//! itself through a [`flow::node::Node`] (metadata, form schema and auth
//! requirement) and runs against an [`flow::execution::context::ExecutionContext`]
//! carrying the resolved inputs, the per-instance credentials and the HTTP
//! transport.

pub mod config;
pub mod error;
pub mod flow;
pub mod utils;

pub use config::RuntimeConfig;
pub use error::ConnectorError;
