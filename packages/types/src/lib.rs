pub use anyhow::{Error, Result, anyhow, bail};
pub use async_trait::async_trait;
pub use bytes::Bytes;
pub use chrono;
pub use rand;
pub use reqwest;
pub use schemars::JsonSchema;
pub use serde_json::{Map, Value};
pub use tokio;

pub mod utils;

pub mod json {
    pub use serde_json::{
        Map, Value, from_slice, from_str, from_value, json, to_string, to_string_pretty,
        to_value, to_vec,
    };
}

pub mod sync {
    pub use tokio::sync::{Mutex, RwLock};
}

pub use utils::create_id;
