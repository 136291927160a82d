pub mod client;
pub mod error;
pub mod json_builder;
pub mod models;
pub mod property;

pub use client::{Auth, RedmineClient, RedmineConfig};
pub use error::Error;
pub use models::*;

// Property tracking re-exports
pub use property::{Property, PropertyStorage};

// JSON builder re-exports
pub use json_builder::{to_json_value, to_simple_json};
