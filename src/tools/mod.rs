//! Tool system for the agent pipeline
//!
//! Tools are the only way the model touches the outside world. Each tool
//! declares a name, description, and JSON-schema parameter description;
//! the registry serializes these for the completion endpoint and validates
//! model-supplied parameters before dispatch.

mod error;
mod registry;
mod traits;

pub mod builtin;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use traits::{Tool, ToolResult};
