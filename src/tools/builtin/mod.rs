//! Builtin example tools

mod calculate;
mod fetch_url;
mod server_time;

pub use calculate::CalculateTool;
pub use fetch_url::FetchUrlTool;
pub use server_time::ServerTimeTool;
