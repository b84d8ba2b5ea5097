pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod selection;
pub mod session;
pub mod source;

pub use error::{DashboardError, Result};
