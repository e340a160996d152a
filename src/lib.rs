pub mod clients;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod models;
pub mod services;

pub use error::{ProxyError, Result};
