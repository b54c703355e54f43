pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod notify;
pub mod pricing;
pub mod record;
pub mod session;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{ChatError, Result};
