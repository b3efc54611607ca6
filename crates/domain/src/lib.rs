pub mod config;
pub mod error;
pub mod job;

pub use error::{Error, Result};
