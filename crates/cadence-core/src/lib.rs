pub mod config;
pub mod error;
pub mod time;

pub use config::CadenceConfig;
pub use error::{CadenceError, Result};
