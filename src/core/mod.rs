pub mod error;

pub use error::{HealthError, Result};
