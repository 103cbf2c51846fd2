pub mod config;
pub mod error;

pub use config::PixelSeekerConfig;
pub use error::{PixelSeekerError, Result};
