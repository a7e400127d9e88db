pub mod config;
pub mod credentials;
pub mod error;
pub mod tour;

pub use config::Config;
pub use credentials::ServiceAccountKey;
pub use error::*;
pub use tour::*;
