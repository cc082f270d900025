pub mod config;
pub mod entities;
pub mod errors;
pub mod known_assets;
pub mod operations;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use known_assets::*;
pub use operations::*;
