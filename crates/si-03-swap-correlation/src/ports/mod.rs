//! # Ports Layer
//!
//! - `inbound.rs` - API the ingestion handler drives
//! - `outbound.rs` - storage for pending inbound legs

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
