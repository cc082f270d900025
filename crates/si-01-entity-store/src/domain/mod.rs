//! # Domain Layer
//!
//! Store keys, typed entity codec and errors. No I/O lives here.

pub mod codec;
pub mod entities;
pub mod errors;

pub use codec::*;
pub use entities::*;
pub use errors::*;
