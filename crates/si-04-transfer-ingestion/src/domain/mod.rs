pub mod errors;
pub mod outcome;
pub mod records;

pub use errors::*;
pub use outcome::*;
pub use records::*;
