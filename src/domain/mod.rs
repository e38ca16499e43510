pub mod prediction;
pub mod types;

pub use prediction::*;
pub use types::*;
