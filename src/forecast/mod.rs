pub mod engine;
pub mod service;
pub mod weekly;

pub use engine::*;
pub use service::*;
pub use weekly::*;
