pub mod error;
pub mod format;
pub mod metadata;

pub use error::*;
pub use format::*;
pub use metadata::*;
