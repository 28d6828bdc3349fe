pub mod error;
pub mod output;
pub mod paths;
pub mod types;

pub use error::{ErrorKind, RenamerError};
pub use output::{OutputFormat, OutputWriter};
pub use types::*;
