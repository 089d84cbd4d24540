// gridfill/src/fill/mod.rs

mod driver;
mod errors;
pub mod init;
mod options;
pub mod relax;

pub use driver::{fill, fill_with_records, FillOutput};
pub use errors::GridFillError;
pub use options::{FillOptions, FillOptionsBuilder, FillOptionsBuilderError};
pub use relax::{ConvergenceRecord, Relaxation};
