use pretty_env_logger;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn _setup_pretty_env_logger_default() {
    INIT.call_once(|| {
        pretty_env_logger::init();
    });
}

pub use element::GridElement;
pub use fill::{
    fill, fill_with_records, ConvergenceRecord, FillOptions, FillOptionsBuilder,
    FillOptionsBuilderError, FillOutput, GridFillError,
};
pub use masked::{Maskable, MaskedArray, MaskedArrayError, FILL_VALUE};
pub mod cube;
pub mod element;
pub mod fill;
pub mod io;
pub mod layout;
pub mod masked;
pub mod plot;
