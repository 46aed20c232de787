//! Report export for download by the UI.

mod report;

pub use report::*;
