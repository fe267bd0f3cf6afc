//! Library side of the `pagewarm` binary: pipeline wiring, report output and
//! exit status mapping.

pub mod exit;
pub mod output;
pub mod pipeline;

pub use exit::exit_status;
pub use output::{ReportFormat, ReportPrinter};
pub use pipeline::{run, run_with};
