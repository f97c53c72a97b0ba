//! Report rendering to standard output.

use std::io::{self, Write};
use std::time::Duration;

use crate::github::RetrievalError;
use crate::report::RepositoryReport;

/// Writes the rendered report and the total wall-clock time to stdout.
///
/// # Errors
///
/// Returns [`RetrievalError::Io`] when writing to stdout fails.
pub fn write_report(report: &RepositoryReport, elapsed: Duration) -> Result<(), RetrievalError> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{report}").map_err(map_io_error)?;
    writeln!(
        stdout,
        "Retrieval and calculation time: {}",
        humantime::format_duration(Duration::from_secs(elapsed.as_secs()))
    )
    .map_err(map_io_error)
}

fn map_io_error(error: io::Error) -> RetrievalError {
    RetrievalError::Io {
        message: error.to_string(),
    }
}
