//! Command handlers, one module per subcommand.

pub mod check;
pub mod new;
pub mod sdk;
pub mod serve;

use std::path::Path;

use netscaff_core::domain::ScaffoldRequest;

use crate::error::{CliError, CliResult, IntoCli};

/// Read and parse a JSON scaffold request.
pub(crate) fn read_request(path: &Path) -> CliResult<ScaffoldRequest> {
    let text = std::fs::read_to_string(path)
        .with_cli_context(|| format!("reading {}", path.display()))?;

    serde_json::from_str(&text).map_err(|e| CliError::InvalidRequest {
        path: path.to_path_buf(),
        message: e.to_string(),
        source: Some(e),
    })
}
