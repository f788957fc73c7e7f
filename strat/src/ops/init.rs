//! Init operation - write an example stack.toml.

use std::path::Path;

use eyre::{Context, Result, bail};
use tracing::debug;

use crate::reports::InitReport;

/// Write `content` as `stack.toml` in `output_dir`.
///
/// The directory is created if needed. An existing stack.toml is never
/// overwritten.
///
/// # Errors
///
/// Fails if stack.toml already exists or cannot be written.
pub fn init(stack_name: &str, content: &str, output_dir: &Path) -> Result<InitReport> {
    let config_path = output_dir.join("stack.toml");
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    std::fs::create_dir_all(output_dir)
        .wrap_err_with(|| format!("failed to create {}", output_dir.display()))?;
    std::fs::write(&config_path, content)
        .wrap_err_with(|| format!("failed to write {}", config_path.display()))?;
    debug!(path = %config_path.display(), "wrote stack.toml");

    Ok(InitReport {
        stack_name: stack_name.to_string(),
        output_dir: output_dir.to_path_buf(),
        config_path,
    })
}
