//! Output writers.
//!
//! The instance is written as pretty JSON for the solver, alongside a flat CSV
//! dump with one row per program for eyeballing a run. Both writers create the
//! target directory when it is missing. [`write_outputs`] renders both files
//! before touching the disk and never leaves one without the other.

pub mod checksum;
pub mod csv;
pub mod json;

pub use checksum::instance_checksum;
pub use csv::{render_debug_csv, write_debug_csv};
pub use json::{render_instance_json, write_instance_json};

use std::fs;
use std::path::Path;

use crate::config::OutputSettings;
use crate::error::{ErrorContext, GeneratorError, GeneratorResult};
use crate::models::Instance;

/// Write the instance and its debug dump under `output`.
///
/// The dump goes first; if the instance then fails to write, the dump is
/// removed again.
///
/// # Errors
/// Returns the first serialization or output error.
pub fn write_outputs(instance: &Instance, output: &OutputSettings) -> GeneratorResult<()> {
    let json = render_instance_json(instance)?;
    let dump = render_debug_csv(instance)?;
    let instance_path = output.instance_path();
    let debug_path = output.debug_path();

    write_file(&debug_path, &dump, "write_debug_csv")?;
    if let Err(e) = write_file(&instance_path, json.as_bytes(), "write_instance_json") {
        if let Err(cleanup) = fs::remove_file(&debug_path) {
            log::warn!("Could not remove {}: {}", debug_path.display(), cleanup);
        }
        return Err(e);
    }

    log::info!(
        "Instance written to {} (debug dump {})",
        instance_path.display(),
        debug_path.display()
    );
    Ok(())
}

fn write_file(path: &Path, contents: &[u8], operation: &'static str) -> GeneratorResult<()> {
    ensure_parent_dir(path)?;
    fs::write(path, contents).map_err(|e| {
        GeneratorError::output_with_context(
            format!("Failed to write {}: {}", path.display(), e),
            ErrorContext::new(operation).with_entity_id(path.display()),
        )
    })
}

fn ensure_parent_dir(path: &Path) -> GeneratorResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir).map_err(|e| {
            GeneratorError::output_with_context(
                format!("Failed to create output directory: {}", e),
                ErrorContext::new("write_output").with_entity_id(dir.display()),
            )
        }),
        _ => Ok(()),
    }
}
