//! Output file naming and writing

use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Derive the output path for a decoded container
///
/// The name is the input's file stem plus `extension`, placed in `out_dir`
/// or, when none is given, next to the input.
pub fn output_path(input: &Path, out_dir: Option<&Path>, extension: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .with_context(|| format!("Input path has no file name: {:?}", input))?;

    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    };

    // Appended rather than set, so dotted stems like "Mega Man X2.v1" survive
    let mut name = OsString::from(stem);
    name.push(".");
    name.push(extension.trim_start_matches('.'));
    Ok(dir.join(name))
}

/// Write the payload, refusing to clobber an existing file unless asked to
pub fn write_payload(path: &Path, data: &[u8], overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        bail!("Output file already exists (use --force to overwrite): {:?}", path);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
        }
    }

    fs::write(path, data).with_context(|| format!("Failed to write output file: {:?}", path))
}
