//! JSON artifacts: pretty-printed, written atomically, and patched in place
//! by later steps.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DumpError;

const INDENT: &[u8] = b"    ";

/// Serialize with a 4-space indent, non-ASCII kept literally, no trailing
/// newline.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Read and decode a required JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, DumpError> {
    if !path.exists() {
        return Err(DumpError::Missing(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| DumpError::json(path, e))
}

/// Read and decode an optional JSON file; `Ok(None)` when it does not exist.
pub fn load_optional_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DumpError> {
    if !path.exists() {
        log::debug!("{} not present, skipping", path.display());
        return Ok(None);
    }
    load_json(path).map(Some)
}

/// Write `value` to `path` via `<path>.tmp` and a rename, creating parent
/// directories as needed.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DumpError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let bytes = to_pretty_json(value).map_err(|e| DumpError::json(path, e))?;
    let tmp = tmp_path(path);
    fs::write(&tmp, &bytes)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    log::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Read-modify-write of an existing artifact.
///
/// The new value is written atomically; the file is left untouched if
/// loading or decoding fails.
pub fn update_json<T, F>(path: &Path, update: F) -> Result<T, DumpError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce(T) -> T,
{
    let current: T = load_json(path)?;
    let updated = update(current);
    write_json(path, &updated)?;
    Ok(updated)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
