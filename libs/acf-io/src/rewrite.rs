//! # Block Replacement and Staged Writes
//!
//! Body properties live between `PROPERTIES_BEGIN` and `PROPERTIES_END`.
//! A rebuild replaces every `P _body/` line in that range at once and then
//! swaps the file in with a rename.

use crate::block::BODY_PREFIX;
use crate::error::{AcfError, AcfResult};
use std::ffi::OsString;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub const PROPERTIES_BEGIN: &str = "PROPERTIES_BEGIN";
pub const PROPERTIES_END: &str = "PROPERTIES_END";

/// Reads a file as lines, replacing invalid UTF-8 and dropping `\r`.
pub fn read_lines<P: AsRef<Path>>(path: P) -> AcfResult<Vec<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AcfError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AcfError::Io(e)
        }
    })?;

    Ok(String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect())
}

/// Replaces all body properties with `new_lines`.
///
/// The new block goes where the first old body line was, or directly after
/// `PROPERTIES_BEGIN` when there was none. Lines outside the properties
/// section are never touched.
///
/// # Errors
///
/// [`AcfError::MissingPropertiesBlock`] when either marker is missing or
/// `PROPERTIES_END` comes first.
pub fn replace_body_lines<S: AsRef<str>>(acf_lines: &[S], new_lines: &[String]) -> AcfResult<Vec<String>> {
    let begin = acf_lines
        .iter()
        .position(|line| line.as_ref().trim() == PROPERTIES_BEGIN)
        .ok_or(AcfError::MissingPropertiesBlock)?;
    let end = acf_lines[begin..]
        .iter()
        .position(|line| line.as_ref().trim() == PROPERTIES_END)
        .map(|offset| begin + offset)
        .ok_or(AcfError::MissingPropertiesBlock)?;

    let mut output = Vec::with_capacity(acf_lines.len() + new_lines.len());
    let mut insert_at = None;
    let mut removed = 0usize;

    for (index, line) in acf_lines.iter().enumerate() {
        let line = line.as_ref();
        if index > begin && index < end && line.trim_start().starts_with(BODY_PREFIX) {
            insert_at.get_or_insert(output.len());
            removed += 1;
            continue;
        }
        output.push(line.to_string());
    }

    let insert_at = insert_at.unwrap_or(begin + 1);
    let rest = output.split_off(insert_at);
    output.extend(new_lines.iter().cloned());
    output.extend(rest);

    debug!(removed, inserted = new_lines.len(), "Replaced body properties");
    Ok(output)
}

/// Writes `lines` to `path` through a sibling temp file and a rename.
///
/// With `backup`, an existing file is first copied to `<name>.bak`; the
/// backup path is returned.
pub fn write_lines_atomic<P: AsRef<Path>, S: AsRef<str>>(
    path: P,
    lines: &[S],
    backup: bool,
) -> AcfResult<Option<PathBuf>> {
    let path = path.as_ref();

    let backup_path = if backup && path.exists() {
        let target = backup_path(path);
        fs::copy(path, &target)?;
        Some(target)
    } else {
        None
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let staged = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(staged.as_file());
        for line in lines {
            writer.write_all(line.as_ref().as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| AcfError::Io(e.error))?;

    info!(path = %path.display(), lines = lines.len(), backup = backup_path.is_some(), "Wrote file");
    Ok(backup_path)
}

/// `<file name>.bak` next to `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}
