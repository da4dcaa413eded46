//! Capability-scoped UTF-8 filesystem helpers shared by the Nelaya crates.
//!
//! Every helper anchors a `cap-std` directory handle at the leading
//! non-descending part of the path (root, drive prefix, or `.`/`..` steps)
//! and performs the operation relative to it.
#![forbid(unsafe_code)]

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Read a UTF-8 text file.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_parent(path)?;
    dir.read_to_string(name)
}

/// Report whether `path` names an existing regular file.
///
/// A missing file or missing parent directory yields `Ok(false)`.
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let metadata = open_parent(path).and_then(|(dir, name)| dir.metadata(name));
    match metadata {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Create every missing directory above `path`.
pub fn create_parent_dirs(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) else {
        return Ok(());
    };
    let (base, relative) = anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Write `contents` to `path`, creating parent directories.
///
/// The bytes go to a sibling temporary file that is then renamed over the
/// target, so concurrent readers see either the old or the new file.
/// Each call stages under its own name, so concurrent writers to the same
/// target never share a temporary file.
pub fn write_replacing(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    create_parent_dirs(path)?;
    let (dir, name) = open_parent(path)?;
    let staging = staging_name(&name);
    dir.write(&staging, contents)?;
    if let Err(err) = dir.rename(&staging, &dir, &name) {
        // Best effort; the rename error is the one worth reporting.
        let _ = dir.remove_file(&staging);
        return Err(err);
    }
    Ok(())
}

/// Sibling temporary name unique to this process and call.
fn staging_name(name: &str) -> String {
    let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
    format!(".{name}.{}.{seq}.partial", std::process::id())
}

/// Open the directory containing `path` and return it with the file name.
pub fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} has no file name")))?
        .to_owned();
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let (base, relative) = anchor(parent)?;
    let dir = if relative.as_str().is_empty() {
        base
    } else {
        base.open_dir(&relative)?
    };
    Ok((dir, name))
}

/// Split `path` into an ambient directory handle and the path below it.
pub fn anchor(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let (base, relative) = split_anchor(path);
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((dir, relative))
}

/// Split `path` into the anchor to open with ambient authority and the
/// remainder.
///
/// Leading root, prefix, `.` and `..` components form the anchor since
/// `cap-std` refuses to climb out of an opened directory.
pub fn split_anchor(path: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut base = Utf8PathBuf::new();
    let mut relative = Utf8PathBuf::new();
    for component in path.components() {
        let anchoring = matches!(
            component,
            Utf8Component::Prefix(_)
                | Utf8Component::RootDir
                | Utf8Component::CurDir
                | Utf8Component::ParentDir
        );
        if anchoring && relative.as_str().is_empty() {
            base.push(component);
        } else {
            relative.push(component);
        }
    }
    if base.as_str().is_empty() {
        base.push(".");
    }
    (base, relative)
}
