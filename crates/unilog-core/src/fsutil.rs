//! Atomic file output.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Writes `path` through a sibling temporary file that is renamed over
/// the target only after `write` succeeds and the data is flushed.
///
/// On any failure the temporary file is removed and `path` is untouched.
///
/// ```rust
/// use std::io::Write;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("out.txt");
/// unilog_core::write_atomic(&path, |w| -> std::io::Result<()> { w.write_all(b"ok") }).unwrap();
/// assert_eq!(std::fs::read(&path).unwrap(), b"ok");
/// ```
pub fn write_atomic<P, F, E>(path: P, write: F) -> Result<(), E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<(), E>,
    E: From<io::Error>,
{
    let path = path.as_ref();
    let tmp = temp_sibling(path);

    let result = write_and_rename(&tmp, path, write);
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_and_rename<F, E>(tmp: &Path, path: &Path, write: F) -> Result<(), E>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), E>,
    E: From<io::Error>,
{
    let mut writer = BufWriter::new(File::create(tmp)?);
    write(&mut writer)?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp, path)?;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn failure_leaves_no_trace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.cube");
        fs::write(&path, "previous").unwrap();

        let err = write_atomic(&path, |w| -> io::Result<()> {
            w.write_all(b"partial")?;
            Err(io::Error::other("boom"))
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "boom");

        assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "old").unwrap();
        write_atomic(&path, |w| -> io::Result<()> { w.write_all(b"new") }).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
