//! Owner-only filesystem writes.
//!
//! Directories are created `0700` and files written `0600` on Unix. Other
//! platforms rely on the per-user location of the config directory.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Permission bits for directories holding credentials.
#[cfg(unix)]
pub const DIR_MODE: u32 = 0o700;

/// Permission bits for files holding credentials.
#[cfg(unix)]
pub const FILE_MODE: u32 = 0o600;

/// Create `dir` and any missing parents with owner-only permissions.
///
/// An existing directory is left as is.
pub fn create_private_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir)
}

/// Write `contents` to `path`, creating or truncating it, with owner-only permissions.
///
/// Permissions are re-applied after the write so a pre-existing file with
/// looser bits is tightened. The write itself is a single `write_all`; two
/// processes writing the same file concurrently can still lose an update.
pub fn write_private_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(FILE_MODE))?;
    }

    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn mode(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn test_create_private_dir_is_owner_only() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("jira-cli");

        create_private_dir(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(mode(&dir), DIR_MODE);
    }

    #[test]
    fn test_create_private_dir_existing_is_ok() {
        let temp = TempDir::new().unwrap();
        create_private_dir(temp.path()).unwrap();
        create_private_dir(temp.path()).unwrap();
    }

    #[test]
    fn test_write_private_file_is_owner_only() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("secret");

        write_private_file(&path, b"hello").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"hello");
        assert_eq!(mode(&path), FILE_MODE);
    }

    #[test]
    fn test_write_private_file_tightens_existing_permissions() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("secret");
        fs::write(&path, "old contents that are longer").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_private_file(&path, b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert_eq!(mode(&path), FILE_MODE);
    }
}
