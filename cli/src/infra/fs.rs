//! Filesystem infrastructure — implements `ArtifactStore` with `std::fs`.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::application::ports::ArtifactStore;

/// Production filesystem implementation of `ArtifactStore`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl ArtifactStore for LocalFs {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).with_context(|| format!("writing file {}", path.display()))
    }

    fn set_executable(&self, path: &Path) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
                .with_context(|| format!("setting permissions on {}", path.display()))?;
        }
        #[cfg(not(unix))]
        let _ = path;
        Ok(())
    }

    fn copy_dir(&self, from: &Path, to: &Path) -> Result<()> {
        copy_dir_recursive(from, to)
    }

    fn write_tar_gz(&self, source: &Path, dest: &Path) -> Result<()> {
        let file = File::create(dest).with_context(|| format!("creating {}", dest.display()))?;
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        builder
            .append_dir_all(".", source)
            .with_context(|| format!("archiving {}", source.display()))?;
        builder
            .into_inner()
            .context("finishing tar stream")?
            .finish()
            .context("finishing gzip stream")?;
        Ok(())
    }
}

/// Copy every entry of `from` into `to`, creating directories as needed.
///
/// `to` may live inside `from`; it is never copied into itself.
///
/// # Errors
///
/// Returns an error if any entry cannot be read or written.
pub fn copy_dir_recursive(from: &Path, to: &Path) -> Result<()> {
    std::fs::create_dir_all(to).with_context(|| format!("creating directory {}", to.display()))?;
    let dest = std::fs::canonicalize(to)
        .with_context(|| format!("resolving directory {}", to.display()))?;
    copy_tree(from, to, &dest)
}

fn copy_tree(from: &Path, to: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(to).with_context(|| format!("creating directory {}", to.display()))?;
    for entry in
        std::fs::read_dir(from).with_context(|| format!("reading directory {}", from.display()))?
    {
        let entry = entry.with_context(|| format!("reading directory {}", from.display()))?;
        let src = entry.path();
        let dst = to.join(entry.file_name());
        if entry.file_type().context("reading file type")?.is_dir() {
            if std::fs::canonicalize(&src).is_ok_and(|p| p == dest) {
                continue;
            }
            copy_tree(&src, &dst, dest)?;
        } else {
            std::fs::copy(&src, &dst)
                .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
        }
    }
    Ok(())
}
