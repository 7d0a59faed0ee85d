//! Unpacking downloaded distribution artifacts.
//!
//! Artifacts are sniffed by content rather than by URL, since registry
//! URLs such as `/get/apcu` carry no extension.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::RetrievalError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const ZIP_MAGIC: [u8; 4] = *b"PK\x03\x04";
const ZIP_EMPTY_MAGIC: [u8; 4] = *b"PK\x05\x06";
const USTAR_OFFSET: usize = 257;

/// Container format of a downloaded artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    Tar,
    Zip,
    /// Not an archive; stored as a single file.
    Raw,
}

impl ArchiveFormat {
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(&GZIP_MAGIC) {
            Self::TarGz
        } else if bytes.starts_with(&ZIP_MAGIC) || bytes.starts_with(&ZIP_EMPTY_MAGIC) {
            Self::Zip
        } else if bytes
            .get(USTAR_OFFSET..USTAR_OFFSET + 5)
            .is_some_and(|magic| magic == b"ustar")
        {
            Self::Tar
        } else {
            Self::Raw
        }
    }
}

/// Unpack `bytes` into `dest`.
///
/// Entries are first extracted into a staging directory next to `dest`. If
/// the archive has a single top-level directory, its contents are moved into
/// `dest`; otherwise all top-level entries are. Raw artifacts are written to
/// `dest/<raw_file_name>`.
pub fn unpack(
    bytes: &[u8],
    dest: &Path,
    raw_file_name: &str,
) -> Result<ArchiveFormat, RetrievalError> {
    let format = ArchiveFormat::detect(bytes);
    tracing::debug!(?format, dest = %dest.display(), "unpacking artifact");

    if format == ArchiveFormat::Raw {
        fs::create_dir_all(dest)?;
        fs::write(dest.join(raw_file_name), bytes)?;
        return Ok(format);
    }

    let staging = staging_dir(dest)?;
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging)?;

    let result = match format {
        ArchiveFormat::TarGz => extract_tar(GzDecoder::new(bytes), &staging),
        ArchiveFormat::Tar => extract_tar(bytes, &staging),
        ArchiveFormat::Zip => extract_zip(bytes, &staging),
        ArchiveFormat::Raw => Ok(()),
    }
    .and_then(|()| move_into(&find_root(&staging)?, dest));

    let _ = fs::remove_dir_all(&staging);
    result.map(|()| format)
}

fn staging_dir(dest: &Path) -> Result<PathBuf, RetrievalError> {
    let parent = dest
        .parent()
        .ok_or_else(|| RetrievalError::archive("destination has no parent directory"))?;
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    fs::create_dir_all(parent)?;
    Ok(parent.join(format!(".{}.unpack-{}", name, std::process::id())))
}

/// A lone top-level directory is the package root; otherwise the staging
/// directory itself is.
fn find_root(staging: &Path) -> Result<PathBuf, RetrievalError> {
    let entries: Vec<_> = fs::read_dir(staging)?.collect::<Result<_, _>>()?;
    match entries.as_slice() {
        [only] if only.file_type()?.is_dir() => Ok(only.path()),
        _ => Ok(staging.to_path_buf()),
    }
}

fn move_into(root: &Path, dest: &Path) -> Result<(), RetrievalError> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if target.exists() {
            return Err(RetrievalError::archive(format!(
                "destination already contains {}",
                target.display()
            )));
        }
        fs::rename(entry.path(), &target)?;
    }
    Ok(())
}

/// Reject absolute paths and `..` components.
fn sanitize(path: &Path) -> Result<&Path, RetrievalError> {
    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(RetrievalError::archive(format!(
            "archive entry escapes destination: {}",
            path.display()
        )));
    }
    Ok(path)
}

fn extract_tar<R: Read>(reader: R, dest: &Path) -> Result<(), RetrievalError> {
    let mut archive = Archive::new(reader);
    let entries = archive
        .entries()
        .map_err(|e| RetrievalError::archive(format!("failed to read tar entries: {e}")))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| RetrievalError::archive(format!("failed to read tar entry: {e}")))?;
        let path = entry
            .path()
            .map_err(|e| RetrievalError::archive(format!("failed to read entry path: {e}")))?
            .into_owned();
        let dest_path = dest.join(sanitize(&path)?);

        let entry_type = entry.header().entry_type();
        if entry_type.is_dir() {
            fs::create_dir_all(&dest_path)?;
        } else if entry_type.is_file() {
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut file = File::create(&dest_path)?;
            io::copy(&mut entry, &mut file)?;
            #[cfg(unix)]
            if let Ok(mode) = entry.header().mode() {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&dest_path, fs::Permissions::from_mode(mode)).ok();
            }
        } else {
            tracing::debug!(path = %path.display(), "skipping non-regular tar entry");
        }
    }
    Ok(())
}

fn extract_zip(bytes: &[u8], dest: &Path) -> Result<(), RetrievalError> {
    let mut archive = zip::ZipArchive::new(io::Cursor::new(bytes))
        .map_err(|e| RetrievalError::archive(format!("failed to read zip archive: {e}")))?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| RetrievalError::archive(format!("failed to read zip entry {i}: {e}")))?;

        let outpath = match file.enclosed_name() {
            Some(path) => dest.join(path),
            None => {
                return Err(RetrievalError::archive(format!(
                    "archive entry escapes destination: {}",
                    file.name()
                )));
            }
        };

        if file.is_dir() {
            fs::create_dir_all(&outpath)?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut outfile = File::create(&outpath)?;
        io::copy(&mut file, &mut outfile)?;

        #[cfg(unix)]
        if let Some(mode) = file.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&outpath, fs::Permissions::from_mode(mode)).ok();
        }
    }
    Ok(())
}
