//! Zip archiver over `walkdir` and `zip`.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};
use walkdir::{DirEntry, WalkDir};
use zip::{CompressionMethod, ZipWriter, result::ZipError, write::SimpleFileOptions};

use netscaff_core::{
    application::{
        ApplicationError,
        ports::{ArchiveSummary, Archiver},
    },
    error::{ScaffError, ScaffResult},
};

/// Build output directories never shipped in an archive.
pub const SKIPPED_DIRS: [&str; 2] = ["bin", "obj"];

#[derive(Debug, Error)]
enum ArchiveError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Walk(#[from] walkdir::Error),
    #[error("{0}")]
    Zip(#[from] ZipError),
    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),
}

/// Packs a directory into a deflate-compressed zip.
///
/// Entries are prefixed with the source directory's name and use `/` as
/// separator on every platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }

    fn write(source: &Path, destination: &Path) -> Result<ArchiveSummary, ArchiveError> {
        if !source.is_dir() {
            return Err(ArchiveError::NotADirectory(source.to_path_buf()));
        }
        let root_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = ZipWriter::new(File::create(destination)?);
        let file_options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);
        let dir_options = SimpleFileOptions::default().unix_permissions(0o755);

        let mut entries = 0;
        let walker = WalkDir::new(source)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped(e));
        for entry in walker {
            let entry = entry?;
            let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
            let name = entry_name(&root_name, relative);

            if entry.file_type().is_dir() {
                writer.add_directory(format!("{name}/"), dir_options)?;
            } else if entry.file_type().is_file() {
                writer.start_file(name, file_options)?;
                io::copy(&mut File::open(entry.path())?, &mut writer)?;
            } else {
                continue;
            }
            entries += 1;
        }

        writer.finish()?;
        let bytes = std::fs::metadata(destination)?.len();
        Ok(ArchiveSummary {
            path: destination.to_path_buf(),
            entries,
            bytes,
        })
    }
}

impl Archiver for ZipArchiver {
    #[instrument(skip_all, fields(source = %source.display(), destination = %destination.display()))]
    fn archive(&self, source: &Path, destination: &Path) -> ScaffResult<ArchiveSummary> {
        let summary = Self::write(source, destination).map_err(|e| -> ScaffError {
            ApplicationError::ArchiveFailed {
                path: destination.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })?;
        debug!(entries = summary.entries, bytes = summary.bytes, "Archive finished");
        Ok(summary)
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && SKIPPED_DIRS
            .iter()
            .any(|skip| entry.file_name().eq_ignore_ascii_case(skip))
}

fn entry_name(root: &str, relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .fold(root.to_string(), |mut name, part| {
            name.push('/');
            name.push_str(&part);
            name
        })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use netscaff_core::error::ErrorCategory;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Shop");
        for (path, content) in [
            ("Shop.sln", "sln"),
            ("src/Shop.Api/Program.cs", "app.Run();"),
            ("src/Shop.Api/bin/Debug/Shop.Api.dll", "binary"),
            ("src/Shop.Api/obj/project.assets.json", "{}"),
        ] {
            let file = root.join(path);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, content).unwrap();
        }
        dir
    }

    #[test]
    fn archives_with_root_prefix_and_skips_build_output() {
        let dir = tree();
        let destination = dir.path().join("out").join("Shop.zip");

        let summary = ZipArchiver::new()
            .archive(&dir.path().join("Shop"), &destination)
            .unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&destination).unwrap()).unwrap();
        let names: Vec<String> = archive.file_names().map(String::from).collect();
        assert!(names.contains(&"Shop/Shop.sln".to_string()));
        assert!(names.contains(&"Shop/src/Shop.Api/Program.cs".to_string()));
        assert!(names.iter().all(|n| !n.contains("/bin/") && !n.contains("/obj/")));
        assert_eq!(summary.entries, names.len());
        assert_eq!(summary.bytes, fs::metadata(&destination).unwrap().len());

        let mut program = String::new();
        io::Read::read_to_string(
            &mut archive.by_name("Shop/src/Shop.Api/Program.cs").unwrap(),
            &mut program,
        )
        .unwrap();
        assert_eq!(program, "app.Run();");
    }

    #[test]
    fn missing_source_is_an_archive_failure() {
        let dir = tempfile::tempdir().unwrap();

        let err = ZipArchiver::new()
            .archive(&dir.path().join("nope"), &dir.path().join("x.zip"))
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.user_message().contains("is not a directory"));
    }

    #[test]
    fn entry_names_use_forward_slashes() {
        assert_eq!(
            entry_name("Shop", Path::new("src").join("Shop.Api").as_path()),
            "Shop/src/Shop.Api"
        );
        assert_eq!(entry_name("Shop", Path::new("")), "Shop");
    }
}
