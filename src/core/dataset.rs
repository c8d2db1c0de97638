//! Dataset file validation before upload: extension allow-list and size cap.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions the backend can load (compared lowercase).
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "json"];

/// The backend rejects request bodies above 16 MiB.
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// A local dataset that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFile {
    pub path: PathBuf,
    pub name: String,
    /// Lowercase extension, one of [`ALLOWED_EXTENSIONS`].
    pub extension: String,
    pub size: u64,
}

impl DatasetFile {
    /// Content type sent with the multipart upload.
    pub fn mime_type(&self) -> &'static str {
        match self.extension.as_str() {
            "csv" => "text/csv",
            "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "json" => "application/json",
            _ => "application/octet-stream",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("'{name}' is not supported. Please upload a valid CSV, Excel, or JSON file.")]
    UnsupportedType { name: String },
    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),
    #[error("File too large ({size} bytes). Maximum size is 16MB.")]
    TooLarge { size: u64 },
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Text after the last `.`, lowercased. `None` when the name has no dot.
fn extension_of(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

/// Validate a dataset path: allowed extension, regular file, within the size cap.
pub fn inspect(path: &Path) -> Result<DatasetFile, DatasetError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = match extension_of(&name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => ext,
        _ => return Err(DatasetError::UnsupportedType { name }),
    };

    let meta = fs::metadata(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_file() {
        return Err(DatasetError::NotAFile(path.to_path_buf()));
    }
    if meta.len() > MAX_FILE_SIZE {
        return Err(DatasetError::TooLarge { size: meta.len() });
    }

    Ok(DatasetFile {
        path: path.to_path_buf(),
        name,
        extension,
        size: meta.len(),
    })
}

/// Read the dataset bytes for upload.
pub async fn read(file: &DatasetFile) -> Result<Vec<u8>, DatasetError> {
    tokio::fs::read(&file.path)
        .await
        .map_err(|source| DatasetError::Io {
            path: file.path.clone(),
            source,
        })
}
