#![deny(clippy::all, clippy::pedantic)]

use std::path::{Path, PathBuf};

use blogdesk::domain::CoverFile;

use crate::client::CliError;

/// A text field given inline or as `--*-file`; the file wins when both are set.
pub async fn read_text(
    inline: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, CliError> {
    let Some(path) = file else {
        return Ok(inline);
    };
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(text))
}

/// Load an image from disk; the content type is guessed from the extension.
pub async fn read_cover(path: &Path) -> Result<CoverFile, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::InvalidInput(format!("{} is not a file", path.display())))?;
    Ok(CoverFile::from_bytes(file_name, bytes)?)
}
