//! Base64 data-URI images and their storage under the media root.

use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};
use ulid::Ulid;

use crate::{Error, Result};

const EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub extension: String,
    pub data: Vec<u8>,
}

/// Parses `data:image/<ext>;base64,<payload>`. Errors are reported against
/// `field`.
pub fn parse_data_uri(field: &str, value: &str) -> Result<DataUri> {
    let invalid = || Error::field(field, "Upload a valid image as a base64 data URI.");

    let rest = value.strip_prefix("data:image/").ok_or_else(invalid)?;
    let (extension, payload) = rest.split_once(";base64,").ok_or_else(invalid)?;
    let extension = extension.to_lowercase();

    if !EXTENSIONS.contains(&extension.as_str()) {
        return Err(Error::field(
            field,
            format!("Unsupported image type \"{extension}\"."),
        ));
    }

    let data = STANDARD.decode(payload.trim()).map_err(|_| invalid())?;
    if data.is_empty() {
        return Err(Error::field(field, "The submitted image is empty."));
    }

    Ok(DataUri { extension, data })
}

/// Writes images below `root` and hands out the public URLs they are served
/// from.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    url_prefix: String,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn save(&self, folder: &str, image: &DataUri) -> Result<String> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}.{}", Ulid::new().to_string().to_lowercase(), image.extension);
        tokio::fs::write(dir.join(&file_name), &image.data).await?;

        Ok(format!("{}/{folder}/{file_name}", self.url_prefix))
    }

    /// Deletes the file behind a URL previously returned by [`Self::save`].
    /// Unknown URLs and files already gone are ignored.
    pub async fn remove(&self, url: &str) -> Result<()> {
        let Some(relative) = url.strip_prefix(&format!("{}/", self.url_prefix)) else {
            return Ok(());
        };

        if relative.split('/').any(|part| part == "..") {
            return Ok(());
        }

        match tokio::fs::remove_file(self.root.join(relative)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(url, "media file already removed");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
