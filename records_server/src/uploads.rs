//! Attachment storage on the local filesystem.
//!
//! Stored values are paths relative to the media root, e.g. `images/id_card.png`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::entity::{FieldKind, FieldSpec, ATTACHMENT_MAX_LENGTH};
use crate::forms::UploadedFile;

const IMAGE_DIR: &str = "images";
const FILE_DIR: &str = "files";
const FALLBACK_NAME: &str = "upload";
/// Longest extension kept on a stored name.
const MAX_EXTENSION_LENGTH: usize = 16;
/// Attempts before giving up on finding a free name.
const MAX_ATTEMPTS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no free name for {0} after {MAX_ATTEMPTS} attempts")]
    Exhausted(String),
}

#[derive(Debug, Clone)]
pub struct AttachmentStore {
    root: PathBuf,
}

impl AttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an upload and return its stored relative path.
    pub async fn save(
        &self,
        field: &FieldSpec,
        file: &UploadedFile,
    ) -> Result<String, UploadError> {
        let dir = if field.kind == FieldKind::Image {
            IMAGE_DIR
        } else {
            FILE_DIR
        };
        let absolute_dir = self.root.join(dir);
        tokio::fs::create_dir_all(&absolute_dir)
            .await
            .map_err(|source| UploadError::Io {
                path: absolute_dir.clone(),
                source,
            })?;

        let name = sanitize(&file.file_name);
        for attempt in 0..MAX_ATTEMPTS {
            let candidate = if attempt == 0 {
                fit(dir, &name, None)
            } else {
                let token = uuid::Uuid::new_v4().simple().to_string();
                fit(dir, &name, Some(&token[..7]))
            };
            let path = self.root.join(&candidate);

            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;
            let mut handle = match opened {
                Ok(handle) => handle,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(UploadError::Io { path, source }),
            };

            handle
                .write_all(&file.bytes)
                .await
                .map_err(|source| UploadError::Io {
                    path: path.clone(),
                    source,
                })?;
            handle
                .flush()
                .await
                .map_err(|source| UploadError::Io {
                    path: path.clone(),
                    source,
                })?;

            tracing::debug!(stored = %candidate, bytes = file.bytes.len(), "Stored attachment");
            return Ok(candidate);
        }

        Err(UploadError::Exhausted(name))
    }

    /// Remove a stored attachment. Failures are logged, not returned.
    pub async fn discard(&self, relative: &str) {
        let path = self.root.join(relative);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove orphaned attachment"
            );
        }
    }
}

/// Reduce a client-supplied name to a safe base name.
fn sanitize(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// `dir/stem[_token].ext`, shortened to stay within the column limit.
fn fit(dir: &str, name: &str, token: Option<&str>) -> String {
    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };
    let suffix = token.map(|t| format!("_{t}")).unwrap_or_default();
    let extension = extension
        .map(|e| format!(".{}", e.chars().take(MAX_EXTENSION_LENGTH).collect::<String>()))
        .unwrap_or_default();

    let fixed = dir.len() + 1 + suffix.len() + extension.len();
    let room = ATTACHMENT_MAX_LENGTH.saturating_sub(fixed).max(1);
    let stem: String = stem.chars().take(room).collect();

    format!("{dir}/{stem}{suffix}{extension}")
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;

    use super::*;
    use crate::entity::EntityKind;

    fn upload(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: None,
            bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\n"),
        }
    }

    #[test]
    fn names_are_sanitized() {
        assert_eq!(sanitize("../../etc/passwd"), "passwd");
        assert_eq!(sanitize("C:\\Users\\ana\\my cv.pdf"), "my_cv.pdf");
        assert_eq!(sanitize(".hidden"), "hidden");
        assert_eq!(sanitize("€€€"), "upload");
    }

    #[test]
    fn long_names_are_shortened() {
        let name = format!("{}.pdf", "a".repeat(200));
        let stored = fit(FILE_DIR, &name, Some("abc1234"));
        assert_eq!(stored.chars().count(), ATTACHMENT_MAX_LENGTH);
        assert!(stored.starts_with("files/aaa"));
        assert!(stored.ends_with("_abc1234.pdf"));
    }

    #[test]
    fn long_extensions_are_capped() {
        let name = format!("x.{}", "e".repeat(98));
        for token in [None, Some("abc1234")] {
            let stored = fit(IMAGE_DIR, &name, token);
            assert!(stored.chars().count() <= ATTACHMENT_MAX_LENGTH, "{stored}");
            assert!(stored.starts_with("images/x"));
            assert!(stored.ends_with(&format!(".{}", "e".repeat(MAX_EXTENSION_LENGTH))));
        }
    }

    #[tokio::test]
    async fn collisions_get_a_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let store = AttachmentStore::new(dir.path());
        let field = EntityKind::Employee.field("id_image").unwrap();

        let first = store.save(field, &upload("id.png")).await.unwrap();
        let second = store.save(field, &upload("id.png")).await.unwrap();

        assert_eq!(first, "images/id.png");
        assert_ne!(first, second);
        assert!(second.starts_with("images/id_"));
        assert!(second.ends_with(".png"));
        assert!(dir.path().join(&second).exists());

        store.discard(&first).await;
        assert!(!dir.path().join(&first).exists());
    }

    #[tokio::test]
    async fn files_land_in_their_own_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = AttachmentStore::new(dir.path());
        let field = EntityKind::Employee.field("cv").unwrap();

        let stored = store.save(field, &upload("cv.pdf")).await.unwrap();
        assert_eq!(stored, "files/cv.pdf");
    }
}
