//! Writing templates and generated files into a project

use super::source::{TemplateKey, TemplateSource};
use crate::error::TemplateError;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Pure text substitution applied before a template is written
pub type Transform<'a> = &'a (dyn Fn(&str) -> String + Send + Sync);

/// In-place edit of an existing file; `None` when its anchor text is missing
pub type Edit<'a> = &'a (dyn Fn(&str) -> Option<String> + Send + Sync);

/// Copies templates from a [`TemplateSource`] into a project
#[derive(Debug, Clone, Default)]
pub struct TemplateInstaller {
    source: TemplateSource,
}

impl TemplateInstaller {
    pub fn new(source: TemplateSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Write a template to `destination`, overwriting whatever is there
    pub async fn install(
        &self,
        key: TemplateKey,
        destination: &Path,
        transform: Option<Transform<'_>>,
    ) -> Result<(), TemplateError> {
        let bytes = self.source.read(key).await?;
        debug!(template = %key, dest = %destination.display(), "installing template");

        match transform {
            Some(transform) => {
                let text = String::from_utf8(bytes).map_err(|_| TemplateError::NotUtf8(key))?;
                self.write_text(destination, &transform(&text)).await
            }
            None => write_bytes(destination, &bytes).await,
        }
    }

    /// Write generated text, creating parent directories
    pub async fn write_text(&self, destination: &Path, text: &str) -> Result<(), TemplateError> {
        write_bytes(destination, text.as_bytes()).await
    }

    /// Edit a file already in the project in place.
    ///
    /// Fails with [`TemplateError::AnchorNotFound`] when `edit` cannot find
    /// `anchor`; the file is left untouched in that case.
    pub async fn rewrite(&self, path: &Path, anchor: &str, edit: Edit<'_>) -> Result<(), TemplateError> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|source| TemplateError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let edited = edit(&text).ok_or_else(|| TemplateError::AnchorNotFound {
            path: path.to_path_buf(),
            anchor: anchor.to_string(),
        })?;
        write_bytes(path, edited.as_bytes()).await
    }
}

async fn write_bytes(destination: &Path, bytes: &[u8]) -> Result<(), TemplateError> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| TemplateError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    fs::write(destination, bytes)
        .await
        .map_err(|source| TemplateError::Io {
            path: destination.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_install_creates_parents_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested/deeper/.gitignore");
        let installer = TemplateInstaller::default();

        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
        std::fs::write(&dest, "stale content that is much longer than the template").unwrap();

        installer
            .install(TemplateKey::Gitignore, &dest, None)
            .await
            .unwrap();
        installer
            .install(TemplateKey::Gitignore, &dest, None)
            .await
            .unwrap();

        let written = std::fs::read_to_string(&dest).unwrap();
        let expected = installer.source().read(TemplateKey::Gitignore).await.unwrap();
        assert_eq!(written.as_bytes(), expected.as_slice());
    }

    #[tokio::test]
    async fn test_install_applies_transform() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("tsconfig.json");
        let installer = TemplateInstaller::default();
        let rename_out_dir = |text: &str| text.replace("dist", "build");

        installer
            .install(TemplateKey::Tsconfig, &dest, Some(&rename_out_dir as Transform<'_>))
            .await
            .unwrap();

        let written = std::fs::read_to_string(&dest).unwrap();
        assert!(written.contains("\"outDir\": \"build\""));
        assert!(!written.contains("dist"));
    }

    #[tokio::test]
    async fn test_rewrite_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tailwind.config.js");
        std::fs::write(&path, "export default { content: [] }").unwrap();

        TemplateInstaller::default()
            .rewrite(&path, "[]", &|text: &str| {
                text.contains("[]").then(|| text.replace("[]", "[\"./src\"]"))
            })
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "export default { content: [\"./src\"] }"
        );
    }

    #[tokio::test]
    async fn test_rewrite_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = TemplateInstaller::default()
            .rewrite(&dir.path().join("missing.js"), "", &|t: &str| Some(t.to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, TemplateError::Io { .. }));
    }

    #[tokio::test]
    async fn test_rewrite_without_anchor_fails_and_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tailwind.config.js");
        std::fs::write(&path, "export default {}").unwrap();

        let err = TemplateInstaller::default()
            .rewrite(&path, "content: []", &|_: &str| None)
            .await
            .unwrap_err();

        assert!(matches!(err, TemplateError::AnchorNotFound { ref anchor, .. } if anchor == "content: []"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "export default {}");
    }
}
