//! Template lookup: bundled in the binary or read from a local directory

use crate::error::TemplateError;
use std::fmt;
use std::path::PathBuf;
use tokio::fs;

/// The fixed set of static templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    Tsconfig,
    EslintJs,
    EslintTs,
    Prettier,
    Gitignore,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 5] = [
        TemplateKey::Tsconfig,
        TemplateKey::EslintJs,
        TemplateKey::EslintTs,
        TemplateKey::Prettier,
        TemplateKey::Gitignore,
    ];

    /// Stable identifier, also the file name inside a template directory
    pub fn id(&self) -> &'static str {
        match self {
            TemplateKey::Tsconfig => "tsconfig",
            TemplateKey::EslintJs => "eslint-js",
            TemplateKey::EslintTs => "eslint-ts",
            TemplateKey::Prettier => "prettier",
            TemplateKey::Gitignore => "gitignore",
        }
    }

    /// Where the template lands inside a project
    pub fn destination(&self) -> &'static str {
        match self {
            TemplateKey::Tsconfig => "tsconfig.json",
            TemplateKey::EslintJs | TemplateKey::EslintTs => ".eslintrc.json",
            TemplateKey::Prettier => ".prettierrc.json",
            TemplateKey::Gitignore => ".gitignore",
        }
    }

    fn bundled(&self) -> &'static str {
        match self {
            TemplateKey::Tsconfig => include_str!("../../templates/tsconfig"),
            TemplateKey::EslintJs => include_str!("../../templates/eslint-js"),
            TemplateKey::EslintTs => include_str!("../../templates/eslint-ts"),
            TemplateKey::Prettier => include_str!("../../templates/prettier"),
            TemplateKey::Gitignore => include_str!("../../templates/gitignore"),
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Template source - compiled into the binary or a local directory
#[derive(Debug, Clone, Default)]
pub enum TemplateSource {
    #[default]
    Bundled,
    Local(PathBuf),
}

impl TemplateSource {
    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }

    /// Pick the source from an explicit directory, then an environment
    /// variable, falling back to the bundled templates
    pub fn resolve(template_dir: Option<PathBuf>, env_var: &str) -> Self {
        template_dir
            .or_else(|| std::env::var_os(env_var).map(PathBuf::from))
            .map(Self::Local)
            .unwrap_or_default()
    }

    /// Read a template's bytes
    pub async fn read(&self, key: TemplateKey) -> Result<Vec<u8>, TemplateError> {
        match self {
            TemplateSource::Bundled => Ok(key.bundled().as_bytes().to_vec()),
            TemplateSource::Local(dir) => {
                let path = dir.join(key.id());
                fs::read(&path)
                    .await
                    .map_err(|source| TemplateError::Read { key, path, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bundled_templates_are_present() {
        let source = TemplateSource::Bundled;
        for key in TemplateKey::ALL {
            let bytes = source.read(key).await.unwrap();
            assert!(!bytes.is_empty(), "{} is empty", key);
        }
    }

    #[tokio::test]
    async fn test_bundled_json_templates_parse() {
        let source = TemplateSource::Bundled;
        for key in [
            TemplateKey::Tsconfig,
            TemplateKey::EslintJs,
            TemplateKey::EslintTs,
            TemplateKey::Prettier,
        ] {
            let bytes = source.read(key).await.unwrap();
            serde_json::from_slice::<serde_json::Value>(&bytes)
                .unwrap_or_else(|e| panic!("{} is not JSON: {}", key, e));
        }
    }

    #[tokio::test]
    async fn test_local_source_reads_by_id() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("prettier"), "{\"semi\": false}").unwrap();
        let source = TemplateSource::local(dir.path().to_path_buf());

        let bytes = source.read(TemplateKey::Prettier).await.unwrap();
        assert_eq!(bytes, b"{\"semi\": false}");

        let err = source.read(TemplateKey::Gitignore).await.unwrap_err();
        assert!(matches!(
            err,
            TemplateError::Read {
                key: TemplateKey::Gitignore,
                ..
            }
        ));
    }

    #[test]
    fn test_explicit_dir_wins() {
        let source = TemplateSource::resolve(
            Some(PathBuf::from("/tmp/templates")),
            "STARTER_TEST_UNSET_TEMPLATE_DIR",
        );
        assert!(matches!(source, TemplateSource::Local(p) if p == PathBuf::from("/tmp/templates")));

        let source = TemplateSource::resolve(None, "STARTER_TEST_UNSET_TEMPLATE_DIR");
        assert!(matches!(source, TemplateSource::Bundled));
    }
}
