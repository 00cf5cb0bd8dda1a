//! Answers and their validation into a [`Configuration`]

use crate::error::ValidationError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Source language of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Language {
    #[default]
    #[serde(alias = "javascript", alias = "js")]
    JavaScript,
    #[serde(alias = "typescript", alias = "ts")]
    TypeScript,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
        }
    }

    /// Source file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::TypeScript => "ts",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "typescript" | "ts" => Ok(Language::TypeScript),
            _ => Err(ValidationError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Optional capability that contributes its own steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Addon {
    Tailwind,
    Git,
}

/// Raw answers as collected from prompts, flags, or an answers file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Answers {
    pub project_name: String,

    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub use_tailwind: bool,

    #[serde(default = "default_use_git")]
    pub use_git: bool,
}

fn default_use_git() -> bool {
    true
}

impl Answers {
    /// Load answers from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse answers file {}", path.display()))
    }
}

/// Validated, immutable project configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    project_name: String,
    language: Language,
    addons: BTreeSet<Addon>,
}

/// Characters that are not allowed in a directory name on any supported platform
const ILLEGAL_NAME_CHARS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

/// Device names Windows reserves, with or without an extension
const RESERVED_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

fn is_reserved_device_name(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or(name);
    RESERVED_DEVICE_NAMES
        .iter()
        .any(|reserved| stem.eq_ignore_ascii_case(reserved))
}

impl Configuration {
    /// Validate raw answers
    pub fn resolve(answers: Answers) -> Result<Self, ValidationError> {
        validate_project_name(&answers.project_name)?;

        let mut addons = BTreeSet::new();
        if answers.use_tailwind {
            addons.insert(Addon::Tailwind);
        }
        if answers.use_git {
            addons.insert(Addon::Git);
        }

        Ok(Self {
            project_name: answers.project_name,
            language: answers.language,
            addons,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn addons(&self) -> &BTreeSet<Addon> {
        &self.addons
    }

    pub fn has_addon(&self, addon: Addon) -> bool {
        self.addons.contains(&addon)
    }

    pub fn use_tailwind(&self) -> bool {
        self.has_addon(Addon::Tailwind)
    }

    pub fn use_git(&self) -> bool {
        self.has_addon(Addon::Git)
    }

    /// False only when TypeScript and Tailwind both need a watcher, which
    /// fans dev scripts out into `dev:*` keys
    pub fn single_dev_script(&self) -> bool {
        !(self.language == Language::TypeScript && self.use_tailwind())
    }
}

/// Check that a project name is usable as a single directory component
pub fn validate_project_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.trim() != name {
        return Err(ValidationError::SurroundingWhitespace);
    }
    if name == "." || name == ".." || is_reserved_device_name(name) {
        return Err(ValidationError::ReservedName(name.to_string()));
    }
    if name.ends_with('.') {
        return Err(ValidationError::TrailingDot);
    }
    if let Some(c) = name
        .chars()
        .find(|c| ILLEGAL_NAME_CHARS.contains(c) || c.is_control())
    {
        return Err(ValidationError::IllegalCharacter(c));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(name: &str) -> Answers {
        Answers {
            project_name: name.to_string(),
            language: Language::TypeScript,
            use_tailwind: true,
            use_git: false,
        }
    }

    #[test]
    fn test_resolve_collects_addons() {
        let config = Configuration::resolve(answers("demo")).unwrap();
        assert_eq!(config.project_name(), "demo");
        assert_eq!(config.language(), Language::TypeScript);
        assert!(config.use_tailwind());
        assert!(!config.use_git());
        assert_eq!(config.addons().len(), 1);
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(
            Configuration::resolve(answers("")).unwrap_err(),
            ValidationError::EmptyName
        );
        assert_eq!(
            Configuration::resolve(answers("   ")).unwrap_err(),
            ValidationError::EmptyName
        );
    }

    #[test]
    fn test_illegal_names_rejected() {
        assert_eq!(
            validate_project_name("a/b"),
            Err(ValidationError::IllegalCharacter('/'))
        );
        assert_eq!(
            validate_project_name("a\\b"),
            Err(ValidationError::IllegalCharacter('\\'))
        );
        assert_eq!(
            validate_project_name("what?"),
            Err(ValidationError::IllegalCharacter('?'))
        );
        assert_eq!(
            validate_project_name("tab\there"),
            Err(ValidationError::IllegalCharacter('\t'))
        );
        assert_eq!(
            validate_project_name(".."),
            Err(ValidationError::ReservedName("..".to_string()))
        );
        assert_eq!(
            validate_project_name(" demo"),
            Err(ValidationError::SurroundingWhitespace)
        );
    }

    #[test]
    fn test_windows_reserved_names_rejected() {
        for name in ["CON", "nul", "Com1", "lpt9", "aux.txt", "PRN.tar.gz"] {
            assert_eq!(
                validate_project_name(name),
                Err(ValidationError::ReservedName(name.to_string())),
                "{}",
                name
            );
        }
        assert_eq!(
            validate_project_name("demo."),
            Err(ValidationError::TrailingDot)
        );
        for name in ["console", "nullable", "com10", "my-con", "lpt"] {
            assert!(validate_project_name(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_ordinary_names_accepted() {
        for name in ["demo", "my-app", "my_app.v2", "@scope-less", "Ünïcode"] {
            assert!(validate_project_name(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_parse_language() {
        assert_eq!("ts".parse::<Language>(), Ok(Language::TypeScript));
        assert_eq!("JavaScript".parse::<Language>(), Ok(Language::JavaScript));
        assert!("python".parse::<Language>().is_err());
    }

    #[test]
    fn test_answers_from_yaml_defaults() {
        let answers: Answers = serde_yaml::from_str("project_name: demo\n").unwrap();
        assert_eq!(answers.language, Language::JavaScript);
        assert!(!answers.use_tailwind);
        assert!(answers.use_git);

        let answers: Answers =
            serde_yaml::from_str("project_name: demo\nlanguage: typescript\nuse_git: false\n")
                .unwrap();
        assert_eq!(answers.language, Language::TypeScript);
        assert!(!answers.use_git);
    }
}
