//! Static templates and the installer that writes them into a project
//!
//! This module provides:
//! - The five template keys and where their bytes come from
//! - Installing a template (optionally transformed) at a destination
//! - Writing and rewriting generated files

pub mod installer;
pub mod source;

pub use installer::{Edit, TemplateInstaller, Transform};
pub use source::{TemplateKey, TemplateSource};
