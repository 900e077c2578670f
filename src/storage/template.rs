//! Saved search templates
//!
//! A template is a YAML file of one or more documents, each describing one
//! search:
//!
//! ```yaml
//! title: Bounced tickets
//! description: Left review without being finished
//! search:
//!   tag: Backend
//!   column: from:Review:backward
//!   show-metadata: true
//! ---
//! title: Escalations
//! search:
//!   priority: raised
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse template {path}, document {document}: {source}")]
    Parse {
        path: PathBuf,
        document: usize,
        source: serde_yaml::Error,
    },

    #[error("Template {path} contains no documents")]
    Empty { path: PathBuf },
}

/// Search parameters of one template document
///
/// Keys follow the command-line flag names.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct TemplateSearch {
    #[serde(rename = "text_query")]
    pub text_query: Option<String>,
    pub tag: Option<String>,
    pub created_after: Option<u32>,
    pub updated_after: Option<u32>,
    pub column: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub show_history: bool,
    pub show_metadata: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Document {
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    search: TemplateSearch,
}

/// One search loaded from a template
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTemplate {
    pub title: String,
    pub description: Option<String>,
    pub search: TemplateSearch,
}

impl SearchTemplate {
    /// Loads every document of a template file, in file order
    pub fn load(path: &Path) -> Result<Vec<Self>, TemplateError> {
        let content = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Vec<Self>, TemplateError> {
        if content.trim().is_empty() {
            return Err(TemplateError::Empty {
                path: path.to_path_buf(),
            });
        }

        let mut templates = Vec::new();
        for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
            let number = index + 1;
            let document = Document::deserialize(document).map_err(|source| TemplateError::Parse {
                path: path.to_path_buf(),
                document: number,
                source,
            })?;
            templates.push(Self {
                title: document.title.unwrap_or_else(|| format!("Search {}", number)),
                description: document.description,
                search: document.search,
            });
        }

        if templates.is_empty() {
            return Err(TemplateError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(templates)
    }
}
