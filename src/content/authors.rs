//! Static author directory (authors.json)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single author record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Identifier referenced by article front matter
    pub id: String,
    /// Display name
    pub name: String,
    /// Role shown under the name
    #[serde(default)]
    pub position: Option<String>,
    /// Profile link
    #[serde(default)]
    pub url: Option<String>,
    /// Avatar image URL
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Lookup table of authors loaded from a static JSON file
#[derive(Debug, Clone, Default)]
pub struct AuthorDirectory {
    authors: Vec<Author>,
}

impl AuthorDirectory {
    /// Load the directory from a JSON array file.
    /// A missing file yields an empty directory, not an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No author directory at {:?}", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read author directory {:?}", path))?;
        let authors: Vec<Author> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse author directory {:?}", path))?;

        Ok(Self { authors })
    }

    /// Build a directory from records directly
    pub fn from_authors(authors: Vec<Author>) -> Self {
        Self { authors }
    }

    /// Look up a single author by id
    pub fn get(&self, id: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.id == id)
    }

    /// Resolve a list of ids to author records, logging unknown ids
    pub fn resolve(&self, ids: &[String]) -> Vec<&Author> {
        ids.iter()
            .filter_map(|id| {
                let found = self.get(id);
                if found.is_none() {
                    tracing::warn!("Unknown author id '{}'", id);
                }
                found
            })
            .collect()
    }

    /// All authors
    pub fn all(&self) -> &[Author] {
        &self.authors
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}
