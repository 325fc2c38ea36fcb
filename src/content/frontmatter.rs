//! Front matter parsing

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front matter data from an article file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub updated: Option<String>,
    /// Author ids; a single string, a comma separated string, or a list
    #[serde(deserialize_with = "string_or_vec", default)]
    pub author: Vec<String>,
    pub author_url: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    /// Thumbnail image file under the blog images root
    pub thumb: Option<String>,
    /// Social/hero image file, falls back to `thumb` when unset
    pub image: Option<String>,
    /// External video URL for video articles
    pub video: Option<String>,
    /// Per-article table of contents depth override
    pub toc_depth: Option<usize>,
    /// Articles are published unless the front matter says otherwise
    #[serde(default = "default_published")]
    pub published: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

fn default_published() -> bool {
    true
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            date: None,
            updated: None,
            author: Vec::new(),
            author_url: None,
            tags: Vec::new(),
            thumb: None,
            image: None,
            video: None,
            toc_depth: None,
            published: true,
            extra: HashMap::new(),
        }
    }
}

impl FrontMatter {
    /// Parse front matter from an article's raw content.
    /// Returns (front_matter, body).
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // No front matter block, the whole file is body
        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as body only
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let body = &rest[end_pos + 4..];
        let body = body.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        // A `---` pair may also be a markdown thematic break. Only treat the
        // block as front matter if at least one line looks like `key: value`.
        if !looks_like_yaml(yaml_content) {
            return Ok((FrontMatter::default(), content));
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => Ok((fm, body)),
            Err(e) => {
                tracing::warn!("Failed to parse front matter, treating as body: {}", e);
                Ok((FrontMatter::default(), content))
            }
        }
    }

    /// Author ids, with comma separated entries split apart
    pub fn author_ids(&self) -> Vec<String> {
        self.author
            .iter()
            .flat_map(|a| a.split(','))
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect()
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_ref().and_then(|s| parse_date_string(s))
    }

    /// Parse the updated date string into a DateTime
    pub fn parse_updated(&self) -> Option<DateTime<Local>> {
        self.updated.as_ref().and_then(|s| parse_date_string(s))
    }
}

/// Check for at least one `key: value` line; keys are simple identifiers and
/// URL schemes do not count.
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        if !is_valid_key {
            return false;
        }
        let after = &trimmed[colon_pos + 1..];
        after.is_empty() || after.starts_with(' ')
    })
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        // Front matter dates are local wall-clock times
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&dt).earliest();
        }
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Local.from_local_datetime(&dt).earliest();
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_article_frontmatter() {
        let content = r#"---
title: Launching the new dashboard
description: A faster way to look at your data
date: 2024-01-15
author: jane
tags:
  - product
  - launch
thumb: dashboard/cover.png
---

The body starts here.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Launching the new dashboard".to_string()));
        assert_eq!(
            fm.description,
            Some("A faster way to look at your data".to_string())
        );
        assert_eq!(fm.author, vec!["jane"]);
        assert_eq!(fm.tags, vec!["product", "launch"]);
        assert_eq!(fm.thumb, Some("dashboard/cover.png".to_string()));
        assert!(fm.published);
        assert!(body.contains("The body starts here."));
    }

    #[test]
    fn test_comma_separated_authors() {
        let content = r#"---
title: Pairing post
author: jane, john
---
Body.
"#;
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.author_ids(), vec!["jane", "john"]);
    }

    #[test]
    fn test_author_list() {
        let content = r#"---
title: Team post
author:
  - jane
  - john
---
Body.
"#;
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.author_ids(), vec!["jane", "john"]);
    }

    #[test]
    fn test_toc_depth_override() {
        let content = r#"---
title: Deep dive
toc_depth: 3
---
Body.
"#;
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.toc_depth, Some(3));
    }

    #[test]
    fn test_single_string_tag() {
        let content = r#"---
title: One tag
tags: postgres
---
Body.
"#;
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["postgres"]);
    }

    #[test]
    fn test_parse_date() {
        let fm = FrontMatter {
            date: Some("2024-01-15 10:30:00".to_string()),
            ..Default::default()
        };

        let dt = fm.parse_date().unwrap();
        assert_eq!(
            dt.format("%Y-%m-%d %H:%M").to_string(),
            "2024-01-15 10:30"
        );
    }

    #[test]
    fn test_date_only_keeps_wall_clock_day() {
        // A bare date must stay on its calendar day in every timezone
        let fm = FrontMatter {
            date: Some("2024-01-15".to_string()),
            ..Default::default()
        };

        let dt = fm.parse_date().unwrap();
        assert_eq!(
            dt.format("%Y-%m-%d %H:%M").to_string(),
            "2024-01-15 00:00"
        );
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just a body with no header.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(body.contains("Just a body"));
    }

    #[test]
    fn test_thematic_break_not_frontmatter() {
        // A markdown separator pair with prose between is not front matter
        let content = r#"
---

Some text, with a URL https://example.com/path in it.

---
More content.
"#;
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(body.contains("Some text"));
    }

    #[test]
    fn test_unpublished() {
        let content = r#"---
title: Draft
published: false
---
Body.
"#;
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(!fm.published);
    }
}
