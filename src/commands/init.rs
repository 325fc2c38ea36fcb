//! Initialize a new site

use anyhow::{anyhow, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"title: My Blog
description: ""
url: http://example.com
root: /
blog_root: blog

related_limit: 5
toc_max_depth: 2
"#;

const DEFAULT_AUTHORS: &str = r#"[
  {
    "id": "me",
    "name": "Your Name",
    "position": "Author"
  }
]
"#;

const SAMPLE_ARTICLE: &str = r#"---
title: Hello World
description: The first article on this blog
date: 2024-01-01
author: me
tags:
  - welcome
---

## Welcome

This is your first article. Edit or delete it, then run `inkpress generate`.

## Next steps

Add more markdown files to `content/_blog/`.
"#;

/// Scaffold a site in the target directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join(CONFIG_FILE).exists() {
        return Err(anyhow!("Directory already contains an inkpress site"));
    }

    fs::create_dir_all(target_dir)?;
    fs::write(target_dir.join(CONFIG_FILE), DEFAULT_CONFIG)?;
    fs::write(target_dir.join("authors.json"), DEFAULT_AUTHORS)?;

    let articles_dir = target_dir.join("content/_blog");
    fs::create_dir_all(&articles_dir)?;
    fs::write(articles_dir.join("hello-world.md"), SAMPLE_ARTICLE)?;

    fs::create_dir_all(target_dir.join("content/images/blog"))?;

    Ok(())
}
