//! Article loader - loads articles from the content directory

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{Article, ArticleSummary, FrontMatter, MarkdownRenderer};
use crate::helpers::reading_time;
use crate::Site;

/// Loads articles from the site's articles directory
pub struct ArticleLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ArticleLoader<'a> {
    /// Create a new article loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &site.config.highlight.theme,
            site.config.highlight.line_number,
        );
        Self { site, renderer }
    }

    /// Load all articles, newest first.
    ///
    /// Unpublished articles are dropped unless draft rendering is enabled;
    /// files that fail to parse are logged and skipped, so a bad article
    /// never takes the whole build down.
    pub fn load_articles(&self) -> Result<Vec<Article>> {
        let articles_dir = self.site.articles_dir();
        if !articles_dir.exists() {
            return Ok(Vec::new());
        }

        let mut articles = Vec::new();

        for entry in WalkDir::new(&articles_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_article(path) {
                    Ok(article) => {
                        if article.published || self.site.config.render_drafts {
                            articles.push(article);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load article {:?}: {}", path, e);
                    }
                }
            }
        }

        // Newest first
        articles.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(articles)
    }

    /// Resolve a single article by slug
    pub fn load_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let articles = self.load_articles()?;
        Ok(articles.into_iter().find(|a| a.slug == slug))
    }

    /// Load a single article from a file
    fn load_article(&self, path: &Path) -> Result<Article> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let metadata = fs::metadata(path)?;
        let file_modified = metadata
            .modified()
            .ok()
            .map(chrono::DateTime::<Local>::from);

        let date = fm
            .parse_date()
            .unwrap_or_else(|| file_modified.unwrap_or_else(Local::now));
        let updated = fm.parse_updated().or(file_modified);

        // The slug is the file name, which also names the URL; titles can
        // change without breaking links
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let title = fm.title.clone().unwrap_or_else(|| slug.clone());

        let source = path
            .strip_prefix(self.site.articles_dir())
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let article_path = self.article_path(&slug);
        let permalink = format!(
            "{}{}",
            self.site.config.url.trim_end_matches('/'),
            article_path
        );

        let content_html = self.renderer.render(body)?;
        let minutes = reading_time(body, self.site.config.words_per_minute);
        let authors = fm.author_ids();

        Ok(Article {
            slug,
            title,
            description: fm.description,
            date,
            updated,
            authors,
            author_url: fm.author_url,
            tags: fm.tags,
            thumb: fm.thumb,
            image: fm.image,
            video: fm.video,
            toc_depth: fm.toc_depth,
            raw: body.to_string(),
            content: content_html,
            source,
            full_source: path.to_path_buf(),
            path: article_path,
            permalink,
            published: fm.published,
            reading_time: minutes,
            extra: fm.extra,
        })
    }

    /// URL path for an article (`<root><blog_root>/<slug>/`)
    fn article_path(&self, slug: &str) -> String {
        format!(
            "{}{}/{}/",
            self.site.config.root,
            self.site.config.blog_root.trim_matches('/'),
            slug
        )
    }
}

/// Sorted-articles provider: newest-first summaries, optionally filtered by
/// tag overlap and capped at `limit`.
pub fn sorted_summaries(
    articles: &[Article],
    tags: Option<&[String]>,
    limit: Option<usize>,
) -> Vec<ArticleSummary> {
    articles
        .iter()
        .filter(|a| match tags {
            Some(tags) => a.tags.iter().any(|t| tags.contains(t)),
            None => true,
        })
        .take(limit.unwrap_or(usize::MAX))
        .map(|a| a.summary())
        .collect()
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown" || e == "mdx")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::path::PathBuf;

    fn temp_site(dir: &Path) -> Site {
        let config = SiteConfig {
            url: "https://acme.dev".to_string(),
            ..Default::default()
        };
        Site {
            content_dir: dir.join(&config.content_dir),
            public_dir: dir.join(&config.public_dir),
            base_dir: dir.to_path_buf(),
            config,
        }
    }

    fn write_article(site: &Site, name: &str, body: &str) -> PathBuf {
        let dir = site.articles_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_and_sort() {
        let tmp = tempfile::tempdir().unwrap();
        let site = temp_site(tmp.path());

        write_article(
            &site,
            "older-post.md",
            "---\ntitle: Older\ndate: 2024-01-01\n---\nBody.\n",
        );
        write_article(
            &site,
            "newer-post.md",
            "---\ntitle: Newer\ndate: 2024-02-01\n---\nBody.\n",
        );

        let loader = ArticleLoader::new(&site);
        let articles = loader.load_articles().unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].slug, "newer-post");
        assert_eq!(articles[1].slug, "older-post");
        assert_eq!(articles[0].path, "/blog/newer-post/");
        assert_eq!(
            articles[0].permalink,
            "https://acme.dev/blog/newer-post/"
        );
    }

    #[test]
    fn test_author_ids_carried_onto_article() {
        let tmp = tempfile::tempdir().unwrap();
        let site = temp_site(tmp.path());

        write_article(
            &site,
            "pair.md",
            "---\ntitle: Pairing\nauthor: jane, john\n---\nBody.\n",
        );

        let loader = ArticleLoader::new(&site);
        let articles = loader.load_articles().unwrap();
        assert_eq!(articles[0].authors, vec!["jane", "john"]);
    }

    #[test]
    fn test_unpublished_excluded() {
        let tmp = tempfile::tempdir().unwrap();
        let site = temp_site(tmp.path());

        write_article(
            &site,
            "draft.md",
            "---\ntitle: Draft\npublished: false\n---\nBody.\n",
        );
        write_article(&site, "live.md", "---\ntitle: Live\n---\nBody.\n");

        let loader = ArticleLoader::new(&site);
        let articles = loader.load_articles().unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].slug, "live");
    }

    #[test]
    fn test_load_by_slug() {
        let tmp = tempfile::tempdir().unwrap();
        let site = temp_site(tmp.path());

        write_article(&site, "hello.md", "---\ntitle: Hello\n---\nBody.\n");

        let loader = ArticleLoader::new(&site);
        let found = loader.load_by_slug("hello").unwrap();
        assert_eq!(found.unwrap().title, "Hello");

        let missing = loader.load_by_slug("nope").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_sorted_summaries_tag_filter_and_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let site = temp_site(tmp.path());

        write_article(
            &site,
            "a.md",
            "---\ntitle: A\ndate: 2024-03-03\ntags: [db]\n---\nBody.\n",
        );
        write_article(
            &site,
            "b.md",
            "---\ntitle: B\ndate: 2024-03-02\ntags: [db, auth]\n---\nBody.\n",
        );
        write_article(
            &site,
            "c.md",
            "---\ntitle: C\ndate: 2024-03-01\ntags: [auth]\n---\nBody.\n",
        );

        let loader = ArticleLoader::new(&site);
        let articles = loader.load_articles().unwrap();

        let all = sorted_summaries(&articles, None, None);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].slug, "a");

        let db = sorted_summaries(&articles, Some(&["db".to_string()]), None);
        assert_eq!(db.len(), 2);

        let capped = sorted_summaries(&articles, None, Some(2));
        assert_eq!(capped.len(), 2);
    }
}
