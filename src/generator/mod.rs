//! Generator module - renders article and index pages to the public directory

use anyhow::Result;
use std::fs;
use walkdir::WalkDir;

use tera::Context;

use crate::content::{Article, AuthorDirectory};
use crate::helpers::{extract_toc, format_date, reading_time_label, render_toc};
use crate::seo::ArticleSeo;
use crate::templates::{
    ArticleData, AuthorCard, ConfigData, NavCard, PaginationData, RelatedEntry, TemplateRenderer,
    STYLESHEET,
};
use crate::Site;

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    authors: AuthorDirectory,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let authors = AuthorDirectory::load(site.authors_file())?;

        Ok(Self {
            site: site.clone(),
            renderer,
            authors,
        })
    }

    /// Generate the entire site from a newest-first article list
    pub fn generate(&self, articles: &[Article]) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        self.write_stylesheet()?;
        self.copy_content_assets()?;

        let config_data = self.build_config_data();

        self.generate_index_pages(articles, &config_data)?;
        self.generate_article_pages(articles, &config_data)?;
        self.generate_root_redirect()?;
        self.generate_atom_feed(articles)?;

        Ok(())
    }

    fn build_config_data(&self) -> ConfigData {
        ConfigData {
            title: self.site.config.title.clone(),
            description: self.site.config.description.clone(),
            url: self.site.config.url.clone(),
            root: self.site.config.root.clone(),
            blog_root: self.site.config.blog_root.trim_matches('/').to_string(),
            language: self.site.config.language.clone(),
        }
    }

    fn article_data(&self, article: &Article) -> ArticleData {
        let thumb_url = article
            .thumb
            .as_deref()
            .map(|file| crate::helpers::blog_image_url(&self.site.config, file));

        ArticleData {
            slug: article.slug.clone(),
            title: article.title.clone(),
            description: article.description.clone().unwrap_or_default(),
            date: format_date(&article.date, &self.site.config.date_format),
            reading_time: reading_time_label(article.reading_time),
            tags: article.tags.clone(),
            content: article.content.clone(),
            path: article.path.clone(),
            thumb_url,
            video: article.video.clone(),
        }
    }

    /// Generate the paginated blog index under `<blog_root>/`
    fn generate_index_pages(&self, articles: &[Article], config_data: &ConfigData) -> Result<()> {
        let per_page = self.site.config.per_page.max(1);
        let total_pages = articles.len().div_ceil(per_page).max(1);
        let blog_root = self.site.config.blog_root.trim_matches('/').to_string();

        let page_url = |n: usize| -> String {
            if n == 1 {
                format!("{}{}/", self.site.config.root, blog_root)
            } else {
                format!("{}{}/page/{}/", self.site.config.root, blog_root, n)
            }
        };

        for page_num in 1..=total_pages {
            let start = (page_num - 1) * per_page;
            let end = (start + per_page).min(articles.len());
            let page_articles: Vec<ArticleData> = articles[start..end]
                .iter()
                .map(|a| self.article_data(a))
                .collect();

            let pagination = PaginationData {
                total: total_pages,
                current: page_num,
                prev_link: if page_num > 1 {
                    page_url(page_num - 1)
                } else {
                    String::new()
                },
                next_link: if page_num < total_pages {
                    page_url(page_num + 1)
                } else {
                    String::new()
                },
            };

            let mut context = Context::new();
            context.insert("config", config_data);
            context.insert("seo_head", &self.index_head());
            context.insert("page_articles", &page_articles);
            context.insert("pagination", &pagination);

            let html = self.renderer.render("index.html", &context)?;

            let output_path = if page_num == 1 {
                self.site.public_dir.join(&blog_root).join("index.html")
            } else {
                self.site
                    .public_dir
                    .join(&blog_root)
                    .join(format!("page/{}/index.html", page_num))
            };

            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
            tracing::debug!("Generated: {:?}", output_path);
        }

        Ok(())
    }

    /// Head block for index pages
    fn index_head(&self) -> String {
        let mut head = format!(
            "<title>{}</title>\n",
            escape_xml(&self.site.config.title)
        );
        if !self.site.config.description.is_empty() {
            head.push_str(&format!(
                "<meta name=\"description\" content=\"{}\">\n",
                escape_xml(&self.site.config.description)
            ));
        }
        head
    }

    /// Generate one page per article
    fn generate_article_pages(&self, articles: &[Article], config_data: &ConfigData) -> Result<()> {
        for article in articles {
            let html = self.render_article_page(article, articles, config_data)?;

            let clean_path = article.path.trim_start_matches('/');
            let output_path = self.site.public_dir.join(clean_path).join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
            tracing::debug!("Generated article: {:?}", output_path);
        }

        tracing::info!("Generated {} article pages", articles.len());
        Ok(())
    }

    /// Render a single article page
    pub fn render_article_page(
        &self,
        article: &Article,
        articles: &[Article],
        config_data: &ConfigData,
    ) -> Result<String> {
        let resolved_authors = self.authors.resolve(&article.authors);

        let author_cards: Vec<AuthorCard> = resolved_authors
            .iter()
            .map(|a| AuthorCard {
                name: a.name.clone(),
                position: a.position.clone().unwrap_or_default(),
                url: a.url.clone(),
                avatar: a.avatar.clone(),
            })
            .collect();

        let seo = ArticleSeo::for_article(&self.site.config, article, &resolved_authors);

        // Per-article depth override, site default otherwise
        let depth = article.toc_depth.unwrap_or(self.site.config.toc_max_depth);
        let toc_html = render_toc(&extract_toc(&article.raw, depth));

        let related: Vec<RelatedEntry> = article
            .related(articles, self.site.config.related_limit)
            .into_iter()
            .map(|a| RelatedEntry {
                title: a.title.clone(),
                path: a.path.clone(),
            })
            .collect();

        let mut context = Context::new();
        context.insert("config", config_data);
        context.insert("seo_head", &seo.meta_tags());
        context.insert("article", &self.article_data(article));
        context.insert("authors", &author_cards);
        context.insert("toc", &toc_html);
        context.insert("show_toc", &!toc_html.is_empty());
        context.insert("related", &related);

        if let Some(prev) = article.prev(articles) {
            context.insert(
                "prev_article",
                &NavCard {
                    title: prev.title.clone(),
                    date: prev.date.format("%Y-%m-%d").to_string(),
                    path: prev.path.clone(),
                },
            );
        }
        if let Some(next) = article.next(articles) {
            context.insert(
                "next_article",
                &NavCard {
                    title: next.title.clone(),
                    date: next.date.format("%Y-%m-%d").to_string(),
                    path: next.path.clone(),
                },
            );
        }

        self.renderer.render("article.html", &context)
    }

    /// Root index.html redirecting to the blog index
    fn generate_root_redirect(&self) -> Result<()> {
        let target = format!(
            "{}{}/",
            self.site.config.root,
            self.site.config.blog_root.trim_matches('/')
        );
        let html = format!(
            "<!DOCTYPE html>\n<html><head><meta http-equiv=\"refresh\" content=\"0; url={0}\"><link rel=\"canonical\" href=\"{0}\"></head><body></body></html>\n",
            target
        );
        fs::write(self.site.public_dir.join("index.html"), html)?;
        Ok(())
    }

    /// Generate an Atom feed of the newest articles
    fn generate_atom_feed(&self, articles: &[Article]) -> Result<()> {
        let url = self.site.config.url.trim_end_matches('/');

        let mut feed = String::new();
        feed.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
        feed.push_str(&format!(
            "  <title>{}</title>\n",
            escape_xml(&self.site.config.title)
        ));
        feed.push_str(&format!("  <link href=\"{}/atom.xml\" rel=\"self\"/>\n", url));
        feed.push_str(&format!("  <link href=\"{}/\"/>\n", url));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            articles
                .first()
                .map(|a| a.date.to_rfc3339())
                .unwrap_or_else(|| chrono::Local::now().to_rfc3339())
        ));
        feed.push_str(&format!("  <id>{}/</id>\n", url));

        for article in articles.iter().take(20) {
            let summary = article
                .description
                .clone()
                .unwrap_or_else(|| truncate_plain(&article.content, 280));

            feed.push_str("  <entry>\n");
            feed.push_str(&format!(
                "    <title>{}</title>\n",
                escape_xml(&article.title)
            ));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", article.permalink));
            feed.push_str(&format!("    <id>{}</id>\n", article.permalink));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                article.date.to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <updated>{}</updated>\n",
                article.updated.unwrap_or(article.date).to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <summary>{}</summary>\n",
                escape_xml(&summary)
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        fs::write(self.site.public_dir.join("atom.xml"), feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    fn write_stylesheet(&self) -> Result<()> {
        let css_dir = self.site.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("style.css"), STYLESHEET)?;
        Ok(())
    }

    /// Copy non-markdown assets (images, attachments) into the output
    fn copy_content_assets(&self) -> Result<()> {
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(content_dir)?;

            // Article sources are rendered, not copied, and underscore
            // directories are content-internal
            let first = relative
                .components()
                .next()
                .and_then(|c| c.as_os_str().to_str());
            if matches!(first, Some(f) if f.starts_with('_')) {
                continue;
            }
            if matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("md") | Some("markdown") | Some("mdx")
            ) {
                continue;
            }

            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
        }

        Ok(())
    }
}

/// Strip HTML tags and truncate for feed summaries
fn truncate_plain(html: &str, max_chars: usize) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    // The body is entity-encoded HTML; decode so the feed writer does not
    // double-encode. `&amp;` goes last.
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= max_chars {
        text
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}…", truncated.trim_end())
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
