//! Content loading and rendering

pub mod authors;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod post;

pub use authors::{Author, AuthorDirectory};
pub use frontmatter::FrontMatter;
pub use loader::{sorted_summaries, ArticleLoader};
pub use markdown::MarkdownRenderer;
pub use post::{Article, ArticleSummary};
