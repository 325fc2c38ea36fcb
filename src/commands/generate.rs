//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::time::Duration;

use crate::content::ArticleLoader;
use crate::generator::Generator;
use crate::Site;

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ArticleLoader::new(site);
    let articles = loader.load_articles()?;

    tracing::info!("Loaded {} articles", articles.len());

    let generator = Generator::new(site)?;
    generator.generate(&articles)?;

    tracing::info!("Generated in {:?}", start.elapsed());
    Ok(())
}

/// Watch the content tree and regenerate on changes
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if site.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.content_dir, RecursiveMode::Recursive)?;
    }

    println!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                if events.is_empty() {
                    continue;
                }
                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }
                match run(site) {
                    Ok(_) => println!("Regenerated successfully!"),
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}
