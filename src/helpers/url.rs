//! URL helpers

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a URL path (space, quotes, angle brackets, hash)
const PATH_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'#');

/// Generate a URL with the root path prepended
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Absolute URL for an image file under the blog images root
pub fn blog_image_url(config: &SiteConfig, file: &str) -> String {
    let encoded = utf8_percent_encode(file.trim_start_matches('/'), PATH_UNSAFE);
    let path = format!("{}/{}", config.blog_images_root.trim_matches('/'), encoded);
    full_url_for(config, &path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://acme.dev".to_string(),
            root: "/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/style.css"), "/css/style.css");
        assert_eq!(url_for(&config, "blog/"), "/blog/");
        assert_eq!(url_for(&config, ""), "/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/blog/hello/"),
            "https://acme.dev/blog/hello/"
        );
    }

    #[test]
    fn test_blog_image_url() {
        let config = test_config();
        assert_eq!(
            blog_image_url(&config, "launch/cover.png"),
            "https://acme.dev/images/blog/launch/cover.png"
        );
    }

    #[test]
    fn test_blog_image_url_encodes_spaces() {
        let config = test_config();
        assert_eq!(
            blog_image_url(&config, "launch/cover image.png"),
            "https://acme.dev/images/blog/launch/cover%20image.png"
        );
    }
}
