//! Scan robots.txt for sitemap directives.

/// Extract every `Sitemap:` directive value from robots.txt content,
/// in file order.
///
/// Directive keys are matched case-insensitively; values are trimmed.
/// Comments and blank lines are skipped.
pub fn sitemap_directives(content: &str) -> Vec<String> {
    let mut sitemaps = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            if key.trim().eq_ignore_ascii_case("sitemap") {
                let value = value.trim();
                if !value.is_empty() {
                    sitemaps.push(value.to_string());
                }
            }
        }
    }

    sitemaps
}
