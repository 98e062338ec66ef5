//! Resolve the canonical sitemap URL for a domain.

use crate::acquisition::http_client::Fetch;
use crate::discovery::robots::sitemap_directives;
use tracing::warn;
use url::Url;

/// Conventional sitemap locations probed when robots.txt has no directive.
const FALLBACK_PATHS: &[&str] = &["/sitemap.xml", "/sitemap"];

/// Resolve the sitemap URL for a domain.
///
/// Checks robots.txt first; a `Sitemap:` directive wins. Otherwise probes
/// conventional paths in order and returns the first one that fetches.
/// Returns `None` when the domain has no reachable sitemap.
///
/// robots.txt may list several sitemaps; only the first is used.
pub async fn resolve_sitemap_url(fetcher: &dyn Fetch, domain: &str) -> Option<String> {
    let base = match Url::parse(domain) {
        Ok(url) => url,
        Err(e) => {
            warn!("invalid domain {domain}: {e}");
            return None;
        }
    };

    let robots_url = base.join("/robots.txt").ok()?;
    if let Some(content) = fetcher.fetch(robots_url.as_str()).await {
        if let Some(first) = sitemap_directives(&content).into_iter().next() {
            return Some(first);
        }
    }

    for path in FALLBACK_PATHS {
        let candidate = base.join(path).ok()?;
        if fetcher.fetch(candidate.as_str()).await.is_some() {
            return Some(candidate.into());
        }
    }

    None
}
