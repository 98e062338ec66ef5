//! Walk a sitemap tree, collecting every leaf location.
//!
//! Sitemap graphs are externally controlled and may contain duplicate
//! references or outright cycles, so traversal runs over an explicit
//! worklist with a visited set instead of native recursion: no document
//! is fetched twice within one run, and arbitrarily deep trees cannot
//! overflow the stack.

use crate::acquisition::http_client::Fetch;
use crate::sitemap::parser::{parse_sitemap, SitemapDocument};
use std::collections::HashSet;
use tracing::warn;

/// Expand a sitemap tree into the full list of leaf locations.
///
/// Index children are expanded depth-first in document order; urlset
/// leaves are returned in document order. Unreachable or malformed
/// documents end their branch silently, so one broken branch never aborts
/// the rest of the tree. The visited set is scoped to this call.
pub async fn traverse(fetcher: &dyn Fetch, root_url: &str) -> Vec<String> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut pending: Vec<String> = vec![root_url.to_string()];
    let mut locations: Vec<String> = Vec::new();

    while let Some(url) = pending.pop() {
        if !visited.insert(url.clone()) {
            continue;
        }

        let Some(body) = fetcher.fetch(&url).await else {
            continue;
        };

        match parse_sitemap(&body) {
            Some(SitemapDocument::Index(refs)) => {
                // Pushed in reverse so the stack pops them in document order.
                for child in refs.into_iter().rev() {
                    if !visited.contains(&child) {
                        pending.push(child);
                    }
                }
            }
            Some(SitemapDocument::UrlSet(locs)) => {
                locations.extend(locs);
            }
            Some(SitemapDocument::Other) => {}
            None => {
                warn!("skipping malformed sitemap at {url}");
            }
        }
    }

    locations
}
