//! Per-domain crawl pipeline and multi-domain orchestration.

use crate::acquisition::http_client::Fetch;
use crate::discovery::resolver::resolve_sitemap_url;
use crate::dispatch::pool::{DispatchError, Dispatcher};
use crate::sitemap::traverser::traverse;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;

/// Product locations discovered per domain during one run.
pub type CrawlResults = HashMap<String, Vec<String>>;

/// Drives the full per-domain pipeline (resolve, then traverse, then
/// dispatch) for a set of domains.
///
/// Domain crawls are interleaved cooperatively on the calling task; real
/// parallelism happens only inside the dispatcher's worker pool.
pub struct Crawler {
    fetcher: Arc<dyn Fetch>,
    dispatcher: Dispatcher,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetch>, dispatcher: Dispatcher) -> Self {
        Self {
            fetcher,
            dispatcher,
        }
    }

    /// Crawl every domain concurrently and collect product locations.
    ///
    /// Input domains are deduplicated. Domains that yield nothing (no
    /// resolvable sitemap, or an empty traversal) contribute no entry.
    /// Task-local results are merged into one owned map only after every
    /// crawl has finished; entries accumulate additively rather than
    /// overwriting.
    pub async fn run(&self, domains: &[String]) -> Result<CrawlResults, DispatchError> {
        let mut seen = HashSet::new();
        let unique: Vec<&String> = domains.iter().filter(|d| seen.insert(d.as_str())).collect();

        let crawls = unique
            .into_iter()
            .map(|domain| async move { (domain.clone(), self.crawl_domain(domain).await) });
        let outcomes = join_all(crawls).await;

        let mut results = CrawlResults::new();
        for (domain, outcome) in outcomes {
            if let Some(urls) = outcome? {
                results.entry(domain).or_default().extend(urls);
            }
        }
        Ok(results)
    }

    /// Resolve, traverse, and classify a single domain.
    ///
    /// Returns `None` when there is nothing to record for the domain.
    async fn crawl_domain(&self, domain: &str) -> Result<Option<Vec<String>>, DispatchError> {
        let Some(sitemap_url) = resolve_sitemap_url(self.fetcher.as_ref(), domain).await else {
            info!("no sitemap found for {domain}");
            return Ok(None);
        };

        let locations = traverse(self.fetcher.as_ref(), &sitemap_url).await;
        if locations.is_empty() {
            return Ok(None);
        }

        let matches = self.dispatcher.dispatch(domain, locations).await?;
        info!("crawled {domain}: found {} product pages", matches.len());
        Ok(Some(matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::pool::WorkerPool;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct StaticFetcher {
        pages: HashMap<String, String>,
        hits: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
                hits: Mutex::new(Vec::new()),
            }
        }

        fn hit_count(&self, url: &str) -> usize {
            self.hits.lock().unwrap().iter().filter(|u| *u == url).count()
        }
    }

    #[async_trait]
    impl Fetch for StaticFetcher {
        async fn fetch(&self, url: &str) -> Option<String> {
            self.hits.lock().unwrap().push(url.to_string());
            self.pages.get(url).cloned()
        }
    }

    fn crawler(fetcher: Arc<StaticFetcher>) -> Crawler {
        let pool = WorkerPool::new(2);
        Crawler::new(fetcher, Dispatcher::new(pool, 10))
    }

    #[tokio::test]
    async fn test_full_pipeline_for_one_domain() {
        let fetcher = Arc::new(StaticFetcher::new(&[
            (
                "https://a.test/robots.txt",
                "User-agent: *\nSitemap: https://a.test/sitemap.xml",
            ),
            (
                "https://a.test/sitemap.xml",
                "<urlset><url><loc>https://a.test/product/1</loc></url>\
                 <url><loc>https://a.test/about</loc></url>\
                 <url><loc>https://a.test/item/2</loc></url></urlset>",
            ),
        ]));

        let results = crawler(fetcher)
            .run(&["https://a.test".to_string()])
            .await
            .unwrap();

        assert_eq!(
            results.get("https://a.test").unwrap(),
            &vec![
                "https://a.test/product/1".to_string(),
                "https://a.test/item/2".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_domain_without_sitemap_contributes_nothing() {
        let fetcher = Arc::new(StaticFetcher::new(&[]));
        let results = crawler(fetcher)
            .run(&["https://gone.test".to_string()])
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_domains_crawled_once() {
        let fetcher = Arc::new(StaticFetcher::new(&[(
            "https://a.test/sitemap.xml",
            "<urlset><url><loc>https://a.test/p/1</loc></url></urlset>",
        )]));
        let domains = vec!["https://a.test".to_string(), "https://a.test".to_string()];

        let results = crawler(Arc::clone(&fetcher)).run(&domains).await.unwrap();
        assert_eq!(
            results.get("https://a.test").unwrap(),
            &vec!["https://a.test/p/1".to_string()]
        );
        // Resolution probes the sitemap once, traversal fetches it once;
        // a second crawl of the same domain would double that.
        assert_eq!(fetcher.hit_count("https://a.test/sitemap.xml"), 2);
    }

    #[tokio::test]
    async fn test_empty_traversal_contributes_nothing() {
        let fetcher = Arc::new(StaticFetcher::new(&[(
            "https://a.test/sitemap.xml",
            "<urlset></urlset>",
        )]));

        let results = crawler(fetcher)
            .run(&["https://a.test".to_string()])
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
