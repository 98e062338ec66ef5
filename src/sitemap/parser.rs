//! Parse sitemap XML into its two document variants.

use quick_xml::events::Event;
use quick_xml::Reader;

/// A parsed sitemap document.
///
/// A sitemap is either an index of further sitemap references, a leaf set
/// of page locations, or something else entirely (an unrecognized root),
/// which contributes nothing to traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum SitemapDocument {
    /// `<sitemapindex>`: nested sitemap references, in document order.
    Index(Vec<String>),
    /// `<urlset>`: leaf page locations, in document order.
    UrlSet(Vec<String>),
    /// Any other root element.
    Other,
}

enum Root {
    Index,
    UrlSet,
}

/// Parse sitemap XML.
///
/// Returns `None` on malformed XML. Root elements are matched by local
/// name suffix, so any namespace prefix is tolerated. `<loc>` values are
/// collected only inside `<sitemap>` entries (index documents) or `<url>`
/// entries (urlset documents).
pub fn parse_sitemap(xml: &str) -> Option<SitemapDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut root: Option<Root> = None;
    let mut in_entry = false;
    let mut in_loc = false;
    let mut locs: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let name = name.as_ref();
                match root {
                    None => {
                        if name.ends_with(b"sitemapindex") {
                            root = Some(Root::Index);
                        } else if name.ends_with(b"urlset") {
                            root = Some(Root::UrlSet);
                        } else {
                            return Some(SitemapDocument::Other);
                        }
                    }
                    Some(Root::Index) => {
                        if name.ends_with(b"sitemap") {
                            in_entry = true;
                        } else if in_entry && name.ends_with(b"loc") {
                            in_loc = true;
                        }
                    }
                    Some(Root::UrlSet) => {
                        if name.ends_with(b"url") {
                            in_entry = true;
                        } else if in_entry && name.ends_with(b"loc") {
                            in_loc = true;
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let name = name.as_ref();
                if name.ends_with(b"loc") {
                    in_loc = false;
                } else if name.ends_with(b"sitemap") || name.ends_with(b"url") {
                    in_entry = false;
                }
            }
            Ok(Event::Text(ref t)) if in_loc => {
                let text = t.unescape().unwrap_or_default().trim().to_string();
                if !text.is_empty() {
                    locs.push(text);
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }

    match root {
        Some(Root::Index) => Some(SitemapDocument::Index(locs)),
        Some(Root::UrlSet) => Some(SitemapDocument::UrlSet(locs)),
        None => Some(SitemapDocument::Other),
    }
}
