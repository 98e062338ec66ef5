//! Classify URLs as likely product pages by path pattern.

/// Path fragments that mark a URL as a likely product page.
///
/// Static configuration; matched anywhere in the URL string.
pub const PRODUCT_PATTERNS: &[&str] = &["/product/", "/item/", "/p/", "/prod/", "/products/"];

/// Whether a single URL matches any product pattern.
pub fn is_product_url(url: &str) -> bool {
    PRODUCT_PATTERNS.iter().any(|pattern| url.contains(pattern))
}

/// Filter `urls` down to the product-page subset.
///
/// Pure and order-preserving: the output is a subsequence of the input.
pub fn classify(urls: &[String]) -> Vec<String> {
    urls.iter().filter(|url| is_product_url(url)).cloned().collect()
}
