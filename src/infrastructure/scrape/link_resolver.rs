//! Candidate link heuristics for locating a place page in search results.
//!
//! The scraped site's markup changes often and without notice, so instead of
//! relying on specific containers or class names every anchor in the document
//! is considered. An anchor becomes a candidate when its `href` looks like an
//! attraction/activity detail page or when its visible text mentions the
//! query. The first candidate in document order wins; there is no scoring.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::domain::entities::PlaceQuery;
use crate::utils::url_normalizer::resolve_url;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// Paths of attraction and activity detail pages.
static DETAIL_PATH_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"/Attraction_Review-g\d+-d\d+").expect("valid pattern"),
        Regex::new(r"/AttractionProductReview-g\d+-d\d+").expect("valid pattern"),
        Regex::new(r"/AttractionsNear-g\d+-d\d+").expect("valid pattern"),
    ]
});

/// Why an anchor was accepted as a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMatch {
    PathPattern,
    AnchorText,
}

/// An absolute URL believed to point at the place's detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    pub url: Url,
    pub matched_by: LinkMatch,
}

/// Returns every candidate link in document order, without duplicates.
///
/// Relative hrefs are resolved against `origin`. Anchors with a blank href,
/// a fragment-only href or a non-HTTP scheme are skipped.
pub fn candidate_links(html: &str, query: &PlaceQuery, origin: &Url) -> Vec<CandidateLink> {
    let document = Html::parse_document(html);
    let needle = collapse_whitespace(&query.folded());
    let mut candidates: IndexMap<Url, LinkMatch> = IndexMap::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let matched_by = if matches_detail_path(href) {
            LinkMatch::PathPattern
        } else {
            let text = collapse_whitespace(&anchor.text().collect::<String>().to_lowercase());
            if !text.contains(&needle) {
                continue;
            }
            LinkMatch::AnchorText
        };

        match resolve_url(origin, href) {
            Ok(url) => {
                candidates.entry(url).or_insert(matched_by);
            }
            Err(e) => debug!(href, error = %e, "Skipping unresolvable candidate link"),
        }
    }

    candidates
        .into_iter()
        .map(|(url, matched_by)| CandidateLink { url, matched_by })
        .collect()
}

/// Picks the place page link: the first candidate inserted, if any.
pub fn resolve_place_link(html: &str, query: &PlaceQuery, origin: &Url) -> Option<CandidateLink> {
    let candidate = candidate_links(html, query, origin).into_iter().next();

    match &candidate {
        Some(link) => debug!(
            url = %link.url,
            matched_by = ?link.matched_by,
            "Resolved place link"
        ),
        None => debug!(query = %query, "No candidate place link"),
    }

    candidate
}

fn matches_detail_path(href: &str) -> bool {
    DETAIL_PATH_PATTERNS.iter().any(|re| re.is_match(href))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
