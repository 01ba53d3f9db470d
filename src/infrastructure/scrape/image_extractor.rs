//! Image extraction from a scraped place page.
//!
//! Only images served from the site's own CDN are kept; everything else on
//! the page (ads, avatars, tracking pixels, inline placeholders) is dropped.
//! Accepted URLs are rewritten to request the large variant.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::domain::entities::{ImageDescriptor, ImageSet};
use crate::utils::url_normalizer::normalize_url;

/// Hosts images are accepted from. Anything else is ignored, never rewritten.
pub const CDN_HOSTS: [&str; 2] = [
    "media-cdn.tripadvisor.com",
    "dynamic-media-cdn.tripadvisor.com",
];

/// Attributes checked, in order, for the image source.
const SOURCE_ATTRIBUTES: [&str; 3] = ["src", "data-src", "data-lazyurl"];

/// Resize directives appended by the dynamic CDN.
const RESIZE_PARAMS: [&str; 2] = ["w", "h"];

const LARGE_VARIANT_SEGMENT: &str = "/photo-o/";

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("valid img selector"));

/// Thumbnail and small variants: `photo-t` (thumbnail), `photo-s`, `photo-l`.
static SMALL_VARIANT_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/photo-[tsl]/").expect("valid pattern"));

/// Extracts up to `max` CDN images from `html`, de-duplicated by `(src, alt)`
/// in order of first appearance.
pub fn extract_images(html: &str, max: usize) -> Vec<ImageDescriptor> {
    let document = Html::parse_document(html);
    let mut images = ImageSet::with_max(max);

    for img in document.select(&IMG_SELECTOR) {
        if images.is_full() {
            break;
        }

        let element = img.value();
        let Some(raw) = SOURCE_ATTRIBUTES
            .iter()
            .filter_map(|name| element.attr(name))
            .map(str::trim)
            .find(|value| !value.is_empty())
        else {
            continue;
        };

        let Some(src) = normalize_image_src(raw) else {
            continue;
        };

        let alt = element.attr("alt").map(str::trim).unwrap_or_default();
        images.insert(ImageDescriptor::new(src, alt));
    }

    images.into_vec()
}

/// Validates and rewrites one image source.
///
/// Returns `None` for data URIs, relative or unparsable sources, and hosts
/// outside [`CDN_HOSTS`].
pub fn normalize_image_src(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
    {
        return None;
    }

    let mut url = normalize_url(raw).ok()?;
    if !is_cdn_host(&url) {
        return None;
    }

    let upgraded = SMALL_VARIANT_SEGMENT
        .replace_all(url.path(), LARGE_VARIANT_SEGMENT)
        .into_owned();
    url.set_path(&upgraded);
    strip_resize_params(&mut url);

    Some(url.into())
}

fn is_cdn_host(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|host| CDN_HOSTS.iter().any(|cdn| cdn.eq_ignore_ascii_case(host)))
}

fn strip_resize_params(url: &mut Url) {
    if url.query().is_none() {
        return;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !RESIZE_PARAMS.iter().any(|param| key == param))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
}
