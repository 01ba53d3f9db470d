#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Mock, ServerGuard};
use place_photos::application::services::RetrievalService;
use place_photos::domain::sources::ImageSource;
use place_photos::infrastructure::consensus::ConsensusFilter;
use place_photos::infrastructure::curated::PexelsClient;
use place_photos::infrastructure::encyclopedia::EncyclopediaSource;
use place_photos::infrastructure::http::{DEFAULT_BROWSER_USER_AGENT, api_client, browser_client};
use place_photos::infrastructure::scrape::ScrapeSource;
use place_photos::state::AppState;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

pub const TEST_API_KEY: &str = "test-pexels-key";
pub const WIKI_PATH: &str = "/w/api.php";
pub const EIFFEL_DETAIL_PATH: &str =
    "/Attraction_Review-g187147-d188151-Reviews-Eiffel_Tower-Paris.html";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const SHORT_TIMEOUT: Duration = Duration::from_millis(300);

pub fn scrape_source(base: &str, timeout: Duration) -> ScrapeSource {
    let http = browser_client(timeout, DEFAULT_BROWSER_USER_AGENT).unwrap();
    ScrapeSource::new(http, Url::parse(base).unwrap())
}

pub fn encyclopedia_source(base: &str, timeout: Duration) -> EncyclopediaSource {
    let http = api_client(timeout).unwrap();
    let api_url = Url::parse(&format!("{base}{WIKI_PATH}")).unwrap();
    EncyclopediaSource::new(http, api_url)
}

pub fn pexels_client(base: &str, api_key: Option<&str>) -> PexelsClient {
    let http = api_client(DEFAULT_TIMEOUT).unwrap();
    PexelsClient::new(http, format!("{base}/v1"), api_key.map(str::to_string))
}

pub fn consensus_filter() -> ConsensusFilter {
    ConsensusFilter::new(browser_client(DEFAULT_TIMEOUT, DEFAULT_BROWSER_USER_AGENT).unwrap())
}

/// Service wired like production, with every upstream at a test URL.
pub fn create_test_service(
    curated_base: &str,
    scrape_base: &str,
    wiki_base: &str,
    api_key: Option<&str>,
) -> RetrievalService {
    let chain: Vec<Arc<dyn ImageSource>> = vec![
        Arc::new(scrape_source(scrape_base, DEFAULT_TIMEOUT)),
        Arc::new(encyclopedia_source(wiki_base, DEFAULT_TIMEOUT)),
    ];
    let curated = Arc::new(pexels_client(curated_base, api_key));
    RetrievalService::new(curated, chain, 10)
}

/// State backed by a single mock server playing all three upstreams.
pub fn create_test_state(server: &ServerGuard, api_key: Option<&str>) -> AppState {
    let url = server.url();
    let service = create_test_service(&url, &url, &url, api_key);
    AppState::new(Arc::new(service), api_key.is_some())
}

/// Base URL of a server that accepts connections and never answers.
pub async fn unresponsive_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{addr}")
}

pub fn search_page(links: &[(&str, &str)]) -> String {
    let anchors: String = links
        .iter()
        .map(|(href, text)| format!(r#"<li><a href="{href}">{text}</a></li>"#))
        .collect();
    format!(
        r##"<html><head><title>Search</title></head><body>
        <nav><a href="/">Home</a><a href="#results">Skip</a></nav>
        <ul class="results">{anchors}</ul>
        </body></html>"##
    )
}

pub fn eiffel_search_page() -> String {
    search_page(&[
        ("/Hotels-g187147-Paris-Hotels.html", "Hotels in Paris"),
        (EIFFEL_DETAIL_PATH, "Eiffel Tower"),
    ])
}

pub fn place_page(image_ids: &[u32]) -> String {
    let images: String = image_ids
        .iter()
        .map(|id| {
            format!(
                r#"<img src="https://dynamic-media-cdn.tripadvisor.com/media/photo-s/0e/{id}/caption.jpg?w=300&h=200" alt="Eiffel Tower {id}">"#
            )
        })
        .collect();
    format!(
        r#"<html><body>
        <img src="https://static.tacdn.com/img2/brand/logo.svg" alt="logo">
        <div class="gallery">{images}</div>
        </body></html>"#
    )
}

pub fn upgraded_image(id: u32) -> String {
    format!("https://dynamic-media-cdn.tripadvisor.com/media/photo-o/0e/{id}/caption.jpg")
}

pub fn pexels_photo(id: u64, width: u32, height: u32) -> Value {
    json!({
        "id": id,
        "width": width,
        "height": height,
        "url": format!("https://www.pexels.com/photo/{id}/"),
        "photographer": "Test Photographer",
        "photographer_url": "https://www.pexels.com/@test",
        "src": {
            "original": format!("https://images.pexels.com/photos/{id}/original.jpeg"),
            "large2x": format!("https://images.pexels.com/photos/{id}/large2x.jpeg"),
            "large": format!("https://images.pexels.com/photos/{id}/large.jpeg"),
            "medium": format!("https://images.pexels.com/photos/{id}/medium.jpeg")
        }
    })
}

pub fn pexels_body(photos: Vec<Value>) -> String {
    json!({
        "page": 1,
        "per_page": 50,
        "total_results": photos.len(),
        "photos": photos
    })
    .to_string()
}

/// Ten large photos (ids 1..=10, area grows with id) and forty small ones.
pub fn eiffel_pexels_body() -> String {
    let mut photos: Vec<Value> = (1..=10u64)
        .map(|id| pexels_photo(id, 2000 + id as u32 * 100, 1500))
        .collect();
    photos.extend((11..=50u64).map(|id| pexels_photo(id, 1280, 853)));
    pexels_body(photos)
}

pub fn wiki_search_body(title: Option<&str>) -> String {
    let hits: Vec<Value> = title
        .into_iter()
        .map(|t| json!({ "ns": 0, "title": t, "pageid": 9232 }))
        .collect();
    json!({
        "batchcomplete": "",
        "query": { "searchinfo": { "totalhits": hits.len() }, "search": hits }
    })
    .to_string()
}

pub fn wiki_images_body(urls: &[&str]) -> String {
    let pages: serde_json::Map<String, Value> = urls
        .iter()
        .enumerate()
        .map(|(i, url)| {
            (
                format!("-{}", i + 1),
                json!({
                    "ns": 6,
                    "title": format!("File:{i}"),
                    "imageinfo": [{ "url": url, "mime": "image/jpeg" }]
                }),
            )
        })
        .collect();
    json!({ "batchcomplete": "", "query": { "pages": pages } }).to_string()
}

/// PNG of 8x8 grey blocks whose levels depend on `seed`. Equal seeds give
/// identical pictures, different seeds give visually unrelated ones.
pub fn block_png(seed: u32) -> Vec<u8> {
    let picture = image::RgbImage::from_fn(64, 64, |x, y| {
        let mut h = (x / 8).wrapping_mul(0x9E37_79B1)
            ^ (y / 8).wrapping_mul(0x85EB_CA77)
            ^ seed.wrapping_mul(0xC2B2_AE3D);
        h ^= h >> 15;
        h = h.wrapping_mul(0x2C1B_3C6D);
        h ^= h >> 12;
        image::Rgb([(h & 0xFF) as u8; 3])
    });

    let mut bytes = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(picture)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

/// Serves `block_png(seed)` at `path`.
pub async fn mock_png(server: &mut ServerGuard, path: &str, seed: u32) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(block_png(seed))
        .create_async()
        .await
}

pub async fn mock_search_page(server: &mut ServerGuard, query: &str, body: String) -> Mock {
    server
        .mock("GET", "/Search")
        .match_query(Matcher::UrlEncoded("q".into(), query.into()))
        .match_header("user-agent", Matcher::Regex("Mozilla".into()))
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create_async()
        .await
}

pub async fn mock_place_page(server: &mut ServerGuard, path: &str, body: String) -> Mock {
    server
        .mock("GET", path)
        .match_header("referer", Matcher::Regex(r"/Search\?q=".into()))
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create_async()
        .await
}

pub async fn mock_wiki_search(server: &mut ServerGuard, query: &str, body: String) -> Mock {
    server
        .mock("GET", WIKI_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("list".into(), "search".into()),
            Matcher::UrlEncoded("srsearch".into(), query.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

pub async fn mock_wiki_images(server: &mut ServerGuard, title: &str, body: String) -> Mock {
    server
        .mock("GET", WIKI_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("generator".into(), "images".into()),
            Matcher::UrlEncoded("titles".into(), title.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

pub async fn mock_pexels(server: &mut ServerGuard, query: &str, body: String) -> Mock {
    server
        .mock("GET", "/v1/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), query.into()),
            Matcher::UrlEncoded("per_page".into(), "50".into()),
        ]))
        .match_header("authorization", TEST_API_KEY)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}
