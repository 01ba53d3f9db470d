mod common;

use common::{DEFAULT_TIMEOUT, EIFFEL_DETAIL_PATH, SHORT_TIMEOUT};
use place_photos::domain::entities::{PlaceQuery, SourceKind};
use place_photos::domain::sources::{ImageSource, SourceError};

fn query(raw: &str) -> PlaceQuery {
    PlaceQuery::parse(raw).unwrap()
}

#[tokio::test]
async fn test_scrape_resolves_place_page_and_upgrades_images() {
    let mut server = mockito::Server::new_async().await;
    let search =
        common::mock_search_page(&mut server, "Eiffel Tower", common::eiffel_search_page()).await;
    let place =
        common::mock_place_page(&mut server, EIFFEL_DETAIL_PATH, common::place_page(&[1, 2, 3]))
            .await;

    let source = common::scrape_source(&server.url(), DEFAULT_TIMEOUT);
    let images = source.images(&query("Eiffel Tower"), 10).await;

    search.assert_async().await;
    place.assert_async().await;

    assert_eq!(source.kind(), SourceKind::Scrape);
    assert_eq!(images.len(), 3);
    assert_eq!(images[0].src, common::upgraded_image(1));
    assert_eq!(images[0].alt, "Eiffel Tower 1");
    assert!(images.iter().all(|i| !i.src.contains("w=300")));
}

#[tokio::test]
async fn test_scrape_respects_max() {
    let mut server = mockito::Server::new_async().await;
    common::mock_search_page(&mut server, "Eiffel Tower", common::eiffel_search_page()).await;
    let page = common::place_page(&[1, 2, 3, 4, 5]);
    common::mock_place_page(&mut server, EIFFEL_DETAIL_PATH, page).await;

    let source = common::scrape_source(&server.url(), DEFAULT_TIMEOUT);
    let images = source.images(&query("Eiffel Tower"), 2).await;

    assert_eq!(images.len(), 2);
    assert_eq!(images[1].src, common::upgraded_image(2));
}

#[tokio::test]
async fn test_scrape_without_candidate_skips_second_fetch() {
    let mut server = mockito::Server::new_async().await;
    let page = common::search_page(&[("/Hotels-g187147-Paris-Hotels.html", "Hotels in Paris")]);
    let search = common::mock_search_page(&mut server, "Nonexistent Place XYZ", page).await;
    let place = server
        .mock("GET", EIFFEL_DETAIL_PATH)
        .expect(0)
        .create_async()
        .await;

    let source = common::scrape_source(&server.url(), DEFAULT_TIMEOUT);
    let result = source.try_images(&query("Nonexistent Place XYZ"), 10).await;

    assert!(result.unwrap().is_empty());
    search.assert_async().await;
    place.assert_async().await;
}

#[tokio::test]
async fn test_scrape_matches_anchor_text() {
    let mut server = mockito::Server::new_async().await;
    let page = common::search_page(&[("/place/louvre", "The  Louvre Museum")]);
    common::mock_search_page(&mut server, "Louvre Museum", page).await;
    let place =
        common::mock_place_page(&mut server, "/place/louvre", common::place_page(&[9])).await;

    let source = common::scrape_source(&server.url(), DEFAULT_TIMEOUT);
    let images = source.images(&query("Louvre Museum"), 10).await;

    place.assert_async().await;
    assert_eq!(images.len(), 1);
}

#[tokio::test]
async fn test_scrape_search_error_is_reported_and_absorbed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/Search")
        .match_query(mockito::Matcher::Any)
        .with_status(403)
        .expect(2)
        .create_async()
        .await;

    let source = common::scrape_source(&server.url(), DEFAULT_TIMEOUT);

    let result = source.try_images(&query("Eiffel Tower"), 10).await;
    assert!(matches!(
        result,
        Err(SourceError::Status { status: 403, .. })
    ));

    let images = source.images(&query("Eiffel Tower"), 10).await;
    assert!(images.is_empty());
}

#[tokio::test]
async fn test_scrape_place_page_error_yields_empty() {
    let mut server = mockito::Server::new_async().await;
    common::mock_search_page(&mut server, "Eiffel Tower", common::eiffel_search_page()).await;
    server
        .mock("GET", EIFFEL_DETAIL_PATH)
        .with_status(500)
        .create_async()
        .await;

    let source = common::scrape_source(&server.url(), DEFAULT_TIMEOUT);
    let images = source.images(&query("Eiffel Tower"), 10).await;

    assert!(images.is_empty());
}

#[tokio::test]
async fn test_scrape_timeout_yields_empty() {
    let base = common::unresponsive_server().await;
    let source = common::scrape_source(&base, SHORT_TIMEOUT);

    let result = source.try_images(&query("Eiffel Tower"), 10).await;
    assert!(matches!(result, Err(SourceError::Timeout(_))));

    let images = source.images(&query("Eiffel Tower"), 10).await;
    assert!(images.is_empty());
}
