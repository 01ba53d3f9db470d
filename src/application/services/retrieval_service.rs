//! Multi-source image retrieval.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{
    CuratedPhoto, ImageDescriptor, PlaceQuery, RetrievalResult, SourceKind,
};
use crate::domain::sources::{ImageFilter, ImageSource, PhotoProvider};
use crate::error::AppError;

/// Coordinates the curated photo leg and the scraped-image fallback chain.
///
/// The two legs are independent failure domains. Chain sources absorb their
/// own failures, so the chain always produces a (possibly empty) list; a
/// curated failure is reported to the caller but never stops the chain.
///
/// An optional [`ImageFilter`] can post-process the winning chain result. It
/// runs on every request when `filter_by_default` is set, otherwise only when
/// the caller asks for it. The curated leg is never filtered.
pub struct RetrievalService {
    curated: Arc<dyn PhotoProvider>,
    chain: Vec<Arc<dyn ImageSource>>,
    default_max: usize,
    filter: Option<Arc<dyn ImageFilter>>,
    filter_by_default: bool,
}

impl RetrievalService {
    /// Creates a retrieval service.
    ///
    /// # Arguments
    ///
    /// - `curated` - primary photo provider
    /// - `chain` - image sources tried in order until one returns images
    /// - `default_max` - image cap used when the caller does not give one
    pub fn new(
        curated: Arc<dyn PhotoProvider>,
        chain: Vec<Arc<dyn ImageSource>>,
        default_max: usize,
    ) -> Self {
        Self {
            curated,
            chain,
            default_max,
            filter: None,
            filter_by_default: false,
        }
    }

    /// Attaches a post-filter for scraped images.
    ///
    /// With `by_default` the filter runs unless a request turns it off.
    pub fn with_image_filter(mut self, filter: Arc<dyn ImageFilter>, by_default: bool) -> Self {
        self.filter = Some(filter);
        self.filter_by_default = by_default;
        self
    }

    pub fn has_image_filter(&self) -> bool {
        self.filter.is_some()
    }

    pub fn default_max(&self) -> usize {
        self.default_max
    }

    /// Provenance tags of the chain, in the order they are tried.
    pub fn chain_kinds(&self) -> Vec<SourceKind> {
        self.chain.iter().map(|source| source.kind()).collect()
    }

    /// Fetches the ranked curated photos.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] when the provider has no API key.
    /// Returns [`AppError::Upstream`] when the provider request fails.
    pub async fn curated_photos(&self, query: &PlaceQuery) -> Result<Vec<CuratedPhoto>, AppError> {
        self.curated.photos(query).await.map_err(|e| {
            warn!(query = %query, error = %e, "Curated photo leg failed");
            AppError::from(e)
        })
    }

    /// Walks the fallback chain and returns the first non-empty result.
    ///
    /// Returns [`SourceKind::None`] with an empty list when every source comes
    /// back empty. The image filter runs according to its default.
    pub async fn scraped_images(
        &self,
        query: &PlaceQuery,
        max: usize,
    ) -> (Vec<ImageDescriptor>, SourceKind) {
        self.scraped_images_with(query, max, None).await
    }

    /// Same as [`RetrievalService::scraped_images`] with a per-call filter switch.
    ///
    /// `consensus` overrides the filter default when given. It has no effect
    /// when no filter is attached. A filtered list that ends up empty is
    /// reported as [`SourceKind::None`]; the chain is not resumed.
    pub async fn scraped_images_with(
        &self,
        query: &PlaceQuery,
        max: usize,
        consensus: Option<bool>,
    ) -> (Vec<ImageDescriptor>, SourceKind) {
        let (images, kind) = self.walk_chain(query, max).await;
        if images.is_empty() {
            return (images, kind);
        }

        let Some(filter) = self
            .filter
            .as_ref()
            .filter(|_| consensus.unwrap_or(self.filter_by_default))
        else {
            return (images, kind);
        };

        let before = images.len();
        let images = filter.filter(images).await;
        debug!(query = %query, before, after = images.len(), "Scraped images filtered");

        if images.is_empty() {
            (images, SourceKind::None)
        } else {
            (images, kind)
        }
    }

    async fn walk_chain(&self, query: &PlaceQuery, max: usize) -> (Vec<ImageDescriptor>, SourceKind) {
        for source in &self.chain {
            let kind = source.kind();
            let images = source.images(query, max).await;

            if !images.is_empty() {
                info!(query = %query, source = %kind, count = images.len(), "Images resolved");
                return (images, kind);
            }

            debug!(query = %query, source = %kind, "Source returned no images, falling back");
        }

        info!(query = %query, "No source returned images");
        (Vec::new(), SourceKind::None)
    }

    /// Runs both legs concurrently and combines them.
    ///
    /// Both legs always run to completion before the result (or the curated
    /// error) is returned.
    ///
    /// # Errors
    ///
    /// Same as [`RetrievalService::curated_photos`].
    pub async fn resolve(
        &self,
        query: &PlaceQuery,
        max: usize,
    ) -> Result<RetrievalResult, AppError> {
        self.resolve_with(query, max, None).await
    }

    /// Same as [`RetrievalService::resolve`] with a per-call filter switch,
    /// see [`RetrievalService::scraped_images_with`].
    ///
    /// # Errors
    ///
    /// Same as [`RetrievalService::curated_photos`].
    pub async fn resolve_with(
        &self,
        query: &PlaceQuery,
        max: usize,
        consensus: Option<bool>,
    ) -> Result<RetrievalResult, AppError> {
        let (curated, (scraped, source)) = tokio::join!(
            self.curated_photos(query),
            self.scraped_images_with(query, max, consensus)
        );

        Ok(RetrievalResult::new(query, curated?, scraped, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PhotoSources;
    use crate::domain::sources::{
        MockImageFilter, MockImageSource, MockPhotoProvider, SourceError,
    };

    fn query() -> PlaceQuery {
        PlaceQuery::parse("Eiffel Tower").unwrap()
    }

    fn image(n: usize) -> ImageDescriptor {
        ImageDescriptor::new(format!("https://media-cdn.tripadvisor.com/{n}.jpg"), "")
    }

    fn photo(id: u64) -> CuratedPhoto {
        CuratedPhoto {
            id,
            width: 4000,
            height: 3000,
            url: format!("https://www.pexels.com/photo/{id}/"),
            photographer: String::new(),
            photographer_url: String::new(),
            src: PhotoSources::default(),
        }
    }

    fn source(kind: SourceKind, images: Vec<ImageDescriptor>, calls: usize) -> MockImageSource {
        let mut mock = MockImageSource::new();
        mock.expect_kind().return_const(kind);
        mock.expect_images()
            .times(calls)
            .returning(move |_, _| images.clone());
        mock
    }

    fn curated_ok(photos: Vec<CuratedPhoto>) -> MockPhotoProvider {
        let mut mock = MockPhotoProvider::new();
        mock.expect_photos()
            .times(1)
            .returning(move |_| Ok(photos.clone()));
        mock
    }

    fn service(curated: MockPhotoProvider, chain: Vec<MockImageSource>) -> RetrievalService {
        let chain = chain
            .into_iter()
            .map(|s| Arc::new(s) as Arc<dyn ImageSource>)
            .collect();
        RetrievalService::new(Arc::new(curated), chain, 10)
    }

    #[tokio::test]
    async fn test_scrape_success_skips_encyclopedia() {
        let svc = service(
            curated_ok(vec![photo(1)]),
            vec![
                source(SourceKind::Scrape, vec![image(1), image(2)], 1),
                source(SourceKind::Encyclopedia, vec![image(3)], 0),
            ],
        );

        let result = svc.resolve(&query(), 10).await.unwrap();
        assert_eq!(result.scraped_source, SourceKind::Scrape);
        assert_eq!(result.scraped.len(), 2);
        assert_eq!(result.curated.len(), 1);
        assert_eq!(result.query, "Eiffel Tower");
    }

    #[tokio::test]
    async fn test_empty_scrape_falls_back_to_encyclopedia() {
        let svc = service(
            curated_ok(vec![]),
            vec![
                source(SourceKind::Scrape, vec![], 1),
                source(SourceKind::Encyclopedia, vec![image(7)], 1),
            ],
        );

        let result = svc.resolve(&query(), 10).await.unwrap();
        assert_eq!(result.scraped_source, SourceKind::Encyclopedia);
        assert_eq!(result.scraped, vec![image(7)]);
    }

    #[tokio::test]
    async fn test_all_empty_is_none() {
        let svc = service(
            curated_ok(vec![]),
            vec![
                source(SourceKind::Scrape, vec![], 1),
                source(SourceKind::Encyclopedia, vec![], 1),
            ],
        );

        let (images, kind) = svc.scraped_images(&query(), 10).await;
        assert!(images.is_empty());
        assert_eq!(kind, SourceKind::None);
    }

    #[tokio::test]
    async fn test_max_is_passed_to_sources() {
        let mut scrape = MockImageSource::new();
        scrape.expect_kind().return_const(SourceKind::Scrape);
        scrape
            .expect_images()
            .withf(|q, max| q.as_str() == "Eiffel Tower" && *max == 3)
            .times(1)
            .returning(|_, _| vec![image(1)]);

        let svc = service(curated_ok(vec![]), vec![scrape]);
        let (images, _) = svc.scraped_images(&query(), 3).await;
        assert_eq!(images.len(), 1);
    }

    #[tokio::test]
    async fn test_curated_failure_does_not_stop_chain() {
        let mut curated = MockPhotoProvider::new();
        curated
            .expect_photos()
            .times(1)
            .returning(|_| Err(SourceError::Timeout("https://api.pexels.com".to_string())));

        let svc = service(
            curated,
            vec![
                source(SourceKind::Scrape, vec![], 1),
                source(SourceKind::Encyclopedia, vec![image(1)], 1),
            ],
        );

        let result = svc.resolve(&query(), 10).await;
        assert!(matches!(result, Err(AppError::Upstream { .. })));
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let mut curated = MockPhotoProvider::new();
        curated
            .expect_photos()
            .returning(|_| Err(SourceError::MissingApiKey("pexels")));

        let svc = service(curated, vec![]);
        let result = svc.curated_photos(&query()).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[test]
    fn test_chain_kinds_in_order() {
        let mut scrape = MockImageSource::new();
        scrape.expect_kind().return_const(SourceKind::Scrape);
        let mut wiki = MockImageSource::new();
        wiki.expect_kind().return_const(SourceKind::Encyclopedia);

        let svc = service(MockPhotoProvider::new(), vec![scrape, wiki]);
        assert_eq!(
            svc.chain_kinds(),
            vec![SourceKind::Scrape, SourceKind::Encyclopedia]
        );
        assert_eq!(svc.default_max(), 10);
    }

    fn keep_first(calls: usize) -> MockImageFilter {
        let mut mock = MockImageFilter::new();
        mock.expect_filter()
            .times(calls)
            .returning(|images| images.into_iter().take(1).collect());
        mock
    }

    #[tokio::test]
    async fn test_filter_only_runs_on_request() {
        let svc = service(
            MockPhotoProvider::new(),
            vec![source(SourceKind::Scrape, vec![image(1), image(2)], 2)],
        )
        .with_image_filter(Arc::new(keep_first(1)), false);
        assert!(svc.has_image_filter());

        let (images, _) = svc.scraped_images(&query(), 10).await;
        assert_eq!(images.len(), 2);

        let (images, kind) = svc.scraped_images_with(&query(), 10, Some(true)).await;
        assert_eq!(images, vec![image(1)]);
        assert_eq!(kind, SourceKind::Scrape);
    }

    #[tokio::test]
    async fn test_filter_by_default_can_be_turned_off() {
        let svc = service(
            MockPhotoProvider::new(),
            vec![source(SourceKind::Encyclopedia, vec![image(1), image(2)], 2)],
        )
        .with_image_filter(Arc::new(keep_first(1)), true);

        let (images, kind) = svc.scraped_images(&query(), 10).await;
        assert_eq!(images, vec![image(1)]);
        assert_eq!(kind, SourceKind::Encyclopedia);

        let (images, _) = svc.scraped_images_with(&query(), 10, Some(false)).await;
        assert_eq!(images.len(), 2);
    }

    #[tokio::test]
    async fn test_filter_skipped_for_empty_chain() {
        let svc = service(
            MockPhotoProvider::new(),
            vec![source(SourceKind::Scrape, vec![], 1)],
        )
        .with_image_filter(Arc::new(keep_first(0)), true);

        let (images, kind) = svc.scraped_images(&query(), 10).await;
        assert!(images.is_empty());
        assert_eq!(kind, SourceKind::None);
    }

    #[tokio::test]
    async fn test_everything_filtered_out_is_none() {
        let mut drop_all = MockImageFilter::new();
        drop_all.expect_filter().times(1).returning(|_| Vec::new());

        let svc = service(
            MockPhotoProvider::new(),
            vec![
                source(SourceKind::Scrape, vec![image(1)], 1),
                source(SourceKind::Encyclopedia, vec![image(2)], 0),
            ],
        )
        .with_image_filter(Arc::new(drop_all), true);

        let (images, kind) = svc.scraped_images(&query(), 10).await;
        assert!(images.is_empty());
        assert_eq!(kind, SourceKind::None);
    }

    #[tokio::test]
    async fn test_resolve_with_never_filters_curated() {
        let svc = service(
            curated_ok(vec![photo(1), photo(2)]),
            vec![source(SourceKind::Scrape, vec![image(1), image(2)], 1)],
        )
        .with_image_filter(Arc::new(keep_first(1)), false);

        let result = svc.resolve_with(&query(), 10, Some(true)).await.unwrap();
        assert_eq!(result.curated.len(), 2);
        assert_eq!(result.scraped, vec![image(1)]);
    }
}
