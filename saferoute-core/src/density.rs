//! Count safety-relevant amenities inside a bounding box.

use async_trait::async_trait;
use futures_util::future::join_all;
use geo::Rect;
use log::warn;

use crate::{AreaScan, PoiCategory, PointOfInterest, ProviderError};

/// Look up amenities of one category inside a bounding box.
///
/// Implementations return every element the upstream reports, relying on
/// its own result cap. Elements without usable coordinates are skipped.
#[async_trait]
pub trait PoiProvider: Send + Sync {
    /// Return amenities of `category` inside `bbox`.
    async fn query(
        &self,
        bbox: &Rect<f64>,
        category: PoiCategory,
    ) -> Result<Vec<PointOfInterest>, ProviderError>;
}

#[async_trait]
impl<T> PoiProvider for Box<T>
where
    T: PoiProvider + ?Sized,
{
    async fn query(
        &self,
        bbox: &Rect<f64>,
        category: PoiCategory,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        (**self).query(bbox, category).await
    }
}

/// Query `category` inside `bbox`, returning an empty list on failure.
pub async fn query<P>(provider: &P, bbox: &Rect<f64>, category: PoiCategory) -> Vec<PointOfInterest>
where
    P: PoiProvider + ?Sized,
{
    match provider.query(bbox, category).await {
        Ok(pois) => pois,
        Err(err) => {
            warn!("{category} lookup failed: {err}");
            Vec::new()
        }
    }
}

/// Query every [`PoiCategory`] inside `bbox` concurrently.
///
/// Each category fails soft on its own.
pub async fn scan<P>(provider: &P, bbox: &Rect<f64>) -> AreaScan
where
    P: PoiProvider + ?Sized,
{
    let results = join_all(
        PoiCategory::ALL
            .into_iter()
            .map(|category| query(provider, bbox, category)),
    )
    .await;
    let mut area = AreaScan::default();
    for (category, pois) in PoiCategory::ALL.into_iter().zip(results) {
        area.insert(category, pois);
    }
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::{fixture, rstest};

    use crate::test_support::StubPoiProvider;

    #[fixture]
    fn bbox() -> Rect<f64> {
        Rect::new(Coord { x: 77.5, y: 12.9 }, Coord { x: 77.7, y: 13.0 })
    }

    #[rstest]
    #[tokio::test]
    async fn scan_groups_each_category(bbox: Rect<f64>) {
        let centre = bbox.center();
        let provider = StubPoiProvider::default()
            .with_count(PoiCategory::Police, 2, centre)
            .with_count(PoiCategory::Hospital, 1, centre)
            .with_count(PoiCategory::Fuel, 4, centre);

        let result = scan(&provider, &bbox).await;

        assert_eq!(result.police.len(), 2);
        assert_eq!(result.hospitals.len(), 1);
        assert_eq!(result.busy.len(), 4);
        assert!(result.busy.iter().all(|poi| poi.category == PoiCategory::Fuel));
    }

    #[rstest]
    #[tokio::test]
    async fn failing_category_does_not_affect_others(bbox: Rect<f64>) {
        let provider = StubPoiProvider::default()
            .with_count(PoiCategory::Police, 3, bbox.center())
            .with_error(
                PoiCategory::Hospital,
                ProviderError::Http {
                    url: "http://overpass.test".to_owned(),
                    status: 429,
                    message: "Too Many Requests".to_owned(),
                },
            );

        let result = scan(&provider, &bbox).await;

        assert_eq!(result.police.len(), 3);
        assert!(result.hospitals.is_empty());
        assert!(result.busy.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn query_passes_bbox_through(bbox: Rect<f64>) {
        let provider = StubPoiProvider::default();

        let pois = query(&provider, &bbox, PoiCategory::Fuel).await;

        assert!(pois.is_empty());
        assert_eq!(provider.queries(), vec![(bbox, PoiCategory::Fuel)]);
    }
}
