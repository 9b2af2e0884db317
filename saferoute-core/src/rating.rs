//! Session-scoped community ratings that nudge route scores.
//!
//! A traveller may rate a route from one to five stars. Ratings accumulate
//! per origin, destination and category, and the resulting adjustment is
//! applied on top of the computed safety score.

use std::collections::HashMap;

use thiserror::Error;

use crate::{RouteCategory, ScoredRoute};

/// Errors raised when parsing a [`CommunityRating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RatingError {
    /// Ratings must be between one and five stars.
    #[error("rating must be between 1 and 5, got {0}")]
    OutOfRange(u8),
}

/// A one-to-five star rating.
///
/// # Examples
/// ```
/// use saferoute_core::CommunityRating;
///
/// let rating = CommunityRating::try_from(2).expect("valid rating");
/// assert_eq!(rating.score_delta(), -8);
/// assert!(CommunityRating::try_from(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommunityRating(u8);

impl CommunityRating {
    /// Star value in `1..=5`.
    pub const fn stars(self) -> u8 {
        self.0
    }

    /// Score adjustment contributed by this rating.
    pub const fn score_delta(self) -> i32 {
        match self.0 {
            1 => -10,
            2 => -8,
            3 => 0,
            4 => 3,
            _ => 5,
        }
    }
}

impl TryFrom<u8> for CommunityRating {
    type Error = RatingError;

    fn try_from(stars: u8) -> Result<Self, Self::Error> {
        if (1..=5).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(RatingError::OutOfRange(stars))
        }
    }
}

/// Identifies a rated route by its endpoint labels and category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    start: String,
    end: String,
    category: RouteCategory,
}

impl RouteKey {
    /// Build a key from endpoint labels and a category.
    pub fn new(start: impl Into<String>, end: impl Into<String>, category: RouteCategory) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            category,
        }
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}:{}", self.start, self.end, self.category)
    }
}

/// In-memory accumulation of rating adjustments.
///
/// # Examples
/// ```
/// use saferoute_core::{CommunityRating, RatingLedger, RouteCategory, RouteKey};
///
/// let mut ledger = RatingLedger::default();
/// let key = RouteKey::new("MG Road", "Indiranagar", RouteCategory::Red);
/// ledger.record(key.clone(), CommunityRating::try_from(1).expect("valid rating"));
///
/// assert_eq!(ledger.adjustment(&key), -10);
/// assert_eq!(ledger.adjusted_score(&key, 63), 53);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RatingLedger {
    adjustments: HashMap<RouteKey, i32>,
}

impl RatingLedger {
    /// Add `rating` to the adjustment for `key`, returning the new total.
    pub fn record(&mut self, key: RouteKey, rating: CommunityRating) -> i32 {
        let total = self.adjustments.entry(key).or_insert(0);
        *total = total.saturating_add(rating.score_delta());
        *total
    }

    /// Accumulated adjustment for `key`; zero when never rated.
    pub fn adjustment(&self, key: &RouteKey) -> i32 {
        self.adjustments.get(key).copied().unwrap_or(0)
    }

    /// Apply the adjustment for `key` to `score`, clamped to `0..=100`.
    pub fn adjusted_score(&self, key: &RouteKey, score: u8) -> u8 {
        let adjusted = (i32::from(score) + self.adjustment(key)).clamp(0, 100);
        u8::try_from(adjusted).unwrap_or(score)
    }

    /// Rewrite the safety score of every route in `routes` rated between
    /// `start` and `end`.
    pub fn apply(&self, start: &str, end: &str, routes: &mut [ScoredRoute]) {
        for route in routes {
            let key = RouteKey::new(start, end, route.category);
            route.safety_score = self.adjusted_score(&key, route.safety_score);
        }
    }

    /// Number of rated routes.
    pub fn len(&self) -> usize {
        self.adjustments.len()
    }

    /// Whether no route has been rated.
    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::{fixture, rstest};

    use crate::test_support::straight_route;

    #[fixture]
    fn key() -> RouteKey {
        RouteKey::new("Koramangala", "Whitefield", RouteCategory::Green)
    }

    fn rating(stars: u8) -> CommunityRating {
        CommunityRating::try_from(stars).expect("valid rating")
    }

    #[rstest]
    #[case(1, -10)]
    #[case(2, -8)]
    #[case(3, 0)]
    #[case(4, 3)]
    #[case(5, 5)]
    fn maps_stars_to_delta(#[case] stars: u8, #[case] delta: i32) {
        assert_eq!(rating(stars).score_delta(), delta);
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    fn rejects_out_of_range(#[case] stars: u8) {
        assert_eq!(
            CommunityRating::try_from(stars),
            Err(RatingError::OutOfRange(stars))
        );
    }

    #[rstest]
    fn accumulates_ratings(key: RouteKey) {
        let mut ledger = RatingLedger::default();
        ledger.record(key.clone(), rating(5));
        let total = ledger.record(key.clone(), rating(4));

        assert_eq!(total, 8);
        assert_eq!(ledger.adjustment(&key), 8);
        assert_eq!(ledger.len(), 1);
    }

    #[rstest]
    #[case::upper(98, 5, 100)]
    #[case::lower(5, 1, 0)]
    fn clamps_adjusted_scores(
        key: RouteKey,
        #[case] score: u8,
        #[case] stars: u8,
        #[case] expected: u8,
    ) {
        let mut ledger = RatingLedger::default();
        ledger.record(key.clone(), rating(stars));
        assert_eq!(ledger.adjusted_score(&key, score), expected);
    }

    #[rstest]
    fn keys_are_distinct_per_category(key: RouteKey) {
        let mut ledger = RatingLedger::default();
        ledger.record(key, rating(1));
        let other = RouteKey::new("Koramangala", "Whitefield", RouteCategory::Red);
        assert_eq!(ledger.adjustment(&other), 0);
    }

    #[test]
    fn applies_to_scored_routes() {
        let start = Coord { x: 0.0, y: 0.0 };
        let end = Coord { x: 0.1, y: 0.0 };
        let candidate = straight_route(start, end, 1_000.0, 120.0);
        let mut routes = vec![
            ScoredRoute::from_candidate(RouteCategory::Green, &candidate, 83),
            ScoredRoute::from_candidate(RouteCategory::Red, &candidate, 63),
        ];
        let mut ledger = RatingLedger::default();
        ledger.record(RouteKey::new("A", "B", RouteCategory::Red), rating(2));

        ledger.apply("A", "B", &mut routes);

        let scores: Vec<u8> = routes.iter().map(|r| r.safety_score).collect();
        assert_eq!(scores, vec![83, 55]);
    }

    #[test]
    fn key_display_matches_ledger_format() {
        let key = RouteKey::new("A", "B", RouteCategory::Yellow);
        assert_eq!(key.to_string(), "A->B:yellow");
    }
}
