//! Area safety scoring from amenity densities.
//!
//! The area base score rewards police, hospital and fuel-station density
//! along the straight line between two endpoints. Each [`RouteCategory`]
//! then derives its own score from that base.
//!
//! ```text
//! density(n)  = n / max(1, span_km)
//! score       = 30 + min(40, 15·police) + min(20, 10·hospital) + min(20, 5·fuel)
//! area score  = clamp(round(score), 20, 98)
//! ```

use crate::RouteCategory;

/// Area score used when no amenity lookup succeeds.
pub const DEFAULT_AREA_SCORE: u8 = 50;

const BASE: f64 = 30.0;
const MIN_SPAN_KM: f64 = 1.0;
const MIN_AREA_SCORE: f64 = 20.0;
const MAX_AREA_SCORE: f64 = 98.0;

/// Amenity counts and route span feeding the area score.
///
/// # Examples
/// ```
/// use saferoute_core::AreaSafetyContext;
///
/// let context = AreaSafetyContext::new(4, 2, 3, 2.0);
/// assert_eq!(context.base_score(), 78);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSafetyContext {
    /// Police stations in the padded area.
    pub police_count: u32,
    /// Hospitals in the padded area.
    pub hospital_count: u32,
    /// Fuel stations in the padded area.
    pub busy_count: u32,
    /// Great-circle distance between the endpoints in kilometres.
    pub route_span_km: f64,
}

impl AreaSafetyContext {
    /// Bundle counts and span into a context.
    pub const fn new(
        police_count: u32,
        hospital_count: u32,
        busy_count: u32,
        route_span_km: f64,
    ) -> Self {
        Self {
            police_count,
            hospital_count,
            busy_count,
            route_span_km,
        }
    }

    /// Compute the area base score in `20..=98`.
    ///
    /// Spans under one kilometre, and non-finite spans, count as one
    /// kilometre.
    pub fn base_score(&self) -> u8 {
        let span = if self.route_span_km.is_finite() {
            self.route_span_km.max(MIN_SPAN_KM)
        } else {
            MIN_SPAN_KM
        };
        let density = |count: u32| f64::from(count) / span;
        let score = BASE
            + (density(self.police_count) * 15.0).min(40.0)
            + (density(self.hospital_count) * 10.0).min(20.0)
            + (density(self.busy_count) * 5.0).min(20.0);
        clamp_to_score(score.round().clamp(MIN_AREA_SCORE, MAX_AREA_SCORE))
    }
}

/// Derive the score shown for `category` from an area base score.
///
/// - green: `min(100, base + 5)`
/// - yellow: `base`, less 10 below 60, clamped to `20..=100`
/// - red: `base - 15`, clamped to `10..=100`
///
/// # Examples
/// ```
/// use saferoute_core::RouteCategory;
/// use saferoute_core::safety::category_score;
///
/// assert_eq!(category_score(RouteCategory::Green, 78), 83);
/// assert_eq!(category_score(RouteCategory::Yellow, 55), 45);
/// assert_eq!(category_score(RouteCategory::Red, 78), 63);
/// ```
pub fn category_score(category: RouteCategory, area_base_score: u8) -> u8 {
    let base = i16::from(area_base_score);
    let score = match category {
        RouteCategory::Green => (base + 5).min(100),
        RouteCategory::Yellow => {
            let penalised = if base < 60 { base - 10 } else { base };
            penalised.clamp(20, 100)
        }
        RouteCategory::Red => (base - 15).clamp(10, 100),
    };
    u8::try_from(score.clamp(0, 100)).unwrap_or(DEFAULT_AREA_SCORE)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped into 0..=100 before the cast"
)]
fn clamp_to_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0) as u8
}
