//! Parsing for coordinate and bounding-box options.

use geo::{Coord, Rect};
use saferoute_core::bounds::BoxEdges;

use crate::CliError;

/// Parse a `lat,lng` pair into a coordinate with `x = lng` and `y = lat`.
pub(crate) fn parse_lat_lng(field: &'static str, value: &str) -> Result<Coord<f64>, CliError> {
    let invalid = || CliError::InvalidCoordinate {
        field,
        value: value.to_owned(),
    };
    let [lat, lng] = parse_numbers::<2>(value).ok_or_else(invalid)?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(invalid());
    }
    Ok(Coord { x: lng, y: lat })
}

/// Parse `south,west,north,east` into a rectangle.
pub(crate) fn parse_bbox(field: &'static str, value: &str) -> Result<Rect<f64>, CliError> {
    let invalid = || CliError::InvalidBoundingBox {
        field,
        value: value.to_owned(),
    };
    let [south, west, north, east] = parse_numbers::<4>(value).ok_or_else(invalid)?;
    let in_range = [south, north].iter().all(|lat| (-90.0..=90.0).contains(lat))
        && [west, east].iter().all(|lng| (-180.0..=180.0).contains(lng));
    if !in_range {
        return Err(invalid());
    }
    Ok(BoxEdges {
        south,
        west,
        north,
        east,
    }
    .to_rect())
}

fn parse_numbers<const N: usize>(value: &str) -> Option<[f64; N]> {
    let mut numbers = [0.0; N];
    let mut parts = value.split(',');
    for slot in &mut numbers {
        let number: f64 = parts.next()?.trim().parse().ok()?;
        if !number.is_finite() {
            return None;
        }
        *slot = number;
    }
    parts.next().is_none().then_some(numbers)
}
