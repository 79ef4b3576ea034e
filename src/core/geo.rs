use crate::domain::model::StrandingRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// An axis-aligned latitude/longitude rectangle framing the map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// Fallback viewport over the Oceania region, used when nothing is mappable.
pub const OCEANIA_DEFAULT_BOUNDS: Bounds = Bounds::from_corners(
    LatLng::new(-30.0, 150.0),
    LatLng::new(-5.0, 190.0),
);

impl Bounds {
    pub const fn from_corners(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south: south_west.lat,
            west: south_west.lng,
            north: north_east.lat,
            east: north_east.lng,
        }
    }

    /// A degenerate rectangle at a single point.
    pub const fn from_point(point: LatLng) -> Self {
        Self::from_corners(point, point)
    }

    pub fn extend(self, point: LatLng) -> Self {
        Self {
            south: self.south.min(point.lat),
            west: self.west.min(point.lng),
            north: self.north.max(point.lat),
            east: self.east.max(point.lng),
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }

    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.south, self.west)
    }

    pub fn north_east(&self) -> LatLng {
        LatLng::new(self.north, self.east)
    }
}

/// Validated position of a record, or `None` if it cannot be plotted.
///
/// Both decimal coordinates must be present and finite, latitude within
/// [-90, 90] and longitude within [-180, 180].
pub fn position(record: &StrandingRecord) -> Option<LatLng> {
    let lat = record.decimal_latitude?;
    let lng = record.decimal_longitude?;
    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return None;
    }
    Some(LatLng::new(lat, lng))
}

pub fn is_mappable(record: &StrandingRecord) -> bool {
    position(record).is_some()
}

pub fn mappable_records<'a, I>(records: I) -> Vec<&'a StrandingRecord>
where
    I: IntoIterator<Item = &'a StrandingRecord>,
{
    records.into_iter().filter(|r| is_mappable(r)).collect()
}

/// Smallest rectangle covering every mappable record, seeded at the first one.
/// Falls back to [`OCEANIA_DEFAULT_BOUNDS`] when none are mappable.
pub fn bounds_for<'a, I>(records: I) -> Bounds
where
    I: IntoIterator<Item = &'a StrandingRecord>,
{
    let mut points = records.into_iter().filter_map(position);
    match points.next() {
        Some(first) => points.fold(Bounds::from_point(first), Bounds::extend),
        None => OCEANIA_DEFAULT_BOUNDS,
    }
}

/// Count shown next to the map: records whose decimal coordinates are both
/// present and non-zero. No range check is applied here.
pub fn tagged_location_count<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a StrandingRecord>,
{
    records
        .into_iter()
        .filter(|r| {
            matches!(
                (r.decimal_latitude, r.decimal_longitude),
                (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0
            )
        })
        .count()
}

/// Popup payload for one plotted stranding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub position: LatLng,
    pub species: String,
    pub location: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapViewport {
    pub bounds: Bounds,
    pub center: LatLng,
    pub markers: Vec<MapMarker>,
}

pub fn viewport<'a, I>(records: I) -> MapViewport
where
    I: IntoIterator<Item = &'a StrandingRecord>,
{
    let markers: Vec<MapMarker> = records
        .into_iter()
        .filter_map(|r| {
            position(r).map(|p| MapMarker {
                position: p,
                species: r.species.clone(),
                location: r.location.clone(),
                year: r.year.clone(),
            })
        })
        .collect();

    let bounds = match markers.split_first() {
        Some((first, rest)) => rest
            .iter()
            .fold(Bounds::from_point(first.position), |b, m| b.extend(m.position)),
        None => OCEANIA_DEFAULT_BOUNDS,
    };

    tracing::debug!("Map viewport covers {} markers", markers.len());
    MapViewport {
        center: bounds.center(),
        bounds,
        markers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: Option<f64>, lng: Option<f64>) -> StrandingRecord {
        StrandingRecord {
            species: "Kogia sima".into(),
            decimal_latitude: lat,
            decimal_longitude: lng,
            ..Default::default()
        }
    }

    #[test]
    fn test_latitude_out_of_range_is_excluded() {
        assert!(!is_mappable(&at(Some(95.0), Some(100.0))));
    }

    #[test]
    fn test_longitude_past_antimeridian_is_excluded() {
        assert!(!is_mappable(&at(Some(-20.0), Some(185.0))));
        assert!(is_mappable(&at(Some(-20.0), Some(180.0))));
    }

    #[test]
    fn test_missing_longitude_is_excluded() {
        assert!(!is_mappable(&at(Some(-20.0), None)));
        assert!(!is_mappable(&at(None, Some(170.0))));
    }

    #[test]
    fn test_non_finite_is_excluded() {
        assert!(!is_mappable(&at(Some(f64::NAN), Some(170.0))));
    }

    #[test]
    fn test_bounds_cover_all_valid_points() {
        let records = vec![
            at(Some(-10.0), Some(170.0)),
            at(Some(-5.0), Some(175.0)),
            at(Some(99.0), Some(0.0)),
        ];
        let b = bounds_for(&records);
        assert!(b.south <= -10.0 && b.north >= -5.0);
        assert!(b.west <= 170.0 && b.east >= 175.0);
        assert_eq!(b, Bounds { south: -10.0, west: 170.0, north: -5.0, east: 175.0 });
        assert_eq!(b.center(), LatLng::new(-7.5, 172.5));
    }

    #[test]
    fn test_bounds_default_when_nothing_valid() {
        let records = vec![at(None, None), at(Some(120.0), Some(10.0))];
        assert_eq!(bounds_for(&records), OCEANIA_DEFAULT_BOUNDS);
        assert_eq!(OCEANIA_DEFAULT_BOUNDS.south_west(), LatLng::new(-30.0, 150.0));
        assert_eq!(OCEANIA_DEFAULT_BOUNDS.north_east(), LatLng::new(-5.0, 190.0));
    }

    #[test]
    fn test_single_point_bounds_are_degenerate() {
        let records = vec![at(Some(-17.0), Some(178.0))];
        let b = bounds_for(&records);
        assert_eq!(b.center(), LatLng::new(-17.0, 178.0));
        assert!(b.contains(LatLng::new(-17.0, 178.0)));
    }

    #[test]
    fn test_viewport_markers_and_center() {
        let records = vec![
            at(Some(-10.0), Some(170.0)),
            at(None, Some(1.0)),
            at(Some(-20.0), Some(160.0)),
        ];
        let view = viewport(&records);
        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.bounds, bounds_for(&records));
        assert_eq!(view.center, LatLng::new(-15.0, 165.0));
        assert_eq!(view.markers[0].species, "Kogia sima");
    }

    #[test]
    fn test_empty_viewport_uses_default() {
        let view = viewport(Vec::<&StrandingRecord>::new());
        assert!(view.markers.is_empty());
        assert_eq!(view.bounds, OCEANIA_DEFAULT_BOUNDS);
        assert_eq!(view.center, LatLng::new(-17.5, 170.0));
    }

    #[test]
    fn test_tagged_location_count_ignores_zero_and_range() {
        let records = vec![
            at(Some(0.0), Some(170.0)),
            at(Some(95.0), Some(100.0)),
            at(Some(-10.0), None),
            at(Some(-10.0), Some(170.0)),
        ];
        assert_eq!(tagged_location_count(&records), 2);
        assert_eq!(mappable_records(&records).len(), 2);
    }
}
