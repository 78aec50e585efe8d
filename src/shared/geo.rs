use std::{
    cmp,
    fmt::Display,
    ops::Sub,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;
/// Marker the profile and event backends store for "no location".
pub const SENTINEL: f64 = -999.0;

const METERS_PER_MILE: f64 = 1609.344;
const KILOMETERS_PER_MILE: f64 = 1.609_344;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("Latitude {0} is outside of -90..=90")]
    InvalidLatitude(f64),
    #[error("Longitude {0} is outside of -180..=180")]
    InvalidLongitude(f64),
}

/// A distance stored in statute miles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Sub for Distance {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:.2} mi", self.0))
    }
}

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    pub const fn from_miles(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance / KILOMETERS_PER_MILE)
    }

    pub const fn from_meters(distance: f64) -> Self {
        Self(distance / METERS_PER_MILE)
    }

    pub const fn as_miles(&self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0 * KILOMETERS_PER_MILE
    }

    pub const fn as_meters(&self) -> f64 {
        self.0 * METERS_PER_MILE
    }
}

impl From<u32> for Distance {
    fn from(miles: u32) -> Self {
        Self::from_miles(miles as f64)
    }
}

/// A point on the earth's surface.
///
/// The fields can only be set through [`Coordinate::new`] and friends, so a
/// `Coordinate` in hand is always within range. Missing or sentinel values
/// live on as `Option<Coordinate>::None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize, Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = Error;

    fn try_from(value: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(value.latitude, value.longitude)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(value: Coordinate) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = Error;

    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

/// Returns true if the pair is a usable coordinate.
///
/// This is the only place that decides what counts as a real location,
/// whether the values came from a stored profile or from a geocoder.
/// NaN fails both comparisons and is rejected along with the `-999` sentinel.
pub fn is_valid(latitude: f64, longitude: f64) -> bool {
    latitude.abs() <= 90.0 && longitude.abs() <= 180.0
}

/// Great-circle distance between two coordinates in statute miles.
pub fn haversine_miles(a: &Coordinate, b: &Coordinate) -> f64 {
    let dist_lat = f64::to_radians(b.latitude - a.latitude);
    let dist_lon = f64::to_radians(b.longitude - a.longitude);
    let h = f64::powi(f64::sin(dist_lat / 2.0), 2)
        + f64::cos(f64::to_radians(a.latitude))
            * f64::cos(f64::to_radians(b.latitude))
            * f64::powi(f64::sin(dist_lon / 2.0), 2);
    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * f64::atan2(f64::sqrt(h), f64::sqrt(1.0 - h));
    EARTH_RADIUS_MILES * c
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if latitude.is_nan() || latitude.abs() > 90.0 {
            return Err(Error::InvalidLatitude(latitude));
        }
        if longitude.is_nan() || longitude.abs() > 180.0 {
            return Err(Error::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Converts nullable storage fields into a coordinate.
    /// Absent, sentinel and out of range values all come back as `None`.
    pub fn from_raw(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        let (latitude, longitude) = (latitude?, longitude?);
        if is_valid(latitude, longitude) {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn distance(&self, coord: &Self) -> Distance {
        Distance::from_miles(haversine_miles(self, coord))
    }
}

#[test]
fn distance_test() {
    let coord_a = Coordinate::new(48.85800943005911, 2.3514350059357927).unwrap();
    let coord_b = Coordinate::new(51.5052389927712, -0.12495407345099824).unwrap();
    let d = coord_a.distance(&coord_b);
    assert!((d.as_kilometers() - 343.0).abs() < 5.0);
}

#[test]
fn distance_eq_test() {
    let dist_a = Distance::from_meters(1609.344);
    let dist_b = Distance::from_miles(1.0);
    assert!((dist_a.as_miles() - dist_b.as_miles()).abs() < 1e-12)
}

#[test]
fn distance_cmp_test() {
    let dist_a = Distance::from_miles(1.0);
    let dist_b = Distance::from_kilometers(1.0);
    assert!(dist_a > dist_b)
}

#[test]
fn display_test() {
    assert_eq!(Distance::from_miles(3.14159).to_string(), "3.14 mi");
    let coord = Coordinate::new(45.5, -122.5).unwrap();
    assert_eq!(coord.to_string(), "45.5, -122.5");
}

#[test]
fn sentinel_is_not_a_coordinate() {
    assert!(!is_valid(SENTINEL, 10.0));
    assert!(!is_valid(10.0, SENTINEL));
    assert!(Coordinate::from_raw(Some(SENTINEL), Some(SENTINEL)).is_none());
    assert!(Coordinate::from_raw(None, Some(10.0)).is_none());
    assert!(Coordinate::from_raw(Some(f64::NAN), Some(10.0)).is_none());
}

#[test]
fn boundaries_are_valid() {
    assert!(is_valid(90.0, 180.0));
    assert!(is_valid(-90.0, -180.0));
    assert!(!is_valid(90.000_001, 0.0));
    assert_eq!(
        Coordinate::new(0.0, 180.5),
        Err(Error::InvalidLongitude(180.5))
    );
}
