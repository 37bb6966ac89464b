pub mod client;
pub mod format;
pub mod models;

pub use client::{LookupError, MaskApi, StoreLookup};

pub const DEFAULT_RADIUS: u32 = 500;
pub const MIN_RADIUS: u32 = 1;
pub const MAX_RADIUS: u32 = 5000;

// Area covered by the public mask API (South Korea).
const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = 33.0..=43.0;
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = 124.0..=132.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
}

impl SearchRequest {
    /// Returns `None` when the coordinates fall outside the API's coverage.
    pub fn new(latitude: f64, longitude: f64, radius: u32) -> Option<Self> {
        is_supported(latitude, longitude).then_some(Self {
            latitude,
            longitude,
            radius,
        })
    }
}

pub fn is_supported(latitude: f64, longitude: f64) -> bool {
    LATITUDE_RANGE.contains(&latitude) && LONGITUDE_RANGE.contains(&longitude)
}
