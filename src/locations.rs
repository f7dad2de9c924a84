// locations.rs
// Footprints are approximate, good enough for gameplay

use crate::geometry::LatLng;
use thiserror::Error;

// Index into the static table
pub type LocationId = usize;

#[derive(Debug, Clone)]
pub struct Location {
    pub name: String,
    pub prompt: String,
    pub polygon: Vec<LatLng>,
}

#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("footprint for {name} has {count} vertices, at least 3 are required")]
    TooFewVertices { name: String, count: usize },

    #[error("footprint for {name} has a non-finite vertex at position {index}")]
    NonFiniteVertex { name: String, index: usize },
}

impl Location {
    pub fn new(name: &str, prompt: &str, polygon: &[(f64, f64)]) -> Self {
        Self {
            name: name.to_string(),
            prompt: prompt.to_string(),
            polygon: polygon
                .iter()
                .map(|&(lat, lng)| LatLng::new(lat, lng))
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), LocationError> {
        if self.polygon.len() < 3 {
            return Err(LocationError::TooFewVertices {
                name: self.name.clone(),
                count: self.polygon.len(),
            });
        }
        if let Some(index) = self.polygon.iter().position(|p| !p.is_finite()) {
            return Err(LocationError::NonFiniteVertex {
                name: self.name.clone(),
                index,
            });
        }
        Ok(())
    }
}

// Default map center, nudged south so the whole campus fits the window.
pub const CAMPUS_CENTER: LatLng = LatLng::new(34.2390, -118.5285);
pub const CAMPUS_ZOOM: u8 = 17;

pub fn campus_locations() -> Vec<Location> {
    vec![
        Location::new(
            "University Library",
            "Find the University Library.",
            &[
                (34.24045, -118.53005),
                (34.24045, -118.52860),
                (34.23950, -118.52860),
                (34.23950, -118.53005),
            ],
        ),
        Location::new(
            "Jacaranda Hall (Engineering)",
            "Find Jacaranda Hall.",
            &[
                (34.24220, -118.52955),
                (34.24220, -118.52780),
                (34.24100, -118.52780),
                (34.24100, -118.52955),
            ],
        ),
        Location::new(
            "Student Recreation Center",
            "Find the Student Recreation Center.",
            &[
                (34.24065, -118.52515),
                (34.24065, -118.52470),
                (34.23930, -118.52470),
                (34.23930, -118.52515),
            ],
        ),
        Location::new(
            "Manzanita Hall",
            "Find Manzanita Hall.",
            &[
                (34.23785, -118.53150),
                (34.23785, -118.53090),
                (34.23735, -118.53090),
                (34.23735, -118.53150),
            ],
        ),
        Location::new(
            "Chapperall Hall",
            "Find Chapperall Hall.",
            &[
                (34.23865, -118.52720),
                (34.23865, -118.52670),
                (34.23785, -118.52670),
                (34.23785, -118.52720),
            ],
        ),
    ]
}

/// Drops malformed entries, returning them as errors for the caller to report.
pub fn validated(locations: Vec<Location>) -> (Vec<Location>, Vec<LocationError>) {
    let mut valid = Vec::with_capacity(locations.len());
    let mut errors = Vec::new();
    for location in locations {
        match location.validate() {
            Ok(()) => valid.push(location),
            Err(err) => errors.push(err),
        }
    }
    (valid, errors)
}
