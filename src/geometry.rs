// geometry.rs
use bevy::math::{DVec2, Vec2};
use std::f64::consts::PI;

const TILE_SIZE: f64 = 256.0;
// Keeps Mercator finite near the poles
const MAX_SIN_LAT: f64 = 0.9999;

// Degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Even-odd containment test over a ring that is implicitly closed (last
/// vertex connects back to the first). Points exactly on an edge may fall
/// either way.
pub fn polygon_contains(point: LatLng, polygon: &[LatLng]) -> bool {
    if polygon.len() < 3 || !point.is_finite() {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let crossing_lng = a.lng + (point.lat - a.lat) * (b.lng - a.lng) / (b.lat - a.lat);
            if point.lng < crossing_lng {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

// Lies inside every convex footprint
#[cfg(test)]
pub fn vertex_centroid(polygon: &[LatLng]) -> Option<LatLng> {
    if polygon.is_empty() {
        return None;
    }
    let n = polygon.len() as f64;
    let (lat, lng) = polygon
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    Some(LatLng::new(lat / n, lng / n))
}

// Web-Mercator at a fixed zoom with `origin` at the world origin.
// Map pixels grow right and down, world units right and up.
#[derive(Debug, Clone, Copy)]
pub struct MapProjection {
    scale: f64,
    origin_px: DVec2,
}

impl MapProjection {
    pub fn new(origin: LatLng, zoom: u8) -> Self {
        let scale = TILE_SIZE * f64::from(1u32 << zoom.min(22));
        let mut projection = Self {
            scale,
            origin_px: DVec2::ZERO,
        };
        projection.origin_px = projection.geo_to_pixel(origin);
        projection
    }

    pub fn geo_to_pixel(&self, at: LatLng) -> DVec2 {
        let sin_lat = at.lat.to_radians().sin().clamp(-MAX_SIN_LAT, MAX_SIN_LAT);
        let x = (at.lng + 180.0) / 360.0 * self.scale;
        let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * self.scale;
        DVec2::new(x, y)
    }

    pub fn pixel_to_geo(&self, px: DVec2) -> LatLng {
        let lng = px.x / self.scale * 360.0 - 180.0;
        let n = PI - 2.0 * PI * px.y / self.scale;
        let lat = n.sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }

    pub fn geo_to_world(&self, at: LatLng) -> Vec2 {
        let px = self.geo_to_pixel(at) - self.origin_px;
        Vec2::new(px.x as f32, -px.y as f32)
    }

    pub fn world_to_geo(&self, world: Vec2) -> LatLng {
        let px = self.origin_px + DVec2::new(f64::from(world.x), -f64::from(world.y));
        self.pixel_to_geo(px)
    }
}
