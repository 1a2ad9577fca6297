use std::f64::consts::PI;

use crate::{
    foundation::core::{GeoCoord, Point},
    foundation::error::{QuadError, QuadResult},
    geo::projector::Projector,
};

/// Largest latitude representable in Web Mercator, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Tile edge length in pixels at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Serializable map view settings.
pub struct MapViewConfig {
    /// View center; `x` is longitude, `y` latitude.
    pub center: GeoCoord,
    /// Zoom level; the world is `256 * 2^zoom` pixels wide.
    #[serde(default)]
    pub zoom: f64,
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
}

impl MapViewConfig {
    /// Validate view settings.
    pub fn validate(&self) -> QuadResult<()> {
        if !self.center.is_finite() {
            return Err(QuadError::validation("view center must be finite"));
        }
        if self.center.y.abs() > MAX_LATITUDE {
            return Err(QuadError::validation(format!(
                "view center latitude must be within +/-{MAX_LATITUDE}"
            )));
        }
        if !self.zoom.is_finite() || !(0.0..=30.0).contains(&self.zoom) {
            return Err(QuadError::validation("view zoom must be finite and in [0, 30]"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(QuadError::validation("view width/height must be > 0"));
        }
        Ok(())
    }
}

/// Web Mercator map view: geographic degrees to viewport pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    config: MapViewConfig,
    center_world: Point,
}

impl MapView {
    /// Create a validated view.
    pub fn new(config: MapViewConfig) -> QuadResult<Self> {
        config.validate()?;
        let center_world = world_point(config.center, config.zoom)?;
        Ok(Self {
            config,
            center_world,
        })
    }

    /// Settings this view was built from.
    pub fn config(&self) -> &MapViewConfig {
        &self.config
    }

    /// Viewport size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

impl Projector for MapView {
    fn project(&self, coord: GeoCoord) -> QuadResult<Point> {
        let w = world_point(coord, self.config.zoom)?;
        Ok(Point::new(
            w.x - self.center_world.x + f64::from(self.config.width) / 2.0,
            w.y - self.center_world.y + f64::from(self.config.height) / 2.0,
        ))
    }
}

/// World pixel position of `coord` at `zoom`; (0, 0) is the north-west corner of the world.
fn world_point(coord: GeoCoord, zoom: f64) -> QuadResult<Point> {
    if !coord.x.is_finite() || !coord.y.is_finite() {
        return Err(QuadError::projection(format!(
            "coordinate ({}, {}) is not finite",
            coord.x, coord.y
        )));
    }
    if coord.y.abs() > MAX_LATITUDE {
        return Err(QuadError::projection(format!(
            "latitude {} is outside the Web Mercator range",
            coord.y
        )));
    }

    let scale = TILE_SIZE * zoom.exp2();
    let lat = coord.y.to_radians();
    let x = (coord.x + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
    Ok(Point::new(x, y))
}

#[cfg(test)]
#[path = "../../tests/unit/geo/mercator.rs"]
mod tests;
