pub use kurbo::{Affine, Point, Vec2};

/// Geographic coordinate.
///
/// For map views `x` is longitude and `y` latitude, both in degrees. `z` is carried through
/// projection untouched by the built-in projectors.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoCoord {
    /// Longitude (or planar x).
    pub x: f64,
    /// Latitude (or planar y).
    pub y: f64,
    /// Elevation; defaults to 0.
    #[serde(default)]
    pub z: f64,
}

impl GeoCoord {
    /// Create a coordinate.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a coordinate on the `z = 0` plane.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Return `true` when all components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Normalized RGB color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Rgb {
    /// Opaque white, the default quad color.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a color from normalized components.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Scale to display bytes (`255 * c`, clamped, then truncated).
    pub fn to_rgb8(self) -> Rgb8 {
        fn to_u8(c: f64) -> u8 {
            if !c.is_finite() {
                return 0;
            }
            (c.clamp(0.0, 1.0) * 255.0).trunc() as u8
        }

        Rgb8 {
            r: to_u8(self.r),
            g: to_u8(self.g),
            b: to_u8(self.b),
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Display color in 8-bit sRGB channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
