use crate::{
    assets::images::ImageStore,
    foundation::core::{GeoCoord, Rgb},
    foundation::error::QuadResult,
    quad::model::{ColorQuad, ImageQuad, QuadSet},
};

/// Supplies the quads a feature draws.
pub trait QuadGeometrySource {
    /// Return `false` when the source has no way to place geometry; builds are skipped then.
    fn has_position(&self) -> bool;

    /// Produce the current set of quads. Called once per build.
    fn generate_quads(&self) -> QuadResult<QuadSet>;
}

/// Resolved corners of one quad.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuadCorners {
    /// Lower left.
    pub ll: GeoCoord,
    /// Lower right.
    pub lr: GeoCoord,
    /// Upper left.
    pub ul: GeoCoord,
    /// Upper right.
    pub ur: GeoCoord,
}

impl QuadCorners {
    /// Corners in quad order: ll, lr, ul, ur.
    pub fn to_pos(self) -> [GeoCoord; 4] {
        [self.ll, self.lr, self.ul, self.ur]
    }
}

/// One quad as authored in scene data.
///
/// Either all four corners are given, or `ul` and `lr` alone describe an axis-aligned rectangle.
/// A datum with `image` becomes an image quad, otherwise a color quad.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuadDatum {
    /// Upper-left corner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ul: Option<GeoCoord>,
    /// Upper-right corner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ur: Option<GeoCoord>,
    /// Lower-left corner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ll: Option<GeoCoord>,
    /// Lower-right corner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lr: Option<GeoCoord>,
    /// Fill color for color quads; falls back to the source style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    /// Fill opacity; falls back to the source style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Image reference, resolved through an [`ImageStore`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl QuadDatum {
    /// Axis-aligned rectangle from its upper-left and lower-right corners.
    pub fn rect(ul: GeoCoord, lr: GeoCoord) -> Self {
        Self {
            ul: Some(ul),
            lr: Some(lr),
            ..Self::default()
        }
    }

    /// Quad from four explicit corners.
    pub fn corners(ll: GeoCoord, lr: GeoCoord, ul: GeoCoord, ur: GeoCoord) -> Self {
        Self {
            ll: Some(ll),
            lr: Some(lr),
            ul: Some(ul),
            ur: Some(ur),
            ..Self::default()
        }
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the fill opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Turn this datum into an image quad.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Default position accessor: explicit corners, or a rectangle from `ul` + `lr`.
pub fn datum_corners(d: &QuadDatum) -> Option<QuadCorners> {
    let (ul, lr) = (d.ul?, d.lr?);
    Some(QuadCorners {
        ll: d.ll.unwrap_or(GeoCoord::new(ul.x, lr.y, ul.z)),
        ur: d.ur.unwrap_or(GeoCoord::new(lr.x, ul.y, ul.z)),
        ul,
        lr,
    })
}

/// Extracts corners from a datum; `None` skips the datum.
pub type PositionFn = fn(&QuadDatum) -> Option<QuadCorners>;

/// Style applied to data that does not set its own.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuadStyle {
    /// Default fill color.
    #[serde(default)]
    pub color: Rgb,
    /// Default fill opacity.
    #[serde(default = "one")]
    pub opacity: f64,
}

fn one() -> f64 {
    1.0
}

impl Default for QuadStyle {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            opacity: 1.0,
        }
    }
}

/// Quad source backed by a list of [`QuadDatum`] values.
#[derive(Clone, Debug)]
pub struct DatumQuadSource {
    data: Vec<QuadDatum>,
    style: QuadStyle,
    position: Option<PositionFn>,
    images: ImageStore,
}

impl DatumQuadSource {
    /// Source using [`datum_corners`] as position accessor and no images.
    pub fn new(data: Vec<QuadDatum>) -> Self {
        Self {
            data,
            style: QuadStyle::default(),
            position: Some(datum_corners),
            images: ImageStore::new(),
        }
    }

    /// Replace the image store.
    pub fn with_images(mut self, images: ImageStore) -> Self {
        self.images = images;
        self
    }

    /// Replace the default style.
    pub fn with_style(mut self, style: QuadStyle) -> Self {
        self.style = style;
        self
    }

    /// Current data.
    pub fn data(&self) -> &[QuadDatum] {
        &self.data
    }

    /// Replace the data.
    pub fn set_data(&mut self, data: Vec<QuadDatum>) {
        self.data = data;
    }

    /// Mutable access to the data.
    pub fn data_mut(&mut self) -> &mut Vec<QuadDatum> {
        &mut self.data
    }

    /// Default style.
    pub fn style(&self) -> QuadStyle {
        self.style
    }

    /// Replace the default style.
    pub fn set_style(&mut self, style: QuadStyle) {
        self.style = style;
    }

    /// Current position accessor.
    pub fn position(&self) -> Option<PositionFn> {
        self.position
    }

    /// Replace or clear the position accessor.
    pub fn set_position(&mut self, position: Option<PositionFn>) {
        self.position = position;
    }

    /// Image store used to resolve `image` references.
    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Mutable access to the image store.
    pub fn images_mut(&mut self) -> &mut ImageStore {
        &mut self.images
    }

    /// Image references used by the data, in data order.
    pub fn image_refs(&self) -> impl Iterator<Item = &str> {
        self.data.iter().filter_map(|d| d.image.as_deref())
    }
}

impl QuadGeometrySource for DatumQuadSource {
    fn has_position(&self) -> bool {
        self.position.is_some()
    }

    fn generate_quads(&self) -> QuadResult<QuadSet> {
        let mut quads = QuadSet::default();
        let Some(position) = self.position else {
            return Ok(quads);
        };

        for (idx, d) in self.data.iter().enumerate() {
            let Some(corners) = position(d) else {
                tracing::warn!(idx, "quad datum has no resolvable corners; skipped");
                continue;
            };
            let pos = corners.to_pos();
            let opacity = d.opacity.unwrap_or(self.style.opacity).clamp(0.0, 1.0);

            match &d.image {
                Some(r) => quads.image_quads.push(ImageQuad {
                    idx,
                    pos,
                    image: self.images.get(r).cloned(),
                    opacity,
                }),
                None => quads.color_quads.push(ColorQuad {
                    idx,
                    pos,
                    color: d.color.unwrap_or(self.style.color),
                    opacity,
                }),
            }
        }

        Ok(quads)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/quad/source.rs"]
mod tests;
