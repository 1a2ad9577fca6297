use crate::foundation::core::{GeoCoord, Rgb};

/// A loadable image backing an image quad.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageResource {
    /// Reference written into the pattern image element. Empty means "nothing to draw".
    pub src: String,
    /// Decoded width in pixels, when known.
    #[serde(default)]
    pub width: Option<u32>,
    /// Decoded height in pixels, when known.
    #[serde(default)]
    pub height: Option<u32>,
}

impl ImageResource {
    /// Resource with an unknown pixel size.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            width: None,
            height: None,
        }
    }

    /// Return `true` when the resource has something to draw.
    pub fn has_src(&self) -> bool {
        !self.src.is_empty()
    }
}

/// Flat-colored quad.
///
/// `pos` is ordered ll, lr, ul, ur: the boundary is traced by corners 0, 1, 3, 2.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorQuad {
    /// Index of the datum that produced this quad.
    pub idx: usize,
    /// Corners in geographic space.
    pub pos: [GeoCoord; 4],
    /// Fill color.
    pub color: Rgb,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Image-textured quad. Skipped for rendering while `image` is `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageQuad {
    /// Index of the datum that produced this quad.
    pub idx: usize,
    /// Corners in geographic space, same layout as [`ColorQuad::pos`].
    pub pos: [GeoCoord; 4],
    /// Image to map onto the quad, if available.
    pub image: Option<ImageResource>,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
}

/// All quads produced by one `generate_quads` call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuadSet {
    /// Color-filled quads.
    pub color_quads: Vec<ColorQuad>,
    /// Image-filled quads, including those whose image is not available.
    pub image_quads: Vec<ImageQuad>,
}

impl QuadSet {
    /// Total number of quads of both kinds.
    pub fn len(&self) -> usize {
        self.color_quads.len() + self.image_quads.len()
    }

    /// Return `true` when there are no quads.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
