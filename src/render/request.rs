use crate::foundation::core::{Affine, Point, Rgb8};

/// Kind of quad a record was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuadKind {
    /// Flat color fill.
    Color,
    /// Image pattern fill.
    Image,
}

/// Fill paint of a record.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    /// No fill.
    None,
    /// Solid display color.
    Solid(Rgb8),
    /// Reference to a [`PatternDef`] by id.
    Pattern(String),
}

impl std::fmt::Display for Fill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fill::None => f.write_str("none"),
            Fill::Solid(c) => write!(f, "{c}"),
            Fill::Pattern(id) => write!(f, "url(#{id})"),
        }
    }
}

/// Per-record style, computed eagerly when the request is built.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RecordStyle {
    /// Fill paint.
    pub fill: Fill,
    /// Stroke paint; quads are never stroked, so this is `None` for built records.
    pub stroke: Option<Rgb8>,
    /// Fill opacity in `[0, 1]`.
    pub fill_opacity: f64,
}

/// One drawable quad in display space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderRecord {
    /// Fill kind.
    pub kind: QuadKind,
    /// Index of the datum the quad came from.
    pub idx: usize,
    /// Projected corners in quad order (ll, lr, ul, ur).
    pub corners: [Point; 4],
    /// Outline in drawing order: corners 0, 1, 3, 2.
    pub points: [Point; 4],
    /// Unit-square to display transform; image records only.
    pub transform: Option<Affine>,
    /// Paint.
    pub style: RecordStyle,
}

impl RenderRecord {
    /// Outline as an SVG `points` attribute value: `"x,y x,y x,y x,y"`.
    pub fn points_attr(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Image element placed inside a pattern, stretched over the unit square.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PatternImage {
    /// Image reference.
    pub href: String,
}

/// Repeatable image fill for one image quad.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PatternDef {
    /// Pattern id, unique within the document: `"{feature_id}-img-{idx}"`.
    pub id: String,
    /// Index of the datum the quad came from.
    pub idx: usize,
    /// Pattern transform (unit square to display space).
    pub transform: Affine,
    /// Image to draw; `None` leaves the pattern empty.
    pub image: Option<PatternImage>,
}

impl PatternDef {
    /// Pattern transform as an SVG attribute value: `"matrix(a b c d e f)"`.
    pub fn transform_attr(&self) -> String {
        let c = self.transform.as_coeffs();
        format!(
            "matrix({} {} {} {} {} {})",
            c[0], c[1], c[2], c[3], c[4], c[5]
        )
    }
}

/// Declarative draw package produced by one feature build.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawRequest {
    /// Id of the feature that built the request.
    pub feature_id: String,
    /// Class attached to the feature's drawn elements.
    pub class: String,
    /// Records in paint order: color quads, then image quads.
    pub records: Vec<RenderRecord>,
    /// Pattern definitions referenced by image records.
    pub patterns: Vec<PatternDef>,
}

impl DrawRequest {
    /// Find a pattern definition by id.
    pub fn pattern(&self, id: &str) -> Option<&PatternDef> {
        self.patterns.iter().find(|p| p.id == id)
    }
}

/// Pattern id for the image quad built from datum `idx`.
pub fn pattern_id(feature_id: &str, idx: usize) -> String {
    format!("{feature_id}-img-{idx}")
}
