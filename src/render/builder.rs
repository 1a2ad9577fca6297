use crate::{
    fit::affine::fit_unit_square,
    foundation::core::{GeoCoord, Point},
    foundation::error::QuadResult,
    geo::projector::Projector,
    quad::model::{ColorQuad, ImageQuad, QuadSet},
    render::request::{
        DrawRequest, Fill, PatternDef, PatternImage, QuadKind, RecordStyle, RenderRecord,
        pattern_id,
    },
};

/// Class attached to quad features unless overridden.
pub const QUAD_CLASS: &str = "geoquad-quad";

/// Borrowed view of either quad variant.
#[derive(Clone, Copy, Debug)]
pub enum QuadRef<'a> {
    /// Color quad.
    Color(&'a ColorQuad),
    /// Image quad.
    Image(&'a ImageQuad),
}

/// Style of the record built from `quad` within feature `feature_id`.
///
/// Color quads fill with their color; image quads reference their pattern, or nothing while the
/// image is missing. Quads are never stroked.
pub fn record_style(quad: QuadRef<'_>, feature_id: &str) -> RecordStyle {
    let (fill, opacity) = match quad {
        QuadRef::Color(q) => (Fill::Solid(q.color.to_rgb8()), q.opacity),
        QuadRef::Image(q) if q.image.is_some() => {
            (Fill::Pattern(pattern_id(feature_id, q.idx)), q.opacity)
        }
        QuadRef::Image(q) => (Fill::None, q.opacity),
    };
    RecordStyle {
        fill,
        stroke: None,
        fill_opacity: opacity.clamp(0.0, 1.0),
    }
}

/// Outline drawing order of projected corners: 0, 1, 3, 2.
pub fn outline(corners: &[Point; 4]) -> [Point; 4] {
    [corners[0], corners[1], corners[3], corners[2]]
}

/// Project all four corners, stopping at the first failure.
pub fn project_corners(pos: &[GeoCoord; 4], projector: &dyn Projector) -> QuadResult<[Point; 4]> {
    Ok([
        projector.project(pos[0])?,
        projector.project(pos[1])?,
        projector.project(pos[2])?,
        projector.project(pos[3])?,
    ])
}

/// Turns a [`QuadSet`] into a [`DrawRequest`].
#[derive(Clone, Copy, Debug)]
pub struct RenderDescriptorBuilder<'a> {
    feature_id: &'a str,
    class: &'a str,
}

impl<'a> RenderDescriptorBuilder<'a> {
    /// Builder for the feature `feature_id`, using [`QUAD_CLASS`].
    pub fn new(feature_id: &'a str) -> Self {
        Self {
            feature_id,
            class: QUAD_CLASS,
        }
    }

    /// Override the class attached to drawn elements.
    pub fn with_class(mut self, class: &'a str) -> Self {
        self.class = class;
        self
    }

    /// Project every drawable quad and package records and patterns.
    ///
    /// Image quads without an image are left out entirely. A projection failure aborts the whole
    /// request.
    #[tracing::instrument(skip(self, quads, projector), fields(feature = self.feature_id))]
    pub fn build(&self, quads: &QuadSet, projector: &dyn Projector) -> QuadResult<DrawRequest> {
        let mut records = Vec::with_capacity(quads.len());
        let mut patterns = Vec::with_capacity(quads.image_quads.len());

        for q in &quads.color_quads {
            let corners = project_corners(&q.pos, projector)?;
            records.push(RenderRecord {
                kind: QuadKind::Color,
                idx: q.idx,
                corners,
                points: outline(&corners),
                transform: None,
                style: record_style(QuadRef::Color(q), self.feature_id),
            });
        }

        let mut skipped = 0usize;
        for q in &quads.image_quads {
            let Some(image) = &q.image else {
                skipped += 1;
                continue;
            };
            let corners = project_corners(&q.pos, projector)?;
            let transform = fit_unit_square(&corners);
            records.push(RenderRecord {
                kind: QuadKind::Image,
                idx: q.idx,
                corners,
                points: outline(&corners),
                transform: Some(transform),
                style: record_style(QuadRef::Image(q), self.feature_id),
            });
            patterns.push(PatternDef {
                id: pattern_id(self.feature_id, q.idx),
                idx: q.idx,
                transform,
                image: image.has_src().then(|| PatternImage {
                    href: image.src.clone(),
                }),
            });
        }

        tracing::debug!(
            records = records.len(),
            patterns = patterns.len(),
            skipped,
            "built draw request"
        );

        Ok(DrawRequest {
            feature_id: self.feature_id.to_owned(),
            class: self.class.to_owned(),
            records,
            patterns,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/builder.rs"]
mod tests;
