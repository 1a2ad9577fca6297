use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};
use std::fmt;

use crate::{
    foundation::core::{Affine, Rgb8},
    foundation::error::QuadResult,
    render::dispatch::DrawDispatch,
    render::request::{DrawRequest, PatternDef, RenderRecord},
};

const IMAGE_CLASS: &str = "geoquad-quad-image";

/// Image element living inside a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageElement {
    /// Image reference.
    pub href: String,
}

/// Retained pattern node.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternNode {
    /// Pattern id.
    pub id: String,
    /// Current pattern transform.
    pub transform: Affine,
    /// Image element; created on first need, removed when the quad loses its image.
    pub image: Option<ImageElement>,
}

/// Cumulative counters of the pattern join.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinStats {
    /// Pattern nodes created.
    pub entered: usize,
    /// Pattern nodes rewritten in place.
    pub updated: usize,
    /// Pattern nodes removed.
    pub exited: usize,
    /// Image elements created.
    pub images_attached: usize,
    /// Image elements removed.
    pub images_detached: usize,
}

#[derive(Clone, Debug, Default)]
struct FeatureNodes {
    class: String,
    records: Vec<RenderRecord>,
    patterns: BTreeMap<String, PatternNode>,
}

/// Retained SVG scene fed by [`DrawRequest`]s.
///
/// Each request replaces the feature's polygons and joins its patterns by id: new ids enter, known
/// ids are updated in place, ids missing from the request exit. Features are painted in the order
/// they were first drawn.
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    width: u32,
    height: u32,
    background: Option<Rgb8>,
    features: Vec<(String, FeatureNodes)>,
    stats: JoinStats,
}

impl SvgRenderer {
    /// Empty scene of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            features: Vec::new(),
            stats: JoinStats::default(),
        }
    }

    /// Paint a solid background under all features.
    pub fn with_background(mut self, color: Rgb8) -> Self {
        self.background = Some(color);
        self
    }

    /// Scene size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pattern join counters since creation.
    pub fn stats(&self) -> JoinStats {
        self.stats
    }

    /// Ids of drawn features in paint order.
    pub fn feature_ids(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|(id, _)| id.as_str())
    }

    /// Records currently drawn for `feature_id`.
    pub fn records(&self, feature_id: &str) -> Option<&[RenderRecord]> {
        self.nodes(feature_id).map(|n| n.records.as_slice())
    }

    /// Pattern nodes currently defined for `feature_id`.
    pub fn patterns(&self, feature_id: &str) -> impl Iterator<Item = &PatternNode> {
        self.nodes(feature_id)
            .into_iter()
            .flat_map(|n| n.patterns.values())
    }

    /// Look up one pattern node.
    pub fn pattern(&self, feature_id: &str, pattern_id: &str) -> Option<&PatternNode> {
        self.nodes(feature_id)?.patterns.get(pattern_id)
    }

    /// Render the scene as a standalone SVG document.
    pub fn to_svg_string(&self) -> String {
        self.to_string()
    }

    fn nodes(&self, feature_id: &str) -> Option<&FeatureNodes> {
        self.features
            .iter()
            .find(|(id, _)| id == feature_id)
            .map(|(_, n)| n)
    }

    fn nodes_index(&mut self, feature_id: &str) -> usize {
        if let Some(i) = self.features.iter().position(|(id, _)| id == feature_id) {
            return i;
        }
        self.features
            .push((feature_id.to_owned(), FeatureNodes::default()));
        self.features.len() - 1
    }
}

fn join_pattern(
    stats: &mut JoinStats,
    patterns: &mut BTreeMap<String, PatternNode>,
    def: PatternDef,
) {
    let node = match patterns.entry(def.id) {
        Entry::Vacant(v) => {
            stats.entered += 1;
            let id = v.key().clone();
            v.insert(PatternNode {
                id,
                transform: def.transform,
                image: None,
            })
        }
        Entry::Occupied(o) => {
            stats.updated += 1;
            o.into_mut()
        }
    };
    node.transform = def.transform;

    match def.image {
        Some(img) => {
            if let Some(el) = node.image.as_mut() {
                el.href = img.href;
            } else {
                tracing::trace!(pattern = %node.id, "attach pattern image");
                stats.images_attached += 1;
                node.image = Some(ImageElement { href: img.href });
            }
        }
        None => {
            if node.image.take().is_some() {
                tracing::trace!(pattern = %node.id, "detach pattern image");
                stats.images_detached += 1;
            }
        }
    }
}

impl DrawDispatch for SvgRenderer {
    fn draw_features(&mut self, request: DrawRequest) -> QuadResult<()> {
        let DrawRequest {
            feature_id,
            class,
            records,
            patterns,
        } = request;

        let i = self.nodes_index(&feature_id);
        let stats = &mut self.stats;
        let nodes = &mut self.features[i].1;
        nodes.class = class;
        nodes.records = records;

        let keep: BTreeSet<&str> = patterns.iter().map(|p| p.id.as_str()).collect();
        nodes.patterns.retain(|id, node| {
            let kept = keep.contains(id.as_str());
            if !kept {
                stats.exited += 1;
                if node.image.is_some() {
                    stats.images_detached += 1;
                }
            }
            kept
        });

        for def in patterns {
            join_pattern(stats, &mut nodes.patterns, def);
        }

        tracing::debug!(
            feature = %feature_id,
            records = nodes.records.len(),
            patterns = nodes.patterns.len(),
            "svg feature drawn"
        );
        Ok(())
    }

    fn remove_feature(&mut self, feature_id: &str) -> QuadResult<()> {
        if let Some(i) = self.features.iter().position(|(id, _)| id == feature_id) {
            let (_, nodes) = self.features.remove(i);
            self.stats.exited += nodes.patterns.len();
            self.stats.images_detached +=
                nodes.patterns.values().filter(|p| p.image.is_some()).count();
            tracing::debug!(feature = feature_id, "svg feature removed");
        }
        Ok(())
    }
}

impl fmt::Display for SvgRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = (self.width, self.height);
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        if let Some(bg) = self.background {
            writeln!(f, r#"  <rect width="{w}" height="{h}" fill="{bg}"/>"#)?;
        }

        writeln!(f, "  <defs>")?;
        for (_, nodes) in &self.features {
            for p in nodes.patterns.values() {
                write_pattern(f, p)?;
            }
        }
        writeln!(f, "  </defs>")?;

        for (id, nodes) in &self.features {
            writeln!(
                f,
                r#"  <g id="{}" class="{}">"#,
                escape_attr(id),
                escape_attr(&nodes.class)
            )?;
            for r in &nodes.records {
                writeln!(
                    f,
                    r#"    <polygon class="{}" points="{}" fill="{}" stroke="none" fill-opacity="{}"/>"#,
                    escape_attr(&nodes.class),
                    r.points_attr(),
                    escape_attr(&r.style.fill.to_string()),
                    r.style.fill_opacity
                )?;
            }
            writeln!(f, "  </g>")?;
        }

        writeln!(f, "</svg>")
    }
}

fn write_pattern(f: &mut fmt::Formatter<'_>, p: &PatternNode) -> fmt::Result {
    let c = p.transform.as_coeffs();
    writeln!(
        f,
        r#"    <pattern id="{}" x="0" y="0" width="1" height="1" patternUnits="userSpaceOnUse" patternTransform="matrix({} {} {} {} {} {})">"#,
        escape_attr(&p.id),
        c[0],
        c[1],
        c[2],
        c[3],
        c[4],
        c[5]
    )?;
    if let Some(img) = &p.image {
        writeln!(
            f,
            r#"      <image class="{IMAGE_CLASS}" x="0" y="0" width="1" height="1" preserveAspectRatio="none" xlink:href="{}"/>"#,
            escape_attr(&img.href)
        )?;
    }
    writeln!(f, "    </pattern>")
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
