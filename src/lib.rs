//! geoquad projects geographic quadrilaterals into display space and draws them as SVG.
//!
//! A quad is four geographic corners filled with either a flat color or an image. Image quads are
//! textured by fitting the unit square onto the projected corners with an affine map, which becomes
//! the transform of an SVG pattern. The public API is feature-oriented:
//!
//! - Describe quads as [`QuadDatum`] values, or implement [`QuadGeometrySource`]
//! - Wrap the source in a [`QuadFeature`] with a shared [`Projector`] and [`DrawDispatch`]
//! - Call [`Feature::update`]; the feature rebuilds only when its data or itself changed
//!
//! [`MapScene`] and [`SceneSession`] wire all of this from a JSON scene over a Web Mercator
//! [`MapView`], drawing into a retained [`SvgRenderer`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod feature;
mod fit;
mod foundation;
mod geo;
mod quad;
mod render;
mod scene;

pub use crate::foundation::core::{Affine, GeoCoord, Point, Rgb, Rgb8, Vec2};
pub use crate::foundation::error::{QuadError, QuadResult};
pub use crate::foundation::time::Timestamp;

pub use crate::assets::images::{ImageStore, probe_image};
pub use crate::feature::base::{FeatureArgs, FeatureBase, LifecycleState};
pub use crate::feature::quad::{Feature, QUAD_KIND, QuadFeature, SharedDispatch, SharedProjector};
pub use crate::feature::registry::{FeatureContext, FeatureFactory, FeatureRegistry, SVG_RENDERER};
pub use crate::fit::affine::{
    UNIT_CORNERS, fit_unit_square, largest_triangle_corner, triangle_area,
};
pub use crate::geo::mercator::{MAX_LATITUDE, MapView, MapViewConfig, TILE_SIZE};
pub use crate::geo::projector::{IdentityProjector, Projector};
pub use crate::quad::model::{ColorQuad, ImageQuad, ImageResource, QuadSet};
pub use crate::quad::source::{
    DatumQuadSource, PositionFn, QuadCorners, QuadDatum, QuadGeometrySource, QuadStyle,
    datum_corners,
};
pub use crate::render::builder::{
    QUAD_CLASS, QuadRef, RenderDescriptorBuilder, outline, project_corners, record_style,
};
pub use crate::render::dispatch::{DrawDispatch, RecordingDispatch};
pub use crate::render::raster::{RasterFrame, RasterOpts, rasterize_svg};
pub use crate::render::request::{
    DrawRequest, Fill, PatternDef, PatternImage, QuadKind, RecordStyle, RenderRecord, pattern_id,
};
pub use crate::render::svg::{ImageElement, JoinStats, PatternNode, SvgRenderer};
pub use crate::scene::model::{FeatureSpec, MapScene};
pub use crate::scene::session::{SceneSession, SceneSessionOpts};
