use std::{cell::RefCell, path::PathBuf, rc::Rc};

use crate::{
    feature::quad::{Feature, SharedDispatch},
    feature::registry::{FeatureContext, FeatureRegistry},
    foundation::error::{QuadError, QuadResult},
    geo::mercator::MapView,
    render::dispatch::{DrawDispatch, RecordingDispatch},
    render::raster::{RasterFrame, RasterOpts, rasterize_svg},
    render::request::DrawRequest,
    render::svg::SvgRenderer,
    scene::model::MapScene,
};

/// Options for [`SceneSession`].
#[derive(Clone, Debug, Default)]
pub struct SceneSessionOpts {
    /// Keep a copy of every dispatched [`DrawRequest`], see [`SceneSession::requests`].
    pub record_requests: bool,
}

#[derive(Debug)]
struct SceneDispatch {
    svg: SvgRenderer,
    recorder: Option<RecordingDispatch>,
}

impl DrawDispatch for SceneDispatch {
    fn draw_features(&mut self, request: DrawRequest) -> QuadResult<()> {
        if let Some(rec) = &mut self.recorder {
            rec.draw_features(request.clone())?;
        }
        self.svg.draw_features(request)
    }

    fn remove_feature(&mut self, feature_id: &str) -> QuadResult<()> {
        if let Some(rec) = &mut self.recorder {
            rec.remove_feature(feature_id)?;
        }
        self.svg.remove_feature(feature_id)
    }
}

/// A loaded scene: one map view, one SVG renderer and the scene's features.
#[derive(Debug)]
pub struct SceneSession {
    view: Rc<MapView>,
    dispatch: Rc<RefCell<SceneDispatch>>,
    features: Vec<Box<dyn Feature>>,
    assets_root: PathBuf,
}

impl SceneSession {
    /// Validate `scene` and create its features with the built-in registry.
    pub fn new(
        scene: &MapScene,
        assets_root: impl Into<PathBuf>,
        opts: SceneSessionOpts,
    ) -> QuadResult<Self> {
        Self::with_registry(scene, assets_root, opts, &FeatureRegistry::with_builtin())
    }

    /// Validate `scene` and create its features with `registry`.
    #[tracing::instrument(skip(scene, assets_root, opts, registry), fields(features = scene.features.len()))]
    pub fn with_registry(
        scene: &MapScene,
        assets_root: impl Into<PathBuf>,
        opts: SceneSessionOpts,
        registry: &FeatureRegistry,
    ) -> QuadResult<Self> {
        scene.validate()?;
        let assets_root = assets_root.into();
        let view = Rc::new(MapView::new(scene.view)?);

        let mut svg = SvgRenderer::new(scene.view.width, scene.view.height);
        if let Some(bg) = scene.background {
            svg = svg.with_background(bg.to_rgb8());
        }
        let dispatch = Rc::new(RefCell::new(SceneDispatch {
            svg,
            recorder: opts.record_requests.then(RecordingDispatch::new),
        }));

        let shared: SharedDispatch = dispatch.clone();
        let ctx = FeatureContext {
            projector: view.clone(),
            dispatch: shared,
            assets_root: assets_root.clone(),
        };
        let features = scene
            .features
            .iter()
            .map(|spec| registry.create(&scene.renderer, &spec.kind, &ctx, &spec.args))
            .collect::<QuadResult<Vec<_>>>()?;

        tracing::debug!(renderer = %scene.renderer, "scene session created");
        Ok(Self {
            view,
            dispatch,
            features,
            assets_root,
        })
    }

    /// Map view shared by all features.
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Features in paint order.
    pub fn features(&self) -> impl Iterator<Item = &dyn Feature> {
        self.features.iter().map(|f| f.as_ref())
    }

    /// Look up a feature by id for in-place changes.
    pub fn feature_mut(&mut self, id: &str) -> Option<&mut dyn Feature> {
        self.features
            .iter_mut()
            .find(|f| f.id() == id)
            .map(|f| f.as_mut() as &mut dyn Feature)
    }

    /// Update every feature in paint order, stopping at the first failure.
    pub fn update(&mut self) -> QuadResult<()> {
        for f in &mut self.features {
            f.update()?;
        }
        Ok(())
    }

    /// Current scene as an SVG document.
    pub fn svg(&self) -> QuadResult<String> {
        let d = self
            .dispatch
            .try_borrow()
            .map_err(|_| QuadError::render("scene renderer is busy"))?;
        Ok(d.svg.to_svg_string())
    }

    /// Rasterize the current scene, resolving images against the assets root.
    pub fn rasterize(&self) -> QuadResult<RasterFrame> {
        let opts = RasterOpts {
            resources_dir: Some(self.assets_root.clone()),
        };
        rasterize_svg(&self.svg()?, &opts)
    }

    /// Every request dispatched so far. Empty unless recording was enabled.
    pub fn requests(&self) -> QuadResult<Vec<DrawRequest>> {
        let d = self
            .dispatch
            .try_borrow()
            .map_err(|_| QuadError::render("scene renderer is busy"))?;
        Ok(d
            .recorder
            .as_ref()
            .map(|r| r.requests().to_vec())
            .unwrap_or_default())
    }

    /// Exit every feature, removing their output from the renderer.
    pub fn exit(&mut self) -> QuadResult<()> {
        for f in &mut self.features {
            f.exit()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/session.rs"]
mod tests;
