use std::{
    cell::{RefCell, RefMut},
    rc::Rc,
};

use crate::{
    feature::base::{FeatureArgs, FeatureBase, LifecycleState},
    foundation::error::{QuadError, QuadResult},
    foundation::time::Timestamp,
    geo::projector::Projector,
    quad::source::{DatumQuadSource, QuadGeometrySource},
    render::builder::{QUAD_CLASS, RenderDescriptorBuilder},
    render::dispatch::DrawDispatch,
};

/// Kind name quad features are registered under.
pub const QUAD_KIND: &str = "quad";

/// Projector shared by the features of one scene.
pub type SharedProjector = Rc<dyn Projector>;

/// Draw dispatcher shared by the features of one scene.
pub type SharedDispatch = Rc<RefCell<dyn DrawDispatch>>;

/// Lifecycle surface of a drawable feature.
pub trait Feature: std::fmt::Debug {
    /// Feature id; empty before `init`.
    fn id(&self) -> &str;

    /// Registered kind name.
    fn kind(&self) -> &str;

    /// Initialize from `args`. Leaves the feature stale.
    fn init(&mut self, args: &FeatureArgs) -> QuadResult<()>;

    /// Rebuild if stale; otherwise do nothing.
    fn update(&mut self) -> QuadResult<()>;

    /// Generate, project and dispatch unconditionally.
    fn build(&mut self) -> QuadResult<()>;

    /// Remove drawn output and enter the terminal state.
    fn exit(&mut self) -> QuadResult<()>;

    /// Current lifecycle state.
    fn state(&self) -> LifecycleState;
}

/// Feature drawing the quads of a [`QuadGeometrySource`].
///
/// Each build pulls a fresh [`QuadSet`](crate::QuadSet) from the source, projects it through the
/// shared projector, and hands the resulting [`DrawRequest`](crate::DrawRequest) to the shared
/// dispatcher. Rebuilds happen on `update` only when the data or the feature changed since the last
/// successful build.
pub struct QuadFeature<S = DatumQuadSource> {
    base: FeatureBase,
    source: S,
    class: String,
    projector: SharedProjector,
    dispatch: SharedDispatch,
}

impl<S: QuadGeometrySource> QuadFeature<S> {
    /// Uninitialized feature over `source`.
    pub fn new(source: S, projector: SharedProjector, dispatch: SharedDispatch) -> Self {
        Self {
            base: FeatureBase::new(),
            source,
            class: QUAD_CLASS.to_owned(),
            projector,
            dispatch,
        }
    }

    /// Override the class attached to drawn elements.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Shared base state.
    pub fn base(&self) -> &FeatureBase {
        &self.base
    }

    /// Quad source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source. Marks the data as modified.
    pub fn source_mut(&mut self) -> &mut S {
        self.base.data_modified();
        &mut self.source
    }

    /// Mark the feature as modified so the next `update` rebuilds.
    pub fn modified(&mut self) {
        self.base.modified();
    }

    /// Last successful build.
    pub fn build_time(&self) -> Timestamp {
        self.base.build_time()
    }

    /// Last data modification.
    pub fn data_time(&self) -> Timestamp {
        self.base.data_time()
    }

    /// Last feature modification.
    pub fn modified_time(&self) -> Timestamp {
        self.base.modified_time()
    }

    fn dispatch(&self) -> QuadResult<RefMut<'_, dyn DrawDispatch + 'static>> {
        self.dispatch
            .try_borrow_mut()
            .map_err(|_| QuadError::render("draw dispatcher is already borrowed"))
    }
}

impl<S: QuadGeometrySource> Feature for QuadFeature<S> {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn kind(&self) -> &str {
        QUAD_KIND
    }

    fn init(&mut self, args: &FeatureArgs) -> QuadResult<()> {
        self.base.init(args)?;
        if let Some(class) = &args.class {
            self.class = class.clone();
        }
        Ok(())
    }

    fn update(&mut self) -> QuadResult<()> {
        self.base.update()?;
        if !self.base.is_stale() {
            tracing::trace!(feature = %self.base.id(), "feature up to date");
            return Ok(());
        }
        self.build()
    }

    #[tracing::instrument(skip(self), fields(feature = %self.base.id()))]
    fn build(&mut self) -> QuadResult<()> {
        self.base.ensure_active("build")?;
        if !self.source.has_position() {
            tracing::debug!("source has no position accessor; nothing to build");
            return Ok(());
        }

        let quads = self.source.generate_quads()?;
        let request = RenderDescriptorBuilder::new(self.base.id())
            .with_class(&self.class)
            .build(&quads, &*self.projector)?;
        self.dispatch()?.draw_features(request)?;

        self.base.built();
        Ok(())
    }

    fn exit(&mut self) -> QuadResult<()> {
        if self.base.is_active() {
            self.dispatch()?.remove_feature(self.base.id())?;
        }
        self.base.exit()
    }

    fn state(&self) -> LifecycleState {
        self.base.state()
    }
}

impl<S> std::fmt::Debug for QuadFeature<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadFeature")
            .field("base", &self.base)
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/feature/quad.rs"]
mod tests;
