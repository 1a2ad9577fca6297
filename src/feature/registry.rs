use std::{collections::BTreeMap, path::PathBuf};

use crate::{
    assets::images::ImageStore,
    feature::base::FeatureArgs,
    feature::quad::{Feature, QUAD_KIND, QuadFeature, SharedDispatch, SharedProjector},
    foundation::error::{QuadError, QuadResult},
    quad::source::DatumQuadSource,
};

/// Renderer name the built-in features are registered for.
pub const SVG_RENDERER: &str = "svg";

/// Shared resources handed to feature factories.
#[derive(Clone)]
pub struct FeatureContext {
    /// Projector shared by all features of a scene.
    pub projector: SharedProjector,
    /// Dispatcher shared by all features of a scene.
    pub dispatch: SharedDispatch,
    /// Directory local image references are resolved against.
    pub assets_root: PathBuf,
}

/// Creates an initialized feature from its arguments.
pub type FeatureFactory = fn(&FeatureContext, &FeatureArgs) -> QuadResult<Box<dyn Feature>>;

/// Feature factories keyed by `(renderer, kind)`.
#[derive(Clone, Debug, Default)]
pub struct FeatureRegistry {
    factories: BTreeMap<(String, String), FeatureFactory>,
}

impl FeatureRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in features (`quad` for `svg`).
    pub fn with_builtin() -> Self {
        let mut reg = Self::new();
        reg.register(SVG_RENDERER, QUAD_KIND, quad_feature);
        reg
    }

    /// Register `factory`, returning the factory it replaced.
    pub fn register(
        &mut self,
        renderer: impl Into<String>,
        kind: impl Into<String>,
        factory: FeatureFactory,
    ) -> Option<FeatureFactory> {
        self.factories
            .insert((renderer.into(), kind.into()), factory)
    }

    /// Return `true` when a factory exists for `(renderer, kind)`.
    pub fn contains(&self, renderer: &str, kind: &str) -> bool {
        self.factories
            .contains_key(&(renderer.to_owned(), kind.to_owned()))
    }

    /// Registered `(renderer, kind)` pairs in sorted order.
    pub fn kinds(&self) -> impl Iterator<Item = (&str, &str)> {
        self.factories
            .keys()
            .map(|(r, k)| (r.as_str(), k.as_str()))
    }

    /// Create and initialize a feature.
    pub fn create(
        &self,
        renderer: &str,
        kind: &str,
        ctx: &FeatureContext,
        args: &FeatureArgs,
    ) -> QuadResult<Box<dyn Feature>> {
        let factory = self
            .factories
            .get(&(renderer.to_owned(), kind.to_owned()))
            .ok_or_else(|| {
                QuadError::validation(format!(
                    "no feature kind '{kind}' registered for renderer '{renderer}'"
                ))
            })?;
        factory(ctx, args)
    }
}

fn quad_feature(ctx: &FeatureContext, args: &FeatureArgs) -> QuadResult<Box<dyn Feature>> {
    let refs = args.data.iter().filter_map(|d| d.image.as_deref());
    let images = ImageStore::prepare(refs, &ctx.assets_root);
    let source = DatumQuadSource::new(args.data.clone())
        .with_style(args.style)
        .with_images(images);

    let mut feature = QuadFeature::new(source, ctx.projector.clone(), ctx.dispatch.clone());
    feature.init(args)?;
    Ok(Box::new(feature))
}

#[cfg(test)]
#[path = "../../tests/unit/feature/registry.rs"]
mod tests;
