use std::{collections::BTreeSet, fs::File, io::BufReader, path::Path};

use crate::{
    feature::base::FeatureArgs,
    foundation::core::Rgb,
    foundation::error::{QuadError, QuadResult},
    geo::mercator::MapViewConfig,
};

/// One feature entry of a scene: a registered kind plus its arguments.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeatureSpec {
    /// Registered feature kind, e.g. `"quad"`.
    pub kind: String,
    /// Arguments passed to the feature's `init`.
    #[serde(flatten)]
    pub args: FeatureArgs,
}

/// JSON-facing map scene: a view and the features drawn over it.
///
/// ```json
/// {
///   "view": { "center": { "x": 0, "y": 0 }, "zoom": 2, "width": 512, "height": 512 },
///   "features": [
///     { "kind": "quad", "id": "zones", "data": [
///       { "ul": { "x": -10, "y": 10 }, "lr": { "x": 10, "y": -10 }, "color": { "r": 1, "g": 0, "b": 0 } }
///     ] }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapScene {
    /// Map view the scene is projected through.
    pub view: MapViewConfig,
    /// Renderer name used to look up feature factories.
    #[serde(default = "default_renderer")]
    pub renderer: String,
    /// Optional background fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb>,
    /// Features in paint order.
    #[serde(default)]
    pub features: Vec<FeatureSpec>,
}

fn default_renderer() -> String {
    "svg".to_owned()
}

impl MapScene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> QuadResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| QuadError::validation(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON string.
    pub fn from_json(s: &str) -> QuadResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> QuadResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            QuadError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate the view, every feature's arguments, and feature id uniqueness.
    pub fn validate(&self) -> QuadResult<()> {
        self.view.validate()?;
        if self.renderer.trim().is_empty() {
            return Err(QuadError::validation("scene renderer must be non-empty"));
        }

        let mut ids = BTreeSet::new();
        for (i, spec) in self.features.iter().enumerate() {
            if spec.kind.trim().is_empty() {
                return Err(QuadError::validation(format!(
                    "features[{i}].kind must be non-empty"
                )));
            }
            spec.args
                .validate()
                .map_err(|e| QuadError::validation(format!("features[{i}]: {e}")))?;
            if let Some(id) = &spec.args.id
                && !ids.insert(id.as_str())
            {
                return Err(QuadError::validation(format!(
                    "features[{i}]: duplicate feature id '{id}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
