use std::{collections::BTreeMap, path::Path};

use anyhow::Context;

use crate::{foundation::error::QuadResult, quad::model::ImageResource};

/// Image resources resolved ahead of building.
///
/// Keys are the image references found in quad data. A key with no entry is an image that is not
/// available (yet): quads referring to it are generated with `image: None` and skipped when drawing.
/// Resolution IO happens in [`ImageStore::prepare`], never during a build.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageStore {
    entries: BTreeMap<String, ImageResource>,
}

impl ImageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every distinct reference in `refs`, relative to `root`.
    ///
    /// References that fail to resolve are logged and left absent.
    pub fn prepare<'a>(refs: impl IntoIterator<Item = &'a str>, root: &Path) -> Self {
        let mut store = Self::new();
        for r in refs {
            if store.entries.contains_key(r) {
                continue;
            }
            match probe_image(r, root) {
                Ok(res) => {
                    store.entries.insert(r.to_owned(), res);
                }
                Err(err) => {
                    tracing::warn!(image = r, error = %err, "image unavailable; quads using it are skipped");
                }
            }
        }
        store
    }

    /// Look up the resource for an image reference.
    pub fn get(&self, key: &str) -> Option<&ImageResource> {
        self.entries.get(key)
    }

    /// Make an image available under `key`, returning the previous resource.
    pub fn insert(&mut self, key: impl Into<String>, res: ImageResource) -> Option<ImageResource> {
        self.entries.insert(key.into(), res)
    }

    /// Make an image unavailable, returning the removed resource.
    pub fn remove(&mut self, key: &str) -> Option<ImageResource> {
        self.entries.remove(key)
    }

    /// Number of available images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when no image is available.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve one image reference.
///
/// Remote and `data:` references are accepted as-is. Local references are resolved against `root`
/// and decoded far enough to read their pixel size.
pub fn probe_image(r: &str, root: &Path) -> QuadResult<ImageResource> {
    if is_remote(r) {
        return Ok(ImageResource::new(r));
    }

    let path = root.join(r);
    let (width, height) = image::image_dimensions(&path)
        .with_context(|| format!("read image dimensions '{}'", path.display()))?;
    Ok(ImageResource {
        src: r.to_owned(),
        width: Some(width),
        height: Some(height),
    })
}

fn is_remote(r: &str) -> bool {
    ["http://", "https://", "data:"]
        .iter()
        .any(|prefix| r.starts_with(prefix))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/images.rs"]
mod tests;
