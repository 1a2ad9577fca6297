use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{QuadError, QuadResult};

/// Rasterization settings.
#[derive(Clone, Debug, Default)]
pub struct RasterOpts {
    /// Directory relative image references are resolved against.
    pub resources_dir: Option<PathBuf>,
}

/// Rasterized frame: row-major RGBA8, premultiplied alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl RasterFrame {
    /// Straight-alpha RGBA of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some(demultiply([px[0], px[1], px[2], px[3]]))
    }

    /// Copy of the frame with straight alpha, as image encoders expect.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        self.data
            .chunks_exact(4)
            .flat_map(|px| demultiply([px[0], px[1], px[2], px[3]]))
            .collect()
    }

    /// Encode the frame as PNG at `path`, creating parent directories.
    pub fn write_png(&self, path: &Path) -> QuadResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

fn demultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8;
    [un(r), un(g), un(b), a]
}

/// Parse an SVG document and rasterize it at its intrinsic size.
#[tracing::instrument(skip(svg, opts), fields(bytes = svg.len()))]
pub fn rasterize_svg(svg: &str, opts: &RasterOpts) -> QuadResult<RasterFrame> {
    let usvg_opts = usvg::Options {
        resources_dir: opts.resources_dir.clone(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &usvg_opts)
        .map_err(|e| QuadError::render(format!("parse svg: {e}")))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| QuadError::render("failed to allocate raster pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    tracing::debug!(width, height, "rasterized svg");
    Ok(RasterFrame {
        width,
        height,
        data: pixmap.take(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
