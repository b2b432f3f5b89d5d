//! Fixture icon rasterization.
//!
//! Icons come from the catalog as inline SVG or as asset files (SVG or
//! raster). They are decoded once per export into fixed-size pixmaps.
//! Export waits for the whole set: a plan is rendered with every icon or
//! not at all, and all decode failures are reported together.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use stagerig_core::catalog::{FixtureType, IconRef};
use stagerig_core::error::ExportError;
use tiny_skia::{FilterQuality, IntSize, Pixmap, PixmapPaint, Transform};

/// Rasterized icons keyed by fixture type id.
#[derive(Debug, Default)]
pub struct IconSet {
    icons: HashMap<String, Pixmap>,
    size: u32,
}

impl IconSet {
    pub fn get(&self, fixture_type_id: &str) -> Option<&Pixmap> {
        self.icons.get(fixture_type_id)
    }

    /// Edge length in pixels every icon was rasterized at.
    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Rasterizes the icons of every given fixture type at `size`x`size`.
///
/// Decodes all icons before returning. If any fail, the successful ones
/// are discarded and the failures come back aggregated in one
/// [`ExportError::IconLoad`].
pub fn load_icon_set(
    types: &[&FixtureType],
    size: u32,
    assets_dir: &Path,
) -> Result<IconSet, ExportError> {
    let mut icons = HashMap::new();
    let mut failures = Vec::new();

    for fixture_type in types {
        match rasterize_icon(&fixture_type.icon, size, assets_dir) {
            Ok(pixmap) => {
                icons.insert(fixture_type.id.clone(), pixmap);
            }
            Err(reason) => failures.push(format!("{}: {}", fixture_type.id, reason)),
        }
    }

    if failures.is_empty() {
        Ok(IconSet { icons, size })
    } else {
        Err(ExportError::IconLoad { failures })
    }
}

/// Rasterizes a single icon to a premultiplied RGBA pixmap.
fn rasterize_icon(icon: &IconRef, size: u32, assets_dir: &Path) -> Result<Pixmap, String> {
    match icon {
        IconRef::Inline(svg) => {
            let tree = usvg::Tree::from_str(svg, &usvg::Options::default())
                .map_err(|e| format!("invalid inline svg: {e}"))?;
            render_svg(&tree, size)
        }
        IconRef::Asset(path) => {
            let full = assets_dir.join(path);
            let bytes = fs::read(&full).map_err(|e| format!("{}: {e}", full.display()))?;
            if full.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("svg")) {
                let tree = usvg::Tree::from_data(&bytes, &usvg::Options::default())
                    .map_err(|e| format!("{}: {e}", full.display()))?;
                render_svg(&tree, size)
            } else {
                decode_raster(&bytes, size).map_err(|e| format!("{}: {e}", full.display()))
            }
        }
    }
}

fn render_svg(tree: &usvg::Tree, size: u32) -> Result<Pixmap, String> {
    let mut pixmap =
        Pixmap::new(size, size).ok_or_else(|| "failed to allocate icon pixmap".to_string())?;
    let svg_size = tree.size();
    if svg_size.width() <= 0.0 || svg_size.height() <= 0.0 {
        return Err("svg has invalid width/height".to_string());
    }
    let sx = size as f32 / svg_size.width();
    let sy = size as f32 / svg_size.height();
    resvg::render(tree, Transform::from_scale(sx, sy), &mut pixmap.as_mut());
    Ok(pixmap)
}

fn decode_raster(bytes: &[u8], size: u32) -> Result<Pixmap, String> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| format!("decode failed: {e}"))?
        .to_rgba8();
    let (w, h) = decoded.dimensions();

    // Pixmap stores premultiplied alpha; straight RGBA from the decoder
    // has to be multiplied through first.
    let mut data = decoded.into_raw();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        px[0] = (px[0] as u16 * a / 255) as u8;
        px[1] = (px[1] as u16 * a / 255) as u8;
        px[2] = (px[2] as u16 * a / 255) as u8;
    }
    let source = IntSize::from_wh(w, h)
        .and_then(|s| Pixmap::from_vec(data, s))
        .ok_or_else(|| "invalid raster dimensions".to_string())?;

    let mut pixmap =
        Pixmap::new(size, size).ok_or_else(|| "failed to allocate icon pixmap".to_string())?;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(
        0,
        0,
        source.as_ref(),
        &paint,
        Transform::from_scale(size as f32 / w as f32, size as f32 / h as f32),
        None,
    );
    Ok(pixmap)
}
