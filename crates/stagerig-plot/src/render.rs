//! Raster export of the stage plot.
//!
//! Draws the plan onto a `tiny_skia` pixmap: grid, stage outline, bars as
//! rotated slabs, fixture icons with number badges, and an equipment
//! legend, then encodes to PNG or JPEG via the `image` crate.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};
use rusttype::{point as rt_point, Scale};
use stagerig_core::error::ExportError;
use stagerig_core::units::{
    bar_length_px, BAR_HEIGHT_PX, GRID_SIZE_PX, ICON_SIZE_PX, LEGEND_ROWS_PER_COLUMN,
    LEGEND_ROW_HEIGHT_PX,
};
use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, StrokeDash, Transform,
};

use crate::font_manager;
use crate::icons::IconSet;
use crate::item::Item;
use crate::plot_state::PlotState;

/// Output encoding for the exported image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

fn background_color() -> Color {
    Color::from_rgba8(241, 245, 249, 255)
}
fn grid_color() -> Color {
    Color::from_rgba8(226, 232, 240, 255)
}
fn stage_edge_color() -> Color {
    Color::from_rgba8(100, 116, 139, 255)
}
fn bar_color() -> Color {
    Color::from_rgba8(17, 24, 39, 255)
}
fn badge_color() -> Color {
    Color::from_rgba8(37, 99, 235, 255)
}
fn text_color() -> Color {
    Color::from_rgba8(15, 23, 42, 255)
}
fn badge_text_color() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

/// Renders the whole plan to a pixmap of the given size.
///
/// The canvas origin maps to the pixmap's top-left corner; callers that
/// want the plan centered should offset item positions beforehand.
pub fn render_stage(
    state: &PlotState,
    icons: &IconSet,
    width: u32,
    height: u32,
) -> Result<Pixmap, ExportError> {
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| ExportError::Raster {
        reason: format!("cannot allocate {width}x{height} canvas"),
    })?;
    pixmap.fill(background_color());

    draw_grid(&mut pixmap, width, height);
    draw_stage_outline(&mut pixmap, width, height);

    // Draw order is document order: bars sit under their fixtures as long
    // as send-to-back has been honored.
    for item in &state.items {
        if item.is_bar() {
            draw_bar(&mut pixmap, item);
        }
    }
    for item in &state.items {
        if item.is_fixture() {
            draw_fixture(&mut pixmap, item, icons);
        }
    }

    draw_legend(&mut pixmap, state, icons, height);
    Ok(pixmap)
}

/// Encodes a rendered pixmap as PNG or JPEG bytes.
pub fn export_image(pixmap: &Pixmap, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    // The pixmap is premultiplied; image expects straight alpha.
    let mut data = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let rgba = RgbaImage::from_raw(pixmap.width(), pixmap.height(), data).ok_or_else(|| {
        ExportError::Encode {
            reason: "pixel buffer does not match canvas size".to_string(),
        }
    })?;

    let mut out = Cursor::new(Vec::new());
    let result = match format {
        ExportFormat::Png => rgba.write_to(&mut out, ImageFormat::Png),
        // JPEG has no alpha channel.
        ExportFormat::Jpeg => DynamicImage::ImageRgba8(rgba)
            .to_rgb8()
            .write_to(&mut out, ImageFormat::Jpeg),
    };
    result.map_err(|e| ExportError::Encode {
        reason: e.to_string(),
    })?;
    Ok(out.into_inner())
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn draw_grid(pixmap: &mut Pixmap, width: u32, height: u32) {
    let mut pb = PathBuilder::new();
    let mut x = GRID_SIZE_PX;
    while x < width as f64 {
        pb.move_to(x as f32, 0.0);
        pb.line_to(x as f32, height as f32);
        x += GRID_SIZE_PX;
    }
    let mut y = GRID_SIZE_PX;
    while y < height as f64 {
        pb.move_to(0.0, y as f32);
        pb.line_to(width as f32, y as f32);
        y += GRID_SIZE_PX;
    }
    let Some(path) = pb.finish() else { return };
    let stroke = Stroke {
        width: 1.0,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &solid(grid_color()), &stroke, Transform::identity(), None);
}

fn draw_stage_outline(pixmap: &mut Pixmap, width: u32, height: u32) {
    let inset = 20.0_f32;
    let w = width as f32;
    let h = height as f32;

    if let Some(rect) = Rect::from_xywh(inset, inset, w - 2.0 * inset, h - 2.0 * inset) {
        let path = PathBuilder::from_rect(rect);
        let stroke = Stroke {
            width: 2.0,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &solid(stage_edge_color()), &stroke, Transform::identity(), None);
    }

    // Dashed front-of-stage line along the audience edge.
    let mut pb = PathBuilder::new();
    pb.move_to(inset, h - inset * 3.0);
    pb.line_to(w - inset, h - inset * 3.0);
    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width: 1.5,
            dash: StrokeDash::new(vec![8.0, 6.0], 0.0),
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &solid(stage_edge_color()), &stroke, Transform::identity(), None);
    }
}

fn draw_bar(pixmap: &mut Pixmap, bar: &Item) {
    let len = bar_length_px() as f32;
    let h = BAR_HEIGHT_PX as f32;
    let Some(rect) = Rect::from_xywh(bar.x as f32 - len / 2.0, bar.y as f32 - h / 2.0, len, h)
    else {
        return;
    };
    let path = PathBuilder::from_rect(rect);
    let transform = Transform::from_rotate_at(bar.rotation as f32, bar.x as f32, bar.y as f32);
    pixmap.fill_path(&path, &solid(bar_color()), FillRule::Winding, transform, None);
}

fn draw_fixture(pixmap: &mut Pixmap, fixture: &Item, icons: &IconSet) {
    let half = ICON_SIZE_PX as f32 / 2.0;
    let cx = fixture.x as f32;
    let cy = fixture.y as f32;
    let transform = Transform::from_rotate_at(fixture.rotation as f32, cx, cy);

    match fixture.fixture_type_id().and_then(|id| icons.get(id)) {
        Some(icon) => {
            let scale = ICON_SIZE_PX as f32 / icons.size() as f32;
            let t = transform.pre_scale(scale, scale);
            pixmap.draw_pixmap(
                ((cx - half) / scale) as i32,
                ((cy - half) / scale) as i32,
                icon.as_ref(),
                &PixmapPaint::default(),
                t,
                None,
            );
        }
        None => {
            // No icon for this type id; draw a placeholder box.
            if let Some(rect) =
                Rect::from_xywh(cx - half, cy - half, ICON_SIZE_PX as f32, ICON_SIZE_PX as f32)
            {
                let path = PathBuilder::from_rect(rect);
                pixmap.fill_path(&path, &solid(bar_color()), FillRule::Winding, transform, None);
            }
        }
    }

    if let Some(number) = fixture.number {
        draw_number_badge(pixmap, cx + half, cy - half, number);
    }
}

fn draw_number_badge(pixmap: &mut Pixmap, cx: f32, cy: f32, number: u32) {
    let radius = 8.0;
    if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
        pixmap.fill_path(
            &path,
            &solid(badge_color()),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
    let label = number.to_string();
    let offset = label.len() as f32 * 2.5;
    draw_text(pixmap, &label, cx - offset, cy - 5.0, 10.0, badge_text_color());
}

/// One legend row per fixture: icon, display number, name. Rows wrap to
/// a new column after a fixed count.
fn draw_legend(pixmap: &mut Pixmap, state: &PlotState, icons: &IconSet, height: u32) {
    let mut fixtures: Vec<&Item> = state.items.iter().filter(|i| i.is_fixture()).collect();
    if fixtures.is_empty() {
        return;
    }
    fixtures.sort_by_key(|i| i.number.map_or(u32::MAX, |n| n));

    let row_h = LEGEND_ROW_HEIGHT_PX as f32;
    let col_w = 220.0_f32;
    let glyph = row_h - 10.0;
    let base_x = 30.0_f32;
    let rows_drawn = fixtures.len().min(LEGEND_ROWS_PER_COLUMN);
    let base_y = height as f32 - 20.0 - rows_drawn as f32 * row_h;

    for (i, fixture) in fixtures.iter().enumerate() {
        let col = i / LEGEND_ROWS_PER_COLUMN;
        let row = i % LEGEND_ROWS_PER_COLUMN;
        let x = base_x + col as f32 * col_w;
        let y = base_y + row as f32 * row_h;

        if let Some(icon) = fixture.fixture_type_id().and_then(|id| icons.get(id)) {
            let scale = glyph / icons.size() as f32;
            pixmap.draw_pixmap(
                (x / scale) as i32,
                (y / scale) as i32,
                icon.as_ref(),
                &PixmapPaint::default(),
                Transform::from_scale(scale, scale),
                None,
            );
        }

        let label = match fixture.number {
            Some(n) => format!("{n}  {}", fixture.name),
            None => fixture.name.clone(),
        };
        draw_text(pixmap, &label, x + glyph + 8.0, y + 3.0, 13.0, text_color());
    }
}

/// Draws a text run with the system label font. Silently skips drawing
/// when no font is available.
pub fn draw_text(pixmap: &mut Pixmap, text: &str, x: f32, y: f32, size_px: f32, color: Color) {
    let Some(font) = font_manager::label_font() else {
        return;
    };
    let scale = Scale::uniform(size_px);
    let v_metrics = font.v_metrics(scale);
    let start = rt_point(x, y + v_metrics.ascent);

    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    let (cr, cg, cb, ca) = (
        (color.red() * 255.0) as u32,
        (color.green() * 255.0) as u32,
        (color.blue() * 255.0) as u32,
        (color.alpha() * 255.0) as u32,
    );

    for glyph in font.layout(text, scale, start) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, v| {
            let px = bb.min.x + gx as i32;
            let py = bb.min.y + gy as i32;
            if px < 0 || py < 0 || px >= width || py >= height || v <= 0.003 {
                return;
            }
            let cov = (v * 255.0) as u32;
            let sa = ca * cov / 255;
            let idx = (py as usize * width as usize + px as usize) * 4;
            let data = pixmap.data_mut();
            // Premultiplied source-over.
            data[idx] = (cr * sa / 255 + data[idx] as u32 * (255 - sa) / 255) as u8;
            data[idx + 1] = (cg * sa / 255 + data[idx + 1] as u32 * (255 - sa) / 255) as u8;
            data[idx + 2] = (cb * sa / 255 + data[idx + 2] as u32 * (255 - sa) / 255) as u8;
            data[idx + 3] = (sa + data[idx + 3] as u32 * (255 - sa) / 255) as u8;
        });
    }
}
