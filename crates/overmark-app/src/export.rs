//! Flattening and PNG export of the committed surface.

use crate::error::{AppError, AppResult};
use image::RgbaImage;
use image::imageops::FilterType;
use overmark_render::RenderError;
use std::path::Path;
use tiny_skia::Pixmap;

/// Straight-alpha RGBA of `committed` composited over `background`, which is
/// stretched to the surface size first.
pub fn flatten(committed: &Pixmap, background: Option<&RgbaImage>) -> Vec<u8> {
    let (width, height) = (committed.width(), committed.height());
    let background = background.map(|bg| {
        if bg.dimensions() == (width, height) {
            bg.clone()
        } else {
            image::imageops::resize(bg, width, height, FilterType::Triangle)
        }
    });

    let mut out = Vec::with_capacity((width * height * 4) as usize);
    for (i, px) in committed.pixels().iter().enumerate() {
        let src_a = px.alpha() as f32 / 255.0;
        let src = [px.red() as f32, px.green() as f32, px.blue() as f32];
        let (dst, dst_a) = match &background {
            Some(bg) => {
                let x = i as u32 % width;
                let y = i as u32 / width;
                let p = bg.get_pixel(x, y).0;
                let a = p[3] as f32 / 255.0;
                ([p[0] as f32 * a, p[1] as f32 * a, p[2] as f32 * a], a)
            }
            None => ([0.0; 3], 0.0),
        };
        // Premultiplied source-over.
        let out_a = src_a + dst_a * (1.0 - src_a);
        for c in 0..3 {
            let premul = src[c] + dst[c] * (1.0 - src_a);
            let straight = if out_a > 0.0 { premul / out_a } else { 0.0 };
            out.push(straight.round().clamp(0.0, 255.0) as u8);
        }
        out.push((out_a * 255.0).round() as u8);
    }
    out
}

pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> AppResult<Vec<u8>> {
    let encode_err = |e: png::EncodingError| AppError::Render(RenderError::Encode(e.to_string()));
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(encode_err)?;
        writer.write_image_data(rgba_data).map_err(encode_err)?;
    }
    Ok(png_data)
}

pub fn load_background(path: &Path) -> AppResult<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

/// Flatten and write `committed` to `path` as PNG.
pub fn write_png(path: &Path, committed: &Pixmap, background: Option<&RgbaImage>) -> AppResult<()> {
    let rgba = flatten(committed, background);
    let png = encode_png(&rgba, committed.width(), committed.height())?;
    std::fs::write(path, png)?;
    log::info!("Wrote {}x{} PNG to {}", committed.width(), committed.height(), path.display());
    Ok(())
}
