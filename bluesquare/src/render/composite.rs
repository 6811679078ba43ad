use crate::{
    assets::decode::DecodedImage,
    foundation::{
        core::{Affine, Canvas},
        error::BluesquareResult,
    },
    render::{
        clip::ClipRegion,
        cpu::{affine_to_cpu, bezpath_to_cpu, image_paint_from_premul, premul_over_in_place},
    },
};

/// Width of the white ring drawn around the icon.
pub const BORDER_WIDTH: f64 = 5.0;

/// Overlay `icon` at the center of `base`, clipped to a rounded square.
///
/// Order of operations:
/// 1. stroke the rounded outline in white (unclipped, so the outer half of the ring shows);
/// 2. push the same outline as a clip;
/// 3. draw the icon scaled to fill the box;
/// 4. pop the clip.
///
/// The overlay is rasterized into a transparent layer and blended source-over, so pixels the
/// overlay does not touch keep their exact base value. With no icon `base` is returned as is.
/// If the icon cannot be turned into a paint the clip is still popped and only the ring is
/// applied.
#[tracing::instrument(skip_all, fields(width = base.width(), height = base.height(), icon = icon.is_some()))]
pub fn compose(mut base: Canvas, icon: Option<&DecodedImage>) -> Canvas {
    let Some(icon) = icon else {
        return base;
    };

    let region = ClipRegion::centered_in(base.width(), base.height());
    let (w, h) = (base.width_u16(), base.height_u16());
    let outline = bezpath_to_cpu(&region.to_path());

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(BORDER_WIDTH));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.stroke_path(&outline);

    ctx.push_clip_layer(&outline);
    let drawn = draw_icon(&mut ctx, icon, &region);
    ctx.pop_layer();

    if let Err(err) = drawn {
        tracing::warn!(%err, "icon could not be drawn; keeping border only");
    }

    ctx.flush();
    let mut layer = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut layer);

    if let Err(err) = premul_over_in_place(&mut base, layer.data_as_u8_slice()) {
        tracing::warn!(%err, "overlay layer mismatch; returning base unchanged");
    }
    base
}

fn draw_icon(
    ctx: &mut vello_cpu::RenderContext,
    icon: &DecodedImage,
    region: &ClipRegion,
) -> BluesquareResult<()> {
    let paint = image_paint_from_premul(&icon.rgba8_premul, icon.width, icon.height)?;
    let (iw, ih) = (f64::from(icon.width), f64::from(icon.height));

    let transform = Affine::translate(region.offset.to_vec2())
        * Affine::scale_non_uniform(region.side / iw, region.side / ih);
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
