use std::{collections::HashMap, sync::Arc};

use kurbo::Shape as _;

use crate::{
    assets::decode::PreparedImage,
    config::RenderConfig,
    foundation::{
        core::{Affine, Circle, Rgba8},
        error::{QuoteCardError, QuoteCardResult},
    },
    layout::shaper::{TextBrushRgba8, TextShaper},
    model::TextAlign,
    render::{
        plan::{DrawOp, RenderPlan},
        surface::Surface,
    },
    template::registry::Background,
};

/// Tolerance used when flattening circles to Bezier paths.
const CIRCLE_TOLERANCE: f64 = 0.05;

/// Rasterizes [`RenderPlan`]s with `vello_cpu`.
///
/// Font data is converted once per backend and reused across renders.
pub struct CpuBackend {
    pixel_size: u16,
    density: f64,
    display_size: u32,
    font_cache: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl CpuBackend {
    pub fn new(config: &RenderConfig) -> QuoteCardResult<Self> {
        config.validate()?;
        let pixel_size: u16 = config
            .pixel_size()
            .try_into()
            .map_err(|_| QuoteCardError::validation("surface size exceeds u16"))?;
        Ok(Self {
            pixel_size,
            density: f64::from(config.render_resolution),
            display_size: config.display_size(),
            font_cache: HashMap::new(),
        })
    }

    /// Execute `plan` in order onto a fresh transparent surface.
    ///
    /// Ops are executed until one fails. The failing op and everything after it are skipped,
    /// the surface keeps what was already painted, and the error is returned with it.
    pub fn rasterize(
        &mut self,
        plan: &RenderPlan,
        shaper: &mut TextShaper,
    ) -> (Surface, Option<QuoteCardError>) {
        let mut ctx = vello_cpu::RenderContext::new(self.pixel_size, self.pixel_size);
        let base = vello_cpu::kurbo::Affine::scale(self.density);

        let mut failure = None;
        for (index, op) in plan.ops.iter().enumerate() {
            if let Err(err) = self.draw_op(&mut ctx, base, op, plan, shaper) {
                tracing::error!(index, %err, "draw op failed, keeping partial surface");
                failure = Some(err);
                break;
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(self.pixel_size, self.pixel_size);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let display = plan.canvas.width.min(self.display_size);
        let surface = Surface {
            canvas: plan.canvas,
            width: u32::from(self.pixel_size),
            height: u32::from(self.pixel_size),
            display_width: display,
            display_height: plan.canvas.height.min(self.display_size),
            data: pixmap.data_as_u8_slice().to_vec(),
        };
        (surface, failure)
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        base: vello_cpu::kurbo::Affine,
        op: &DrawOp,
        plan: &RenderPlan,
        shaper: &mut TextShaper,
    ) -> QuoteCardResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(base);

        match op {
            DrawOp::FillBackground(background) => {
                let w = f64::from(plan.canvas.width);
                let h = f64::from(plan.canvas.height);
                match background {
                    Background::Solid(c) => ctx.set_paint(color_to_cpu(*c)),
                    Background::LinearGradient(stops) => {
                        if stops.len() < 2 {
                            return Err(QuoteCardError::drawing(
                                "linear gradient needs at least two stops",
                            ));
                        }
                        let stops: Vec<(f32, vello_cpu::peniko::Color)> = stops
                            .iter()
                            .map(|s| (s.offset, color_to_cpu(s.color)))
                            .collect();
                        let gradient =
                            vello_cpu::peniko::Gradient::new_linear((0.0, 0.0), (w, h))
                                .with_stops(stops.as_slice());
                        ctx.set_paint(gradient);
                    }
                }
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
                Ok(())
            }
            DrawOp::Text {
                text,
                font,
                anchor,
                align,
                color,
            } => {
                let layout = shaper.layout_line(text, font, TextBrushRgba8::from(*color));
                let width = f64::from(layout.full_width());
                let x0 = match align {
                    TextAlign::Left => anchor.x,
                    TextAlign::Center => anchor.x - width / 2.0,
                    TextAlign::Right => anchor.x - width,
                };
                let baseline = layout
                    .lines()
                    .next()
                    .map(|line| f64::from(line.metrics().baseline))
                    .unwrap_or(0.0);
                ctx.set_transform(
                    base * vello_cpu::kurbo::Affine::translate((x0, anchor.y - baseline)),
                );

                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };

                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));

                        let font = run.run().font();
                        let font_data =
                            self.font_data(font.data.id(), font.index, font.data.data());
                        let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(&font_data)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
                Ok(())
            }
            DrawOp::CircleImage { image, circle } => {
                let paint = image_to_paint(image)?;
                let (iw, ih) = (f64::from(image.width), f64::from(image.height));
                let bbox = circle.bounding_box();

                ctx.push_clip_layer(&circle_to_cpu(*circle));
                ctx.set_transform(
                    base * affine_to_cpu(
                        Affine::translate((bbox.x0, bbox.y0))
                            * Affine::scale_non_uniform(bbox.width() / iw, bbox.height() / ih),
                    ),
                );
                ctx.set_paint(paint);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
                ctx.pop_layer();
                Ok(())
            }
            DrawOp::FillCircle { circle, color } => {
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&circle_to_cpu(*circle));
                Ok(())
            }
            DrawOp::StrokeCircle {
                circle,
                color,
                width,
            } => {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                ctx.set_paint(color_to_cpu(*color));
                ctx.stroke_path(&circle_to_cpu(*circle));
                Ok(())
            }
        }
    }

    /// `vello_cpu` font for a Parley font blob, keyed by blob id and face index.
    fn font_data(
        &mut self,
        blob_id: u64,
        index: u32,
        bytes: &[u8],
    ) -> vello_cpu::peniko::FontData {
        self.font_cache
            .entry((blob_id, index))
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.to_vec()),
                    index,
                )
            })
            .clone()
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn circle_to_cpu(circle: Circle) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let point = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in circle.path_elements(CIRCLE_TOLERANCE) {
        match el {
            PathEl::MoveTo(p) => out.move_to(point(p)),
            PathEl::LineTo(p) => out.line_to(point(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point(p1), point(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(point(p1), point(p2), point(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_to_paint(image: &PreparedImage) -> QuoteCardResult<vello_cpu::Image> {
    let w: u16 = image
        .width
        .try_into()
        .map_err(|_| QuoteCardError::drawing("image width exceeds u16"))?;
    let h: u16 = image
        .height
        .try_into()
        .map_err(|_| QuoteCardError::drawing("image height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(QuoteCardError::drawing("image has zero area"));
    }
    let bytes = image.rgba8_premul.as_slice();
    if bytes.len() != image.width as usize * image.height as usize * 4 {
        return Err(QuoteCardError::drawing("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(image.width as usize * image.height as usize);
    for px in bytes.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
