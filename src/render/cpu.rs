use std::collections::HashMap;

use crate::{
    field::waves::SAMPLE_START_X,
    foundation::core::{Affine, Rgb, Vec2},
    foundation::error::{SerpentineError, SerpentineResult},
    render::{FrameRGBA, RenderSettings},
    scene::model::Scene,
};

/// Particle fill, a pale blue (`rgb(219, 234, 254)`).
const PARTICLE_RGB: Rgb = Rgb {
    r: 219.0,
    g: 234.0,
    b: 254.0,
};

/// Flattening tolerance for stroke expansion and circle paths.
const PATH_TOLERANCE: f64 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum GradientAxis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    start: [u8; 4],
    end: [u8; 4],
    len: u32,
    axis: GradientAxis,
}

/// CPU raster adapter: turns a [`Scene`] into premultiplied RGBA8 pixels.
///
/// Two-stop gradients are rasterized into one-pixel-wide strip images and
/// used as paints; the sampler's pad extension stretches them across the
/// other axis.
pub struct CpuRenderer {
    settings: RenderSettings,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

impl CpuRenderer {
    pub fn new(settings: RenderSettings) -> SerpentineResult<Self> {
        settings.validate()?;
        Ok(Self::new_unchecked(settings))
    }

    pub(crate) fn new_unchecked(settings: RenderSettings) -> Self {
        Self {
            settings,
            gradient_cache: HashMap::new(),
        }
    }

    /// Render one scene at its own clock value.
    #[tracing::instrument(skip(self, scene))]
    pub fn render(&mut self, scene: &Scene) -> SerpentineResult<FrameRGBA> {
        scene.view_box.validate()?;
        let width_u16: u16 = self
            .settings
            .width
            .try_into()
            .map_err(|_| SerpentineError::render("render width exceeds u16"))?;
        let height_u16: u16 = self
            .settings
            .height
            .try_into()
            .map_err(|_| SerpentineError::render("render height exceeds u16"))?;

        let device_w = f64::from(self.settings.width);
        let device_h = f64::from(self.settings.height);
        let scale =
            Affine::scale_non_uniform(device_w / scene.view_box.width, device_h / scene.view_box.height);
        let t = scene.phase_shift;

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        self.draw_background(&mut ctx, scene, device_w, device_h)?;

        for node in &scene.waves {
            let fade = if scene.live {
                node.fade.factor_at(t)
            } else {
                1.0
            };
            let opacity = (node.layer.stroke_opacity * fade) as f32;
            if opacity <= 0.0 {
                continue;
            }

            let drift = node
                .motion
                .map(|m| m.drift.offset_at(t / m.drift_period_s))
                .unwrap_or(Vec2::ZERO);

            // Shift the polyline so its left edge sits at local x = 0: the
            // gradient paint is anchored at the local origin and must span
            // the path's horizontal extent, like an SVG object-bounding-box
            // gradient.
            let mut local = node.path.clone();
            local.apply_affine(Affine::translate((-SAMPLE_START_X, 0.0)));
            let stroked = kurbo::stroke(
                local.elements().iter().copied(),
                &kurbo::Stroke::new(node.stroke_width),
                &kurbo::StrokeOpts::default(),
                PATH_TOLERANCE,
            );

            let span = path_width_units(&node.path);
            let paint = self.gradient_image(
                node.gradient.start.to_rgba8(1.0),
                node.gradient.end.to_rgba8(1.0),
                span,
                GradientAxis::Horizontal,
            )?;

            ctx.set_transform(affine_to_cpu(
                scale * Affine::translate(drift + Vec2::new(SAMPLE_START_X, 0.0)),
            ));
            ctx.set_paint(paint);
            ctx.push_opacity_layer(opacity);
            ctx.fill_path(&bezpath_to_cpu(&stroked));
            ctx.pop_layer();
        }

        for p in &scene.particles {
            let cx = p.left_pct / 100.0 * scene.view_box.width + p.drift_x.offset_at(t);
            let cy = p.top_pct / 100.0 * scene.view_box.height + p.drift_y.offset_at(t);
            let alpha = if t < p.pulse.delay_s {
                p.base_opacity
            } else {
                p.pulse.value_at(t)
            };
            let circle = kurbo::Circle::new((cx, cy), p.size / 2.0);
            let [r, g, b, a] = PARTICLE_RGB.to_rgba8(alpha);
            ctx.set_transform(affine_to_cpu(scale));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_path(&bezpath_to_cpu(&kurbo::Shape::to_path(
                &circle,
                PATH_TOLERANCE,
            )));
        }

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: self.settings.width,
            height: self.settings.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_background(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        scene: &Scene,
        device_w: f64,
        device_h: f64,
    ) -> SerpentineResult<()> {
        let bg = &scene.background;
        let rect = vello_cpu::kurbo::Rect::new(0.0, 0.0, device_w, device_h);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let [r, g, b, a] = bg.base.to_rgba8(1.0);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&rect);

        let overlay = self.gradient_image(
            bg.gradient_top.to_rgba8(1.0),
            bg.gradient_bottom.to_rgba8(1.0),
            self.settings.height,
            GradientAxis::Vertical,
        )?;
        ctx.set_paint(overlay);
        let opacity = bg.gradient_opacity.clamp(0.0, 1.0) as f32;
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        ctx.fill_rect(&rect);
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    /// A `len`-pixel two-stop gradient strip, one pixel across.
    fn gradient_image(
        &mut self,
        start: [u8; 4],
        end: [u8; 4],
        len: u32,
        axis: GradientAxis,
    ) -> SerpentineResult<vello_cpu::Image> {
        let key = GradientKey {
            start,
            end,
            len,
            axis,
        };
        if let Some(img) = self.gradient_cache.get(&key).cloned() {
            return Ok(img);
        }

        let len_u16: u16 = len
            .try_into()
            .map_err(|_| SerpentineError::render("gradient strip length exceeds u16"))?;
        if len_u16 == 0 {
            return Err(SerpentineError::render("gradient strip length must be > 0"));
        }

        let denom = (len.max(2) - 1) as f32;
        let mut pixels = Vec::with_capacity(len as usize);
        for i in 0..len {
            let u = (i as f32) / denom;
            let lerp = |a: u8, b: u8| -> u8 {
                let af = a as f32;
                let bf = b as f32;
                (af + (bf - af) * u).round().clamp(0.0, 255.0) as u8
            };
            // Alpha is 255 on both ends, so straight and premultiplied agree.
            pixels.push(vello_cpu::peniko::color::PremulRgba8 {
                r: lerp(start[0], end[0]),
                g: lerp(start[1], end[1]),
                b: lerp(start[2], end[2]),
                a: lerp(start[3], end[3]),
            });
        }

        let (w, h) = match axis {
            GradientAxis::Horizontal => (len_u16, 1),
            GradientAxis::Vertical => (1, len_u16),
        };
        let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, false);
        let img = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.gradient_cache.insert(key, img.clone());
        Ok(img)
    }
}

/// Horizontal extent of a wave polyline, rounded up to whole units.
fn path_width_units(path: &crate::foundation::core::BezPath) -> u32 {
    let bbox = kurbo::Shape::bounding_box(path);
    bbox.width().ceil().max(1.0) as u32
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &crate::foundation::core::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
