use std::fmt::Write as _;

use kurbo::PathEl;

use crate::{
    field::gradient::gradient_id,
    foundation::core::{BezPath, fmt_num},
    scene::model::Scene,
};

/// Serialize a [`Scene`] as a standalone SVG document.
///
/// Static geometry is emitted as plain attributes; when the scene is live the
/// looping motion (drift, breathe, particle oscillation, first-paint fades)
/// is expressed declaratively with SMIL children, so the document animates
/// without scripting.
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut out = String::with_capacity(64 * 1024);
    let w = fmt_num(scene.view_box.width);
    let h = fmt_num(scene.view_box.height);

    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" preserveAspectRatio=\"none\">"
    );

    write_defs(&mut out, scene);

    let bg = &scene.background;
    let _ = writeln!(out, "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>", bg.base.css());
    let _ = writeln!(
        out,
        "  <rect width=\"100%\" height=\"100%\" fill=\"url(#bgGradient)\" opacity=\"{}\"/>",
        fmt_num(bg.gradient_opacity)
    );

    for node in &scene.waves {
        let id = gradient_id(node.layer.group, node.layer.index);
        let opacity_attr = if scene.live {
            // Layers fade in once; until the fade begins the element stays
            // transparent.
            " opacity=\"0\"".to_string()
        } else {
            String::new()
        };
        let _ = write!(
            out,
            "  <path d=\"{}\" fill=\"none\" stroke=\"url(#{id})\" stroke-width=\"{}\" stroke-opacity=\"{}\"{}",
            path_d(&node.path),
            fmt_num(node.stroke_width),
            fmt_num(node.layer.stroke_opacity),
            opacity_attr,
        );

        if scene.live {
            let _ = writeln!(out, ">");
            let _ = writeln!(
                out,
                "    <animate attributeName=\"opacity\" from=\"0\" to=\"1\" dur=\"{}s\" begin=\"{}s\" fill=\"freeze\"/>",
                fmt_num(node.fade.duration_s),
                fmt_num(node.fade.delay_s),
            );
            if let Some(motion) = &node.motion {
                let _ = writeln!(
                    out,
                    "    <animateMotion dur=\"{}s\" repeatCount=\"indefinite\" path=\"{}\"/>",
                    fmt_num(motion.drift_period_s),
                    motion.drift.to_svg_d(),
                );
                // Single-value list, visually inert on its own.
                let _ = writeln!(
                    out,
                    "    <animate attributeName=\"d\" dur=\"{}s\" repeatCount=\"indefinite\" values=\"{}\"/>",
                    fmt_num(motion.breathe_period_s),
                    path_d(&node.path),
                );
            }
            let _ = writeln!(out, "  </path>");
        } else {
            let _ = writeln!(out, "/>");
        }
    }

    for p in &scene.particles {
        let _ = writeln!(
            out,
            "  <circle cx=\"{}%\" cy=\"{}%\" r=\"{}\" fill=\"rgb(219, 234, 254)\" opacity=\"{}\">",
            fmt_num(p.left_pct),
            fmt_num(p.top_pct),
            fmt_num(p.size / 2.0),
            fmt_num(p.base_opacity),
        );
        let _ = writeln!(
            out,
            "    <animateTransform attributeName=\"transform\" type=\"translate\" additive=\"sum\" values=\"0 0; {} 0; 0 0\" dur=\"{}s\" begin=\"{}s\" repeatCount=\"indefinite\"/>",
            fmt_num(p.drift_x.amplitude),
            fmt_num(p.drift_x.period_s),
            fmt_num(p.drift_x.delay_s),
        );
        let _ = writeln!(
            out,
            "    <animateTransform attributeName=\"transform\" type=\"translate\" additive=\"sum\" values=\"0 0; 0 {}; 0 0\" dur=\"{}s\" begin=\"{}s\" repeatCount=\"indefinite\"/>",
            fmt_num(p.drift_y.amplitude),
            fmt_num(p.drift_y.period_s),
            fmt_num(p.drift_y.delay_s),
        );
        let _ = writeln!(
            out,
            "    <animate attributeName=\"opacity\" values=\"{min};{max};{min}\" dur=\"{}s\" begin=\"{}s\" repeatCount=\"indefinite\"/>",
            fmt_num(p.pulse.period_s),
            fmt_num(p.pulse.delay_s),
            min = fmt_num(p.pulse.min),
            max = fmt_num(p.pulse.max),
        );
        let _ = writeln!(out, "  </circle>");
    }

    let _ = writeln!(out, "</svg>");
    out
}

fn write_defs(out: &mut String, scene: &Scene) {
    let bg = &scene.background;
    let _ = writeln!(out, "  <defs>");
    let _ = writeln!(
        out,
        "    <linearGradient id=\"bgGradient\" x1=\"0%\" y1=\"0%\" x2=\"0%\" y2=\"100%\">"
    );
    let _ = writeln!(
        out,
        "      <stop offset=\"0%\" stop-color=\"{}\"/>",
        bg.gradient_top.css()
    );
    let _ = writeln!(
        out,
        "      <stop offset=\"100%\" stop-color=\"{}\"/>",
        bg.gradient_bottom.css()
    );
    let _ = writeln!(out, "    </linearGradient>");

    for node in &scene.waves {
        let id = gradient_id(node.layer.group, node.layer.index);
        let _ = writeln!(
            out,
            "    <linearGradient id=\"{id}\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"0%\">"
        );
        let _ = writeln!(
            out,
            "      <stop offset=\"0%\" stop-color=\"{}\"/>",
            node.gradient.start.css()
        );
        let _ = writeln!(
            out,
            "      <stop offset=\"100%\" stop-color=\"{}\"/>",
            node.gradient.end.css()
        );
        let _ = writeln!(out, "    </linearGradient>");
    }
    let _ = writeln!(out, "  </defs>");
}

/// SVG `d` attribute for a sampled polyline, `M` then `L` commands.
fn path_d(path: &BezPath) -> String {
    let mut d = String::with_capacity(path.elements().len() * 12);
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                let _ = write!(d, "M{},{} ", fmt_num(p.x), fmt_num(p.y));
            }
            PathEl::LineTo(p) => {
                let _ = write!(d, "L{},{} ", fmt_num(p.x), fmt_num(p.y));
            }
            // Wave polylines only ever contain M and L commands.
            PathEl::QuadTo(..) | PathEl::CurveTo(..) | PathEl::ClosePath => {}
        }
    }
    d.trim_end().to_string()
}
