use crate::scene::{GroupKind, Scene, Shape, ShapeGroup};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Optional root `id` attribute. Sanitized with [`sanitize_svg_id`].
    pub diagram_id: Option<String>,
    /// Optional CSS color painted behind the map.
    pub background: Option<String>,
    pub font_family: String,
    pub font_size: f64,
    /// Indent nested elements, one per line.
    pub pretty: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            background: None,
            font_family: "sans-serif".to_string(),
            font_size: 8.0,
            pretty: false,
        }
    }
}

struct SvgWriter {
    out: String,
    pretty: bool,
    depth: usize,
}

impl SvgWriter {
    fn line(&mut self, element: &str) {
        if self.pretty {
            for _ in 0..self.depth {
                self.out.push_str("  ");
            }
        }
        self.out.push_str(element);
        if self.pretty {
            self.out.push('\n');
        }
    }

    fn open(&mut self, element: &str) {
        self.line(element);
        self.depth += 1;
    }

    fn close(&mut self, element: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(element);
    }
}

/// Serializes a scene to an SVG document sized in inches with a viewBox in drawing units.
pub fn render_scene_svg(scene: &Scene, options: &SvgRenderOptions) -> String {
    let mut w = SvgWriter {
        out: String::new(),
        pretty: options.pretty,
        depth: 0,
    };
    w.line(r#"<?xml version="1.0" encoding="UTF-8"?>"#);

    let mut root = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
    if let Some(id) = &options.diagram_id {
        let _ = write!(&mut root, r#" id="{}""#, escape_attr(&sanitize_svg_id(id)));
    }
    let _ = write!(
        &mut root,
        r#" width="{}in" height="{}in" viewBox="0 0 {} {}" font-family="{}" font-size="{}">"#,
        fmt(scene.width_in),
        fmt(scene.height_in),
        fmt(scene.view_width),
        fmt(scene.view_height),
        escape_attr(&options.font_family),
        fmt(options.font_size)
    );
    w.open(&root);

    let background = options.background.as_deref().map(str::trim);
    if let Some(bg) = background.filter(|bg| !bg.is_empty()) {
        w.line(&format!(
            r#"<rect x="0" y="0" width="100%" height="100%" fill="{}"/>"#,
            escape_attr(bg)
        ));
    }

    let mut city_idx = 0usize;
    let mut track_idx = 0usize;
    for group in &scene.groups {
        let id = match group.kind {
            GroupKind::City => {
                city_idx += 1;
                format!("city-{}", city_idx - 1)
            }
            GroupKind::Connection => {
                track_idx += 1;
                format!("track-{}", track_idx - 1)
            }
        };
        render_group(&mut w, group, &id);
    }

    w.close("</svg>");
    if !w.pretty {
        w.out.push('\n');
    }
    w.out
}

fn render_group(w: &mut SvgWriter, group: &ShapeGroup, id: &str) {
    let class = match group.kind {
        GroupKind::City => "city",
        GroupKind::Connection => "track",
    };
    w.open(&format!(
        r#"<g id="{id}" class="{class}" data-name="{}">"#,
        escape_attr(&group.name)
    ));
    for shape in &group.shapes {
        w.line(&shape_element(shape));
    }
    w.close("</g>");
}

fn shape_element(shape: &Shape) -> String {
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
            stroke_width,
            rotation,
        } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" stroke="{stroke}" stroke-width="{}" transform="rotate({}, {}, {})"/>"#,
            fmt(*x),
            fmt(*y),
            fmt(*width),
            fmt(*height),
            fmt(*stroke_width),
            fmt(rotation.degrees),
            fmt(rotation.cx),
            fmt(rotation.cy),
        ),
        Shape::Circle { cx, cy, r, fill } => format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}"/>"#,
            fmt(*cx),
            fmt(*cy),
            fmt(*r),
        ),
        Shape::Text { x, y, text } => format!(
            r#"<text x="{}" y="{}">{}</text>"#,
            fmt(*x),
            fmt(*y),
            escape_xml(text)
        ),
    }
}

/// Converts an arbitrary string into a conservative SVG `id` token.
///
/// - trims whitespace
/// - replaces unsupported characters with `-`
/// - ensures the id starts with an ASCII letter by prefixing `m-` when needed
pub fn sanitize_svg_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "m-untitled".to_string();
    }

    let mut out = String::with_capacity(raw.len() + 4);
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
        out.push(if ok { ch } else { '-' });
    }

    let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_ok {
        out.insert_str(0, "m-");
    }

    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_matches('-');
    if out.is_empty() || out == "m" {
        return "m-untitled".to_string();
    }
    out.to_string()
}

pub(crate) fn fmt(v: f64) -> String {
    // Shortest round-trippable decimal, without `-0` or float noise from our own arithmetic.
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_xml(text)
}
