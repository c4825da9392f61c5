//! SVG generation

use std::fmt::Write;

use super::geometry::fmt_coord;
use super::sink::SceneSink;
use super::types::{GradientRamp, Paint, PathCommand, RectCommand, Scene, TextCommand};

/// XML 1.0 valid char ranges
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Escape text for XML content and attribute values, dropping characters XML
/// cannot carry.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if !is_valid_xml_char(c) {
            continue;
        }
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn dash_attr(dash: &[f64]) -> String {
    dash.iter().map(|d| fmt_coord(*d)).collect::<Vec<_>>().join(" ")
}

/// A [`SceneSink`] writing a standalone SVG document.
#[derive(Debug)]
pub struct SvgSink {
    out: String,
    depth: usize,
    /// Gradient ramps go into a `<defs>` block ahead of the drawing
    defs: String,
}

impl SvgSink {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            depth: 1,
            defs: String::new(),
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    /// Wrap everything emitted so far into an `<svg>` document.
    pub fn finish(self, width: f64, height: f64) -> String {
        let (w, h) = (fmt_coord(width), fmt_coord(height));
        let mut doc = String::new();
        let _ = writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        if !self.defs.is_empty() {
            doc.push_str("  <defs>\n");
            doc.push_str(&self.defs);
            doc.push_str("  </defs>\n");
        }
        doc.push_str(&self.out);
        doc.push_str("</svg>\n");
        doc
    }
}

impl Default for SvgSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneSink for SvgSink {
    fn gradient_ramp(&mut self, ramp: &GradientRamp) {
        let (x2, y1) = if ramp.vertical { ("0", "1") } else { ("1", "0") };
        let _ = writeln!(
            self.defs,
            r#"    <linearGradient id="{}" x1="0" y1="{y1}" x2="{x2}" y2="0">"#,
            escape_xml(&ramp.id)
        );
        for stop in &ramp.stops {
            let _ = writeln!(
                self.defs,
                r#"      <stop offset="{}%" stop-color="{}"/>"#,
                fmt_coord(stop.offset_percent),
                escape_xml(&stop.color)
            );
        }
        self.defs.push_str("    </linearGradient>\n");
    }

    fn rect(&mut self, rect: &RectCommand) {
        self.indent();
        let fill = match &rect.fill {
            Paint::Color(c) => escape_xml(c),
            Paint::Ramp(id) => format!("url(#{})", escape_xml(id)),
        };
        let _ = write!(
            self.out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
            fmt_coord(rect.x),
            fmt_coord(rect.y),
            fmt_coord(rect.width),
            fmt_coord(rect.height),
            fill
        );
        if let Some(stroke) = &rect.stroke {
            let _ = write!(
                self.out,
                r#" stroke="{}" stroke-width="{}""#,
                escape_xml(stroke),
                fmt_coord(rect.stroke_width)
            );
        }
        self.out.push_str("/>\n");
    }

    fn path(&mut self, path: &PathCommand) {
        self.indent();
        let _ = write!(
            self.out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}""#,
            path.data(),
            escape_xml(&path.stroke),
            fmt_coord(path.stroke_width)
        );
        if let Some(dash) = &path.dash {
            let _ = write!(self.out, r#" stroke-dasharray="{}""#, dash_attr(dash));
        }
        self.out.push_str("/>\n");
    }

    fn text(&mut self, text: &TextCommand) {
        self.indent();
        let _ = writeln!(
            self.out,
            r#"<text x="{}" y="{}" text-anchor="{}" font-size="{}" fill="{}">{}</text>"#,
            fmt_coord(text.x),
            fmt_coord(text.y),
            text.anchor.as_str(),
            fmt_coord(text.font_size),
            escape_xml(&text.fill),
            escape_xml(&text.content)
        );
    }

    fn title(&mut self, title: &str) {
        self.indent();
        let _ = writeln!(self.out, "<title>{}</title>", escape_xml(title));
    }

    fn begin_group(&mut self, class: &str) {
        self.indent();
        let _ = writeln!(self.out, r#"<g class="{}">"#, escape_xml(class));
        self.depth += 1;
    }

    fn end_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("</g>\n");
    }

    fn begin_link(&mut self, href: &str) {
        self.indent();
        let href = escape_xml(href);
        let _ = writeln!(self.out, r#"<a href="{href}" xlink:href="{href}">"#);
        self.depth += 1;
    }

    fn end_link(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("</a>\n");
    }
}

/// Render a scene to an SVG document.
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut sink = SvgSink::new();
    scene.emit(&mut sink);
    sink.finish(scene.width, scene.height)
}
