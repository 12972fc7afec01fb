use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LayerPrimitives, LinePrimitive, LineStrokeStyle, PathCommand,
    PathFill, PathPrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
    TextVAlign,
};

const SANS_FONT_STACK: &str = "ui-sans-serif, system-ui, sans-serif";
const MONO_FONT_STACK: &str = "ui-monospace, SFMono-Regular, monospace";

/// Serializes frames into standalone SVG documents.
///
/// Gradient ids are prefixed with `id_prefix` so several charts can be
/// inlined into one page without clashing.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    id_prefix: String,
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: sanitize_id(&id_prefix.into()),
            document: String::new(),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "svg"
    }

    /// Last rendered document, empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    fn write_frame(&self, frame: &RenderFrame) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        let (width, height) = (frame.viewport.width, frame.viewport.height);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}">"#
        )?;

        let mut gradient_count = 0_usize;
        let mut defs = String::new();
        let mut body = String::new();
        for layer in frame.layers.iter().filter(|layer| !layer.is_empty()) {
            writeln!(body, r#"<g data-layer="{:?}">"#, layer.kind)?;
            self.write_layer(&mut body, &mut defs, &mut gradient_count, layer)?;
            writeln!(body, "</g>")?;
        }

        if !defs.is_empty() {
            writeln!(out, "<defs>")?;
            out.push_str(&defs);
            writeln!(out, "</defs>")?;
        }
        out.push_str(&body);
        writeln!(out, "</svg>")?;
        Ok(out)
    }

    fn write_layer(
        &self,
        body: &mut String,
        defs: &mut String,
        gradient_count: &mut usize,
        layer: &LayerPrimitives,
    ) -> std::fmt::Result {
        for rect in &layer.rects {
            write_rect(body, rect)?;
        }
        for path in &layer.paths {
            let fill = match path.fill {
                Some(PathFill::Solid(color)) => paint(color),
                Some(PathFill::VerticalGradient {
                    top_y,
                    bottom_y,
                    top_color,
                    bottom_color,
                }) => {
                    let id = format!("{}-grad-{}", self.id_prefix, *gradient_count);
                    *gradient_count += 1;
                    writeln!(
                        defs,
                        r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="0" y1="{top_y:.1}" x2="0" y2="{bottom_y:.1}"><stop offset="0%" stop-color="{}" stop-opacity="{}"/><stop offset="100%" stop-color="{}" stop-opacity="{}"/></linearGradient>"#,
                        top_color.to_hex_rgb(),
                        opacity(top_color.alpha),
                        bottom_color.to_hex_rgb(),
                        opacity(bottom_color.alpha)
                    )?;
                    format!(r#"fill="url(#{id})""#)
                }
                None => r#"fill="none""#.to_owned(),
            };
            write_path(body, path, &fill)?;
        }
        for line in &layer.lines {
            write_line(body, line)?;
        }
        for circle in &layer.circles {
            write_circle(body, circle)?;
        }
        for text in &layer.texts {
            write_text(body, text)?;
        }
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.document = self
            .write_frame(frame)
            .map_err(|err| ChartError::InvalidData(format!("failed to write svg: {err}")))?;
        Ok(())
    }
}

fn write_rect(out: &mut String, rect: &RectPrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" {}"#,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        paint(rect.fill_color)
    )?;
    if rect.corner_radius > 0.0 {
        write!(out, r#" rx="{:.1}""#, rect.corner_radius)?;
    }
    if rect.border_width > 0.0 {
        write!(
            out,
            r#" {} stroke-width="{}""#,
            stroke_paint(rect.border_color),
            rect.border_width
        )?;
    }
    writeln!(out, "/>")
}

fn write_path(out: &mut String, path: &PathPrimitive, fill: &str) -> std::fmt::Result {
    let mut d = String::new();
    for command in &path.commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match *command {
            PathCommand::MoveTo { x, y } => write!(d, "M {x:.1} {y:.1}")?,
            PathCommand::LineTo { x, y } => write!(d, "L {x:.1} {y:.1}")?,
            PathCommand::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => write!(d, "C {c1x:.1} {c1y:.1} {c2x:.1} {c2y:.1} {x:.1} {y:.1}")?,
            PathCommand::Close => d.push('Z'),
        }
    }
    write!(out, r#"<path d="{d}" {fill}"#)?;
    if let Some(stroke) = path.stroke {
        write!(
            out,
            r#" {} stroke-width="{}""#,
            stroke_paint(stroke.color),
            stroke.width
        )?;
        if stroke.round_joins {
            write!(out, r#" stroke-linecap="round" stroke-linejoin="round""#)?;
        }
    }
    writeln!(out, "/>")
}

fn write_line(out: &mut String, line: &LinePrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" {} stroke-width="{}""#,
        line.x1,
        line.y1,
        line.x2,
        line.y2,
        stroke_paint(line.color),
        line.stroke_width
    )?;
    if let LineStrokeStyle::Dashed { dash, gap } = line.stroke_style {
        write!(out, r#" stroke-dasharray="{dash} {gap}""#)?;
    }
    writeln!(out, "/>")
}

fn write_circle(out: &mut String, circle: &CirclePrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"<circle cx="{:.1}" cy="{:.1}" r="{}" {}"#,
        circle.cx,
        circle.cy,
        circle.radius,
        paint(circle.fill_color)
    )?;
    if circle.stroke_width > 0.0 {
        write!(
            out,
            r#" {} stroke-width="{}""#,
            stroke_paint(circle.stroke_color),
            circle.stroke_width
        )?;
    }
    writeln!(out, "/>")
}

fn write_text(out: &mut String, text: &TextPrimitive) -> std::fmt::Result {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    let baseline = match text.v_align {
        TextVAlign::Top => "hanging",
        TextVAlign::Middle => "middle",
        TextVAlign::Baseline => "alphabetic",
    };
    let family = if text.monospace {
        MONO_FONT_STACK
    } else {
        SANS_FONT_STACK
    };
    write!(
        out,
        r#"<text x="{:.1}" y="{:.1}" font-size="{}" font-family="{family}" text-anchor="{anchor}" dominant-baseline="{baseline}" {}"#,
        text.x,
        text.y,
        text.font_size_px,
        paint(text.color)
    )?;
    if text.bold {
        write!(out, r#" font-weight="700""#)?;
    }
    writeln!(out, ">{}</text>", escape_xml(&text.text))
}

fn paint(color: Color) -> String {
    if color.alpha >= 1.0 {
        format!(r#"fill="{}""#, color.to_hex_rgb())
    } else {
        format!(
            r#"fill="{}" fill-opacity="{}""#,
            color.to_hex_rgb(),
            opacity(color.alpha)
        )
    }
}

fn stroke_paint(color: Color) -> String {
    if color.alpha >= 1.0 {
        format!(r#"stroke="{}""#, color.to_hex_rgb())
    } else {
        format!(
            r#"stroke="{}" stroke-opacity="{}""#,
            color.to_hex_rgb(),
            opacity(color.alpha)
        )
    }
}

fn opacity(alpha: f64) -> String {
    let rounded = format!("{:.3}", alpha.clamp(0.0, 1.0));
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

fn sanitize_id(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "chart".to_owned()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_xml, opacity, sanitize_id};

    #[test]
    fn opacity_trims_trailing_zeros() {
        assert_eq!(opacity(0.12), "0.12");
        assert_eq!(opacity(0.0), "0");
        assert_eq!(opacity(0.5), "0.5");
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn ids_are_sanitized() {
        assert_eq!(sanitize_id("client series"), "client-series");
        assert_eq!(sanitize_id(""), "chart");
    }
}
