//! SVG serialization of shapes, the vector form handed to the rasterizer.

use overmark_core::shapes::{SerializableColor, Shape, ShapeStyle, Text};
use kurbo::Point;

/// Distance from the top of a line box to its baseline, per unit of font size.
pub(crate) const TEXT_ASCENT_RATIO: f64 = 0.8;

fn rgb(color: SerializableColor) -> String {
    format!("rgb({},{},{})", color.r, color.g, color.b)
}

fn opacity(color: SerializableColor) -> f64 {
    color.a as f64 / 255.0
}

/// Escape text content for use inside an XML element or attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn stroke_attrs(style: &ShapeStyle) -> String {
    format!(
        r#"stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
        rgb(style.stroke_color),
        opacity(style.stroke_color),
        style.stroke_width
    )
}

fn fill_attrs(style: &ShapeStyle) -> String {
    match style.fill() {
        Some(fill) => format!(r#"fill="{}" fill-opacity="{}""#, rgb(fill), opacity(fill)),
        None => r#"fill="none""#.to_string(),
    }
}

fn highlight_fill(style: &ShapeStyle, highlight_opacity: f64) -> String {
    format!(
        r#"fill="{}" fill-opacity="{}" stroke="none""#,
        rgb(style.stroke_color),
        opacity(style.stroke_color) * highlight_opacity
    )
}

fn text_element(text: &Text) -> String {
    format!(
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" fill="{}" fill-opacity="{}" xml:space="preserve">{}</text>"#,
        text.position.x,
        text.position.y + text.font_size * TEXT_ASCENT_RATIO,
        text.font_family.name(),
        text.font_size,
        text.font_weight.value(),
        rgb(text.style.stroke_color),
        opacity(text.style.stroke_color),
        escape(&text.content)
    )
}

/// One SVG element drawing `shape`.
pub fn shape_element(shape: &Shape) -> String {
    let style = shape.style();
    match shape {
        Shape::Rect(rect) => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" {} {}/>"#,
            rect.position.x,
            rect.position.y,
            rect.width,
            rect.height,
            fill_attrs(style),
            stroke_attrs(style)
        ),
        Shape::Highlight(highlight) => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
            highlight.position.x,
            highlight.position.y,
            highlight.width,
            highlight.height,
            highlight_fill(style, highlight.opacity)
        ),
        Shape::Circle(circle) => format!(
            r#"<circle cx="{}" cy="{}" r="{}" {} {}/>"#,
            circle.center.x,
            circle.center.y,
            circle.radius,
            fill_attrs(style),
            stroke_attrs(style)
        ),
        Shape::Ellipse(ellipse) => format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" {} {}/>"#,
            ellipse.center.x,
            ellipse.center.y,
            ellipse.radius_x,
            ellipse.radius_y,
            fill_attrs(style),
            stroke_attrs(style)
        ),
        Shape::Line(line) => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            line.start.x,
            line.start.y,
            line.end.x,
            line.end.y,
            stroke_attrs(style)
        ),
        Shape::Polygon(polygon) => format!(
            r#"<polygon points="{}" {} {}/>"#,
            points_attr(&polygon.points),
            fill_attrs(style),
            stroke_attrs(style)
        ),
        Shape::RotatedHighlight(highlight) => format!(
            r#"<polygon points="{}" {}/>"#,
            points_attr(&highlight.points),
            highlight_fill(style, highlight.opacity)
        ),
        Shape::Text(text) => text_element(text),
        Shape::Path(_) | Shape::Arrow(_) | Shape::Cross(_) => format!(
            r#"<path d="{}" fill="none" {}/>"#,
            shape.to_path().to_svg(),
            stroke_attrs(style)
        ),
    }
}

/// Standalone document of the given pixel size containing `shapes`.
pub fn document<'a>(width: u32, height: u32, shapes: impl IntoIterator<Item = &'a Shape>) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    for shape in shapes {
        svg.push_str(&shape_element(shape));
    }
    svg.push_str("</svg>");
    svg
}

/// Minimal document holding only `text`, used for measuring it.
pub(crate) fn text_probe(text: &Text) -> String {
    let width = (text.content.chars().count() as f64 * text.font_size * 2.0).ceil().max(1.0);
    let height = (text.font_size * 2.0).ceil().max(1.0);
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">{}</svg>"#,
        text_element(text)
    )
}
