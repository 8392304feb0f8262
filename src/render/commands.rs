//! Draw commands produced by a renderer, and their SVG serialization.
//!
//! Commands are plain data so a frame can be compared, hashed or handed
//! to any drawing surface. SVG is the built-in surface.

use crate::palette::Rgb;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::Write;

/// RGB color with opacity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Color {
    pub fn new(rgb: Rgb, alpha: f64) -> Self {
        Self {
            rgb,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Color from 8-bit channels, alpha included.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(Rgb::new(r, g, b), a as f64 / 255.0)
    }

    pub fn opaque(rgb: Rgb) -> Self {
        Self::new(rgb, 1.0)
    }
}

/// Stroke color and width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// Fill and/or stroke of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(Stroke { color, width }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    Normal,
    Screen,
}

/// One drawing operation in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner: f64,
        paint: Paint,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        paint: Paint,
    },
    Ellipse {
        center: (f64, f64),
        radii: (f64, f64),
        paint: Paint,
    },
    Triangle {
        points: [(f64, f64); 3],
        paint: Paint,
    },
    /// Cubic bezier from `from` to `to`.
    Bezier {
        from: (f64, f64),
        ctrl1: (f64, f64),
        ctrl2: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
    },
    /// Elliptical arc on the ellipse centered at `center`, angles in
    /// radians measured clockwise from the positive x axis.
    Arc {
        center: (f64, f64),
        radii: (f64, f64),
        start: f64,
        end: f64,
        stroke: Stroke,
    },
    /// Text centered on its anchor point.
    Text {
        anchor: (f64, f64),
        size: f64,
        content: String,
        fill: Color,
    },
    BeginLayer {
        blend: BlendMode,
    },
    EndLayer,
}

/// Ordered draw commands for one frame of a `width` x `height` canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommands {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl DrawCommands {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Hex SHA-256 of the SVG serialization. Equal frames share it.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.to_svg().as_bytes());
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Serialize as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut body = String::new();
        for command in &self.commands {
            write_command(&mut body, command);
        }
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">
{}</svg>"#,
            self.width, self.height, self.width, self.height, body
        )
    }
}

fn paint_attrs(paint: &Paint) -> String {
    let mut attrs = String::new();
    match paint.fill {
        Some(fill) => {
            let _ = write!(attrs, r#" fill="{}""#, fill.rgb);
            if fill.alpha < 1.0 {
                let _ = write!(attrs, r#" fill-opacity="{:.3}""#, fill.alpha);
            }
        }
        None => attrs.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = paint.stroke {
        attrs.push_str(&stroke_attrs(&stroke));
    }
    attrs
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        r#" stroke="{}" stroke-width="{:.2}""#,
        stroke.color.rgb, stroke.width
    );
    if stroke.color.alpha < 1.0 {
        let _ = write!(attrs, r#" stroke-opacity="{:.3}""#, stroke.color.alpha);
    }
    attrs
}

fn write_command(out: &mut String, command: &DrawCommand) {
    let _ = match command {
        DrawCommand::Rect {
            x,
            y,
            width,
            height,
            corner,
            paint,
        } => writeln!(
            out,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{:.1}"{}/>"#,
            x,
            y,
            width,
            height,
            corner,
            paint_attrs(paint)
        ),
        DrawCommand::Line { from, to, stroke } => writeln!(
            out,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"{} stroke-linecap="round"/>"#,
            from.0,
            from.1,
            to.0,
            to.1,
            stroke_attrs(stroke)
        ),
        DrawCommand::Circle {
            center,
            radius,
            paint,
        } => writeln!(
            out,
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.2}"{}/>"#,
            center.0,
            center.1,
            radius,
            paint_attrs(paint)
        ),
        DrawCommand::Ellipse {
            center,
            radii,
            paint,
        } => writeln!(
            out,
            r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.2}" ry="{:.2}"{}/>"#,
            center.0,
            center.1,
            radii.0,
            radii.1,
            paint_attrs(paint)
        ),
        DrawCommand::Triangle { points, paint } => writeln!(
            out,
            r#"<polygon points="{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}"{}/>"#,
            points[0].0,
            points[0].1,
            points[1].0,
            points[1].1,
            points[2].0,
            points[2].1,
            paint_attrs(paint)
        ),
        DrawCommand::Bezier {
            from,
            ctrl1,
            ctrl2,
            to,
            stroke,
        } => writeln!(
            out,
            r#"<path d="M {:.1} {:.1} C {:.1} {:.1} {:.1} {:.1} {:.1} {:.1}" fill="none"{} stroke-linecap="round"/>"#,
            from.0,
            from.1,
            ctrl1.0,
            ctrl1.1,
            ctrl2.0,
            ctrl2.1,
            to.0,
            to.1,
            stroke_attrs(stroke)
        ),
        DrawCommand::Arc {
            center,
            radii,
            start,
            end,
            stroke,
        } => {
            let point = |angle: f64| {
                (
                    center.0 + radii.0 * angle.cos(),
                    center.1 + radii.1 * angle.sin(),
                )
            };
            let (sx, sy) = point(*start);
            let (ex, ey) = point(*end);
            let large = if (end - start).abs() > std::f64::consts::PI {
                1
            } else {
                0
            };
            writeln!(
                out,
                r#"<path d="M {:.1} {:.1} A {:.1} {:.1} 0 {} 1 {:.1} {:.1}" fill="none"{}/>"#,
                sx,
                sy,
                radii.0,
                radii.1,
                large,
                ex,
                ey,
                stroke_attrs(stroke)
            )
        }
        DrawCommand::Text {
            anchor,
            size,
            content,
            fill,
        } => writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" font-family="system-ui, sans-serif" font-size="{:.1}" text-anchor="middle" dominant-baseline="middle" fill="{}" fill-opacity="{:.3}">{}</text>"#,
            anchor.0,
            anchor.1,
            size,
            fill.rgb,
            fill.alpha,
            escape_xml(content)
        ),
        DrawCommand::BeginLayer { blend } => match blend {
            BlendMode::Normal => writeln!(out, "<g>"),
            BlendMode::Screen => writeln!(out, r#"<g style="mix-blend-mode:screen">"#),
        },
        DrawCommand::EndLayer => writeln!(out, "</g>"),
    };
}

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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
