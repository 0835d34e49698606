use std::fmt::Write;

use crate::math::Vector2;
use crate::tessellation::{LineCap, PathCommand};

use super::drawable::{Drawable, Fill, Primitive, Shape, Stroke, TextAnchor};
use super::store::DrawableStore;
use super::viewport::Viewport;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A presented frame: the visible drawables in paint order plus the root
/// transform that maps them onto the output surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub translation: Vector2,
    pub items: Vec<Drawable>,
}

impl Frame {
    /// Collects the visible drawables of `store`, stably sorted by z order.
    #[must_use]
    pub fn capture(store: &DrawableStore, viewport: &Viewport) -> Self {
        let mut items: Vec<Drawable> = store
            .iter()
            .filter(|(_, d)| d.is_visible())
            .map(|(_, d)| d.clone())
            .collect();
        items.sort_by_key(|d| d.z);
        Self {
            width: viewport.output_width,
            height: viewport.output_height,
            scale: viewport.scale,
            translation: viewport.translation,
            items,
        }
    }

    /// Serialises the frame as a standalone SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let (w, h) = (fmt_num(self.width), fmt_num(self.height));
        let mut svg = format!(
            "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"{SVG_NS}\">"
        );
        let _ = write!(
            svg,
            "<g transform=\"translate({} {}) scale({})\">",
            fmt_num(self.translation.x),
            fmt_num(self.translation.y),
            fmt_num(self.scale),
        );
        for item in &self.items {
            write_drawable(&mut svg, item);
        }
        svg.push_str("</g></svg>");
        svg
    }
}

fn write_drawable(out: &mut String, d: &Drawable) {
    match &d.primitive {
        Primitive::Shape {
            shape,
            fill,
            stroke,
        } => {
            let paint = paint_attrs(d.alpha, fill.as_ref(), stroke.as_ref());
            // Writing into a String cannot fail.
            let _ = match shape {
                Shape::Rect {
                    origin,
                    width,
                    height,
                    corner_radius,
                } => write!(
                    out,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\"{paint}/>",
                    fmt_num(origin.x),
                    fmt_num(origin.y),
                    fmt_num(*width),
                    fmt_num(*height),
                    fmt_num(*corner_radius),
                ),
                Shape::Ellipse { center, rx, ry } => write!(
                    out,
                    "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{paint}/>",
                    fmt_num(center.x),
                    fmt_num(center.y),
                    fmt_num(*rx),
                    fmt_num(*ry),
                ),
                Shape::Polygon(ring) => {
                    let points: Vec<String> = ring
                        .points
                        .iter()
                        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
                        .collect();
                    write!(out, "<polygon points=\"{}\"{paint}/>", points.join(" "))
                }
                Shape::Path(path) => {
                    let data: Vec<String> = path
                        .commands
                        .iter()
                        .map(|cmd| {
                            let (op, p) = match cmd {
                                PathCommand::MoveTo(p) => ('M', p),
                                PathCommand::LineTo(p) => ('L', p),
                            };
                            format!("{op} {} {}", fmt_num(p.x), fmt_num(p.y))
                        })
                        .collect();
                    write!(out, "<path d=\"{}\"{paint}/>", data.join(" "))
                }
            };
        }
        Primitive::Text(text) => {
            let baseline = match text.anchor {
                TextAnchor::Centre => " text-anchor=\"middle\" dominant-baseline=\"central\"",
                TextAnchor::TopLeft => " dominant-baseline=\"hanging\"",
            };
            let weight = if text.bold {
                " font-weight=\"bold\""
            } else {
                ""
            };
            let content = escape(&text.content);
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\" opacity=\"{}\"",
                fmt_num(text.position.x),
                fmt_num(text.position.y),
                fmt_num(text.font_size * text.scale),
                text.color,
                fmt_num(d.alpha),
            );
            let _ = write!(out, "{baseline}{weight}>{content}</text>");
        }
    }
}

fn paint_attrs(alpha: f64, fill: Option<&Fill>, stroke: Option<&Stroke>) -> String {
    let mut attrs = format!(" opacity=\"{}\"", fmt_num(alpha));
    match fill {
        Some(f) => {
            let opacity = fmt_num(f.alpha);
            let _ = write!(attrs, " fill=\"{}\" fill-opacity=\"{opacity}\"", f.color);
        }
        None => attrs.push_str(" fill=\"none\""),
    }
    if let Some(s) = stroke {
        let _ = write!(
            attrs,
            " stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\"",
            s.color,
            fmt_num(s.alpha),
            fmt_num(s.style.width()),
        );
        if s.style.cap() == LineCap::Round {
            attrs.push_str(" stroke-linecap=\"round\" stroke-linejoin=\"round\"");
        }
    }
    attrs
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn fmt_num(v: f64) -> String {
    let v = if v.abs() < 1e-9 { 0.0 } else { v };
    let rounded = (v * 1e4).round() / 1e4 + 0.0;
    format!("{rounded}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::CellKey;
    use crate::math::Point2;
    use crate::operations::query::Aabb;
    use crate::scene::color::Rgb;
    use crate::scene::drawable::{Owner, ZOrder};
    use crate::scene::viewport::{fit_viewport, ResizeRequest};

    fn rect(z: ZOrder, alpha: f64) -> Drawable {
        let mut d = Drawable::new(
            Primitive::Shape {
                shape: Shape::Rect {
                    origin: Point2::new(0.0, 0.0),
                    width: 10.0,
                    height: 10.0,
                    corner_radius: 0.0,
                },
                fill: Some(Fill {
                    color: Rgb::WHITE,
                    alpha: 1.0,
                }),
                stroke: None,
            },
            z,
            Owner::Cell(CellKey::new(0, 0)),
        );
        d.alpha = alpha;
        d
    }

    fn viewport() -> Viewport {
        let bb = Aabb::from_origin_size(0.0, 0.0, 10.0, 10.0);
        fit_viewport(&bb, &bb, &ResizeRequest::unbounded()).unwrap()
    }

    #[test]
    fn capture_sorts_by_z_and_drops_hidden() {
        let mut store = DrawableStore::new();
        store.add(rect(ZOrder::DIGIT, 1.0));
        store.add(rect(ZOrder::SELECTION, 0.0));
        store.add(rect(ZOrder::BACKGROUND, 1.0));
        store.add(rect(ZOrder::COLOR, 0.5));
        let frame = Frame::capture(&store, &viewport());
        let z: Vec<_> = frame.items.iter().map(|d| d.z).collect();
        assert_eq!(z, vec![ZOrder::BACKGROUND, ZOrder::COLOR, ZOrder::DIGIT]);
    }

    #[test]
    fn svg_contains_every_item() {
        let mut store = DrawableStore::new();
        store.add(rect(ZOrder::BACKGROUND, 1.0));
        let svg = Frame::capture(&store, &viewport()).to_svg();
        assert!(svg.starts_with("<svg width=\"10\" height=\"10\""));
        assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"10\" height=\"10\""));
        assert!(svg.contains("fill=\"#ffffff\""));
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(-1e-12), "0");
        assert_eq!(fmt_num(0.123_456), "0.1235");
    }
}
