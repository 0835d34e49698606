use crate::geometry::{CellKey, Ring};
use crate::layout::TextSize;
use crate::math::Point2;
use crate::operations::query::{Aabb, BoundingBox};
use crate::tessellation::{Path, StrokeStyle};

use super::color::Rgb;

slotmap::new_key_type! {
    /// Handle to a drawable owned by the scene.
    pub struct DrawableId;
}

/// Paint order: `layer` first, then `sublayer` for children of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZOrder {
    pub layer: i32,
    pub sublayer: i32,
}

impl ZOrder {
    const fn new(layer: i32, sublayer: i32) -> Self {
        Self { layer, sublayer }
    }

    pub const BACKGROUND: Self = Self::new(-1000, 0);
    /// Lines, arrows and underlays.
    pub const DECORATION: Self = Self::new(-1, 0);
    pub const COLOR: Self = Self::new(0, 0);
    pub const ERROR: Self = Self::new(10, 0);
    pub const SELECTION: Self = Self::new(20, 0);
    pub const CELL: Self = Self::new(30, 0);
    pub const CAGE_OUTLINE: Self = Self::new(30, 1);
    pub const CAGE_LABEL_BACKGROUND: Self = Self::new(30, 2);
    pub const CAGE_LABEL: Self = Self::new(30, 3);
    pub const REGION: Self = Self::new(30, 10);
    pub const OVERLAY: Self = Self::new(40, 0);
    pub const GIVEN_MARK: Self = Self::new(41, 0);
    /// Digits, corner marks and centre marks.
    pub const DIGIT: Self = Self::new(50, 0);
}

/// The puzzle element a drawable belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Background,
    Cell(CellKey),
    Region(usize),
    Cage(usize),
    Line(usize),
    Arrow(usize),
    Underlay(usize),
    Overlay(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: Rgb,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub alpha: f64,
    pub style: StrokeStyle,
    /// Draw the stroke entirely inside the shape instead of centred on it.
    pub inset: bool,
}

impl Stroke {
    /// An opaque centred stroke.
    #[must_use]
    pub fn solid(color: Rgb, style: StrokeStyle) -> Self {
        Self {
            color,
            alpha: 1.0,
            style,
            inset: false,
        }
    }

    /// How far the stroke reaches outside the geometry it follows.
    fn overhang(&self) -> f64 {
        if self.inset {
            0.0
        } else {
            self.style.half_width()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        origin: Point2,
        width: f64,
        height: f64,
        corner_radius: f64,
    },
    Ellipse {
        center: Point2,
        rx: f64,
        ry: f64,
    },
    Polygon(Ring),
    Path(Path),
}

/// Which point of the text box `position` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Centre,
    TopLeft,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub position: Point2,
    pub anchor: TextAnchor,
    pub font_size: f64,
    pub bold: bool,
    pub color: Rgb,
    /// Uniform scale applied to the laid-out text.
    pub scale: f64,
    /// Unscaled size measured when the drawable was created.
    pub extent: TextSize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Shape {
        shape: Shape,
        fill: Option<Fill>,
        stroke: Option<Stroke>,
    },
    Text(Text),
}

/// One visual primitive in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub primitive: Primitive,
    pub z: ZOrder,
    /// Overall opacity; `0.0` hides the drawable.
    pub alpha: f64,
    pub owner: Owner,
}

impl Drawable {
    /// Creates a fully opaque drawable.
    #[must_use]
    pub fn new(primitive: Primitive, z: ZOrder, owner: Owner) -> Self {
        Self {
            primitive,
            z,
            alpha: 1.0,
            owner,
        }
    }

    /// Returns a copy that starts out hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.alpha = 0.0;
        self
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }

    /// Returns the text content, if this is a text drawable.
    #[must_use]
    pub fn text(&self) -> Option<&Text> {
        match &self.primitive {
            Primitive::Text(text) => Some(text),
            Primitive::Shape { .. } => None,
        }
    }

    /// Returns the fill, if this is a filled shape.
    #[must_use]
    pub fn fill(&self) -> Option<Fill> {
        match &self.primitive {
            Primitive::Shape { fill, .. } => *fill,
            Primitive::Text(_) => None,
        }
    }

    /// Area covered on screen, including stroke overhang.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        match &self.primitive {
            Primitive::Shape { shape, stroke, .. } => {
                let overhang = stroke.as_ref().map_or(0.0, Stroke::overhang);
                shape_bounds(shape).map(|bb| bb.expanded(overhang))
            }
            Primitive::Text(text) => Some(text_bounds(text)),
        }
    }
}

fn shape_bounds(shape: &Shape) -> Option<Aabb> {
    match shape {
        Shape::Rect {
            origin,
            width,
            height,
            ..
        } => Some(Aabb::from_origin_size(origin.x, origin.y, *width, *height)),
        Shape::Ellipse { center, rx, ry } => Some(Aabb::from_origin_size(
            center.x - rx,
            center.y - ry,
            rx * 2.0,
            ry * 2.0,
        )),
        Shape::Polygon(ring) => Aabb::from_points(&ring.points),
        Shape::Path(path) => {
            let mut bb = BoundingBox::new();
            for p in path.points() {
                bb.include_point(p);
            }
            bb.finish()
        }
    }
}

fn text_bounds(text: &Text) -> Aabb {
    let w = text.extent.width * text.scale;
    let h = text.extent.height * text.scale;
    match text.anchor {
        TextAnchor::Centre => {
            Aabb::from_origin_size(text.position.x - w / 2.0, text.position.y - h / 2.0, w, h)
        }
        TextAnchor::TopLeft => Aabb::from_origin_size(text.position.x, text.position.y, w, h),
    }
}
