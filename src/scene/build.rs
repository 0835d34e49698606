use std::collections::BTreeMap;

use tracing::{debug, error};

use crate::error::{GeometryError, Result};
use crate::geometry::{CellKey, Ring};
use crate::layout::{CornerMarkLayout, TextMeasure, MAX_CORNER_MARKS};
use crate::math::{approx_eq, Point2, Vector2};
use crate::operations::offset::{DisposePolygon, ShrinkPolygon};
use crate::operations::query::{Aabb, BoundingBox};
use crate::operations::union::UnionCells;
use crate::tessellation::{
    ArrowHead, DashPattern, DashedStroke, LineCap, Path, ShortenLine, StrokeStyle,
};

use super::color::Rgb;
use super::drawable::{
    Drawable, DrawableId, Fill, Owner, Primitive, Shape, Stroke, Text, TextAnchor, ZOrder,
};
use super::hit_test::CellTransform;
use super::model::{Line, OverlayShape, PuzzleModel};
use super::params::SceneParams;
use super::store::DrawableStore;
use super::theme::Theme;

/// Drawables owned by one cell. Created hidden by the build pass and mutated
/// in place by the update passes.
#[derive(Debug, Clone)]
pub struct CellHandles {
    pub border: DrawableId,
    pub digit: DrawableId,
    pub corner_marks: [DrawableId; MAX_CORNER_MARKS],
    pub centre_mark: DrawableId,
    pub color: DrawableId,
    pub selection: DrawableId,
    pub error: DrawableId,
    /// Author-supplied marks; never touched after the build.
    pub given_marks: Vec<DrawableId>,
}

/// Everything the build pass produces for one model version.
#[derive(Debug)]
pub struct BuiltScene {
    pub store: DrawableStore,
    pub cells: BTreeMap<CellKey, CellHandles>,
    pub background: DrawableId,
    /// Bounds of cells, regions and cages.
    pub grid_bounds: Aabb,
    /// Bounds of everything that affects layout, snapped outward to half units.
    pub content_bounds: Aabb,
    /// Scaled cell size in scene units.
    pub cell_size: f64,
}

impl BuiltScene {
    /// Scene-space transform between cells and points.
    #[must_use]
    pub fn cell_transform(&self) -> CellTransform {
        CellTransform::new(self.cell_size, Vector2::zeros())
    }
}

/// Builds every drawable for a puzzle model.
///
/// Geometry that affects layout is created first and measured; transient
/// per-cell placeholders (marks, digits and swatches) are added afterwards so
/// the content bounds never depend on interaction state.
pub struct BuildScene<'a> {
    model: &'a PuzzleModel,
    theme: &'a Theme,
    params: &'a SceneParams,
    measure: &'a dyn TextMeasure,
}

impl<'a> BuildScene<'a> {
    #[must_use]
    pub fn new(
        model: &'a PuzzleModel,
        theme: &'a Theme,
        params: &'a SceneParams,
        measure: &'a dyn TextMeasure,
    ) -> Self {
        Self {
            model,
            theme,
            params,
            measure,
        }
    }

    /// Executes the build pass.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidParameters` for a non-positive cell size,
    /// stroke width or dash pattern, and `GeometryError::DegeneratePolygon`
    /// when a cage outline cannot be offset.
    pub fn execute(&self) -> Result<BuiltScene> {
        let cs = self.model.cell_size * self.params.scale_factor;
        if !(cs > 0.0 && cs.is_finite()) {
            return Err(GeometryError::InvalidParameters(format!(
                "cell size must be positive, got {cs}"
            ))
            .into());
        }
        debug!(
            cell_size = cs,
            regions = self.model.regions.len(),
            cages = self.model.cages.len(),
            "building scene"
        );

        let transform = CellTransform::new(cs, Vector2::zeros());
        let mut store = DrawableStore::new();
        let mut grid = BoundingBox::new();
        let mut content = BoundingBox::new();

        let borders = self.add_cell_borders(&mut store, &transform, &mut grid)?;
        let region_rings = self.add_regions(&mut store, cs, &mut grid)?;
        self.add_cages(&mut store, cs, &region_rings, &mut grid)?;

        let grid_bounds = grid
            .finish()
            .unwrap_or_else(|| Aabb::from_origin_size(0.0, 0.0, 0.0, 0.0));
        content.include(&grid_bounds);

        self.add_lines(&mut store, &transform, &mut content)?;
        self.add_shapes(&mut store, &transform, &mut content)?;

        let content_bounds = content.finish().unwrap_or(grid_bounds).snapped_to_half();
        let background = store.add(Drawable::new(
            Primitive::Shape {
                shape: Shape::Rect {
                    origin: content_bounds.min,
                    width: content_bounds.width(),
                    height: content_bounds.height(),
                    corner_radius: 0.0,
                },
                fill: Some(Fill {
                    color: self.theme.background,
                    alpha: 1.0,
                }),
                stroke: None,
            },
            ZOrder::BACKGROUND,
            Owner::Background,
        ));

        let cells = self.add_cell_placeholders(&mut store, &transform, borders);

        debug!(
            drawables = store.len(),
            width = content_bounds.width(),
            height = content_bounds.height(),
            "scene built"
        );
        Ok(BuiltScene {
            store,
            cells,
            background,
            grid_bounds,
            content_bounds,
            cell_size: cs,
        })
    }

    fn add_cell_borders(
        &self,
        store: &mut DrawableStore,
        transform: &CellTransform,
        grid: &mut BoundingBox,
    ) -> Result<BTreeMap<CellKey, DrawableId>> {
        let stroke = Stroke::solid(
            self.theme.foreground,
            StrokeStyle::new(self.params.cell_stroke)?,
        );
        let mut borders = BTreeMap::new();
        for (key, _) in self.model.cell_keys() {
            let d = Drawable::new(
                Primitive::Shape {
                    shape: Shape::Rect {
                        origin: transform.cell_origin(key),
                        width: transform.cell_size,
                        height: transform.cell_size,
                        corner_radius: 0.0,
                    },
                    fill: None,
                    stroke: Some(stroke),
                },
                ZOrder::CELL,
                Owner::Cell(key),
            );
            include_bounds(grid, &d);
            borders.insert(key, store.add(d));
        }
        Ok(borders)
    }

    /// Adds the solid region borders and returns their rings in region order,
    /// for disposing cage outlines against.
    fn add_regions(
        &self,
        store: &mut DrawableStore,
        cs: f64,
        grid: &mut BoundingBox,
    ) -> Result<Vec<Ring>> {
        let stroke = Stroke::solid(
            self.theme.foreground,
            StrokeStyle::new(self.params.region_stroke)?,
        );
        let mut rings = Vec::new();
        for (i, region) in self.model.regions.iter().enumerate() {
            for outline in UnionCells::new(region.iter().copied()).execute_scaled(cs) {
                for ring in outline.rings() {
                    let d = Drawable::new(
                        Primitive::Shape {
                            shape: Shape::Polygon(ring.clone()),
                            fill: None,
                            stroke: Some(stroke),
                        },
                        ZOrder::REGION,
                        Owner::Region(i),
                    );
                    include_bounds(grid, &d);
                    store.add(d);
                    rings.push(ring.clone());
                }
            }
        }
        Ok(rings)
    }

    fn add_cages(
        &self,
        store: &mut DrawableStore,
        cs: f64,
        region_rings: &[Ring],
        grid: &mut BoundingBox,
    ) -> Result<()> {
        let p = self.params;
        let stroke = Stroke::solid(self.theme.foreground, StrokeStyle::new(p.cage_stroke)?);
        let pattern = DashPattern::new(p.cage_dash, p.cage_gap)?;

        for (i, cage) in self.model.cages.iter().enumerate() {
            let mut path = Path::new();
            let cells = cage.cells.iter().copied();
            for outline in UnionCells::new(cells).execute_scaled(cs) {
                for ring in outline.rings() {
                    let inset = DisposePolygon::new(ring, region_rings, p.cage_dispose)
                        .execute()
                        .and_then(|disposal| {
                            ShrinkPolygon::new(&disposal.ring, p.cage_inset).execute()
                        })
                        .inspect_err(|err| error!(cage = i, %err, "cage outline rejected"))?;
                    DashedStroke::new(&inset, pattern).execute(&mut path)?;
                }
            }
            let d = Drawable::new(
                Primitive::Shape {
                    shape: Shape::Path(path),
                    fill: None,
                    stroke: Some(stroke),
                },
                ZOrder::CAGE_OUTLINE,
                Owner::Cage(i),
            );
            include_bounds(grid, &d);
            store.add(d);

            let (Some(label), Some(top_left)) = (cage.visible_label(), cage.top_left()) else {
                continue;
            };
            let col = f64::from(top_left.col) * cs;
            let row = f64::from(top_left.row) * cs;
            let text = self.text(
                label,
                Point2::new(col + cs / 20.0, row + cs / 60.0),
                TextAnchor::TopLeft,
                p.cage_label_font,
                p.cage_label_scale,
                self.theme.foreground,
            );
            let w = text.extent.width * text.scale;
            let h = text.extent.height * text.scale;
            let backdrop = Drawable::new(
                Primitive::Shape {
                    shape: Shape::Rect {
                        origin: Point2::new(col + 0.5, row + 0.5),
                        width: w + cs / 10.0 - 1.0,
                        height: h + cs / 60.0,
                        corner_radius: 0.0,
                    },
                    fill: Some(Fill {
                        color: self.theme.background,
                        alpha: 1.0,
                    }),
                    stroke: None,
                },
                ZOrder::CAGE_LABEL_BACKGROUND,
                Owner::Cage(i),
            );
            let label = Drawable::new(Primitive::Text(text), ZOrder::CAGE_LABEL, Owner::Cage(i));
            include_bounds(grid, &backdrop);
            include_bounds(grid, &label);
            store.add(backdrop);
            store.add(label);
        }
        Ok(())
    }

    fn add_lines(
        &self,
        store: &mut DrawableStore,
        transform: &CellTransform,
        content: &mut BoundingBox,
    ) -> Result<()> {
        let lines = self
            .model
            .lines
            .iter()
            .enumerate()
            .map(|(i, l)| (l, Owner::Line(i)));
        let arrows = self
            .model
            .arrows
            .iter()
            .enumerate()
            .map(|(i, a)| (&a.line, Owner::Arrow(i)));
        for (line, owner) in lines.chain(arrows) {
            if line.waypoints.is_empty() {
                debug!(?owner, "skipping line without waypoints");
                continue;
            }
            let points = self.line_points(line, transform);
            let d = Drawable::new(
                Primitive::Shape {
                    shape: Shape::Path(Path::polyline(&points)),
                    fill: None,
                    stroke: Some(self.line_stroke(line)?),
                },
                ZOrder::DECORATION,
                owner,
            );
            include_bounds(content, &d);
            store.add(d);
        }

        for (i, arrow) in self.model.arrows.iter().enumerate() {
            let points = self.line_points(&arrow.line, transform);
            let size = arrow.head_length * transform.cell_size * self.params.arrow_head_factor;
            let Some(head) = ArrowHead::new(&points, size).execute() else {
                continue;
            };
            let d = Drawable::new(
                Primitive::Shape {
                    shape: Shape::Path(head),
                    fill: None,
                    stroke: Some(self.line_stroke(&arrow.line)?),
                },
                ZOrder::DECORATION,
                Owner::Arrow(i),
            );
            include_bounds(content, &d);
            store.add(d);
        }
        Ok(())
    }

    fn line_points(&self, line: &Line, transform: &CellTransform) -> Vec<Point2> {
        let points: Vec<Point2> = line
            .waypoints
            .iter()
            .map(|wp| transform.to_screen(*wp))
            .collect();
        ShortenLine::new(&points, self.params.line_shorten).execute()
    }

    fn line_stroke(&self, line: &Line) -> Result<Stroke> {
        let style = StrokeStyle::new(line.thickness * self.params.scale_factor)?
            .with_cap(LineCap::Round);
        Ok(Stroke::solid(line.color, style))
    }

    fn add_shapes(
        &self,
        store: &mut DrawableStore,
        transform: &CellTransform,
        content: &mut BoundingBox,
    ) -> Result<()> {
        let underlays = self
            .model
            .underlays
            .iter()
            .enumerate()
            .map(|(i, s)| (s, Owner::Underlay(i), ZOrder::DECORATION));
        let overlays = self
            .model
            .overlays
            .iter()
            .enumerate()
            .map(|(i, s)| (s, Owner::Overlay(i), ZOrder::OVERLAY));
        for (shape, owner, z) in underlays.chain(overlays) {
            for d in self.shape_drawables(shape, transform, owner, z)? {
                include_bounds(content, &d);
                store.add(d);
            }
        }
        Ok(())
    }

    /// The body (when it has a fill or border) and the text of an
    /// underlay or overlay.
    fn shape_drawables(
        &self,
        shape: &OverlayShape,
        transform: &CellTransform,
        owner: Owner,
        z: ZOrder,
    ) -> Result<Vec<Drawable>> {
        let p = self.params;
        let center = transform.to_screen(shape.center);
        let mut out = Vec::with_capacity(2);

        if shape.background.is_some() || shape.border.is_some() {
            let fill = shape.background.map(|color| Fill {
                color,
                alpha: shape_alpha(color),
            });
            let unit = approx_eq(shape.width, 1.0) && approx_eq(shape.height, 1.0);
            let stroke = match shape.border {
                Some(color) if shape.background != Some(color) && !(unit && color.is_grey()) => {
                    Some(Stroke {
                        color,
                        alpha: shape_alpha(color),
                        style: StrokeStyle::new(p.overlay_stroke)?,
                        inset: true,
                    })
                }
                _ => None,
            };

            let w = shape.width * transform.cell_size;
            let h = shape.height * transform.cell_size;
            let radius = if shape.rounded {
                w.min(h) / 2.0 - 1.0
            } else {
                0.0
            };
            let body = if shape.rounded && approx_eq(w, h) {
                Shape::Ellipse {
                    center,
                    rx: w / 2.0,
                    ry: h / 2.0,
                }
            } else {
                Shape::Rect {
                    origin: center - Vector2::new(w / 2.0, h / 2.0),
                    width: w,
                    height: h,
                    corner_radius: radius,
                }
            };
            out.push(Drawable::new(
                Primitive::Shape {
                    shape: body,
                    fill,
                    stroke,
                },
                z,
                owner,
            ));
        }

        if let Some(content) = &shape.text {
            let font =
                shape.font_size.unwrap_or(p.overlay_font) * p.scale_factor / p.overlay_text_scale;
            let text = self.text(
                content,
                center,
                TextAnchor::Centre,
                font,
                p.overlay_text_scale,
                self.theme.foreground,
            );
            out.push(Drawable::new(Primitive::Text(text), z, owner));
        }
        Ok(out)
    }

    fn add_cell_placeholders(
        &self,
        store: &mut DrawableStore,
        transform: &CellTransform,
        borders: BTreeMap<CellKey, DrawableId>,
    ) -> BTreeMap<CellKey, CellHandles> {
        let p = self.params;
        let cs = transform.cell_size;
        let digit_color = self.theme.digit;
        let mut cells = BTreeMap::new();

        for (key, border) in borders {
            let owner = Owner::Cell(key);
            let origin = transform.cell_origin(key);
            let centre = Point2::new(origin.x + cs / 2.0, origin.y + cs / 2.0 - 0.5);
            let given = self
                .model
                .cell(key)
                .map_or(&[][..], |c| c.given_marks.as_slice());
            let labelled = self.model.has_cage_label_at(key);

            let given_layout = CornerMarkLayout::new(origin, cs, p.corner_mark_font, labelled);
            let given_marks = given
                .iter()
                .zip(given_layout.slots(given.len()))
                .map(|(mark, slot)| {
                    let mut text = self.text(
                        mark,
                        slot.position,
                        TextAnchor::Centre,
                        slot.font_size,
                        p.mark_scale,
                        self.theme.foreground,
                    );
                    text.bold = true;
                    store.add(Drawable::new(Primitive::Text(text), ZOrder::GIVEN_MARK, owner))
                })
                .collect();

            let digit_text = self.text(
                "",
                centre,
                TextAnchor::Centre,
                p.digit_font,
                1.0,
                digit_color,
            );
            let digit = store.add(placeholder(digit_text, owner));

            let leave_room = labelled || !given.is_empty();
            let layout = CornerMarkLayout::new(origin, cs, p.corner_mark_font, leave_room);
            let corner_marks = layout.all_slots().map(|slot| {
                let text = self.text(
                    "",
                    slot.position,
                    TextAnchor::Centre,
                    slot.font_size,
                    p.mark_scale,
                    digit_color,
                );
                store.add(placeholder(text, owner))
            });

            let centre_text = self.text(
                "",
                centre,
                TextAnchor::Centre,
                p.centre_mark_font,
                p.mark_scale,
                digit_color,
            );
            let centre_mark = store.add(placeholder(centre_text, owner));

            let color = store.add(swatch(origin, cs, None, ZOrder::COLOR, owner));
            let selection = store.add(swatch(
                origin,
                cs,
                Some(Fill {
                    color: p.selection_color,
                    alpha: p.selection_alpha,
                }),
                ZOrder::SELECTION,
                owner,
            ));
            let error = store.add(swatch(
                origin,
                cs,
                Some(Fill {
                    color: p.error_color,
                    alpha: p.error_alpha,
                }),
                ZOrder::ERROR,
                owner,
            ));

            cells.insert(
                key,
                CellHandles {
                    border,
                    digit,
                    corner_marks,
                    centre_mark,
                    color,
                    selection,
                    error,
                    given_marks,
                },
            );
        }
        cells
    }

    fn text(
        &self,
        content: &str,
        position: Point2,
        anchor: TextAnchor,
        font_size: f64,
        scale: f64,
        color: Rgb,
    ) -> Text {
        Text {
            content: content.to_owned(),
            position,
            anchor,
            font_size,
            bold: false,
            color,
            scale,
            extent: self.measure.measure(content, font_size),
        }
    }
}

/// A hidden cell-sized rectangle inset by half a unit.
fn swatch(origin: Point2, cs: f64, fill: Option<Fill>, z: ZOrder, owner: Owner) -> Drawable {
    Drawable::new(
        Primitive::Shape {
            shape: Shape::Rect {
                origin: origin + Vector2::new(0.5, 0.5),
                width: cs - 1.0,
                height: cs - 1.0,
                corner_radius: 0.0,
            },
            fill,
            stroke: None,
        },
        z,
        owner,
    )
    .hidden()
}

/// A hidden digit or mark text, filled in by the update passes.
fn placeholder(text: Text, owner: Owner) -> Drawable {
    Drawable::new(Primitive::Text(text), ZOrder::DIGIT, owner).hidden()
}

/// Grey fills and borders are drawn opaque, colours at half strength.
fn shape_alpha(color: Rgb) -> f64 {
    if color.is_grey() {
        1.0
    } else {
        0.5
    }
}

fn include_bounds(acc: &mut BoundingBox, drawable: &Drawable) {
    if let Some(bb) = drawable.bounds() {
        acc.include(&bb);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::GridPoint;
    use crate::layout::ApproximateMetrics;
    use crate::scene::model::{Arrow, Cage};
    use approx::assert_relative_eq;

    fn build(model: &PuzzleModel) -> Result<BuiltScene> {
        let params = SceneParams::default();
        BuildScene::new(
            model,
            &Theme::default(),
            &params,
            &ApproximateMetrics::default(),
        )
        .execute()
    }

    fn count(built: &BuiltScene, f: impl Fn(&Drawable) -> bool) -> usize {
        built.store.iter().filter(|(_, d)| f(d)).count()
    }

    #[test]
    fn every_cell_gets_a_full_registry_entry() {
        let model = PuzzleModel::with_boxes(4, 2, 2, 40.0);
        let built = build(&model).unwrap();
        assert_eq!(built.cells.len(), 16);
        assert_relative_eq!(built.cell_size, 48.0);
        let handles = &built.cells[&CellKey::new(3, 3)];
        assert!(built.store.get(handles.border).unwrap().is_visible());
        for id in handles.corner_marks {
            assert!(!built.store.get(id).unwrap().is_visible());
        }
        assert!(!built.store.get(handles.selection).unwrap().is_visible());
    }

    #[test]
    fn grid_bounds_include_region_stroke() {
        let model = PuzzleModel::with_boxes(4, 2, 2, 40.0);
        let built = build(&model).unwrap();
        // 4 * 48 plus half the region stroke on each side.
        assert_relative_eq!(built.grid_bounds.min.x, -1.5);
        assert_relative_eq!(built.grid_bounds.width(), 195.0);
        assert_relative_eq!(built.content_bounds.min.x, -1.5);
        assert_relative_eq!(built.content_bounds.width(), 195.0);
    }

    #[test]
    fn transient_placeholders_do_not_grow_bounds() {
        let mut model = PuzzleModel::with_boxes(2, 1, 1, 40.0);
        model.cells[0][0].given_marks = vec!["1".into(), "2".into()];
        let built = build(&model).unwrap();
        let bare = build(&PuzzleModel::with_boxes(2, 1, 1, 40.0)).unwrap();
        assert_eq!(built.content_bounds, bare.content_bounds);
        assert_eq!(built.cells[&CellKey::new(0, 0)].given_marks.len(), 2);
    }

    #[test]
    fn cage_outline_is_dashed_inside_the_region_border() {
        let mut model = PuzzleModel::with_boxes(3, 3, 3, 40.0);
        model.cages.push(Cage {
            cells: vec![CellKey::new(0, 0), CellKey::new(0, 1)],
            label: Some("3".into()),
        });
        let built = build(&model).unwrap();
        let outline = built
            .store
            .iter()
            .find(|(_, d)| d.z == ZOrder::CAGE_OUTLINE)
            .map(|(_, d)| d.clone())
            .unwrap();
        let bb = outline.bounds().unwrap();
        // Region edges are pushed 1 further, then everything is shrunk by 3.
        assert_relative_eq!(bb.min.x, 4.0 - 0.5);
        assert_relative_eq!(bb.min.y, 4.0 - 0.5);
        assert_eq!(count(&built, |d| d.z == ZOrder::CAGE_LABEL), 1);
        assert_eq!(count(&built, |d| d.z == ZOrder::CAGE_LABEL_BACKGROUND), 1);
    }

    #[test]
    fn blank_cage_label_renders_nothing() {
        let mut model = PuzzleModel::new(2, 2, 40.0);
        model.cages.push(Cage {
            cells: vec![CellKey::new(0, 0)],
            label: Some(" ".into()),
        });
        let built = build(&model).unwrap();
        assert_eq!(count(&built, |d| d.z == ZOrder::CAGE_LABEL), 0);
    }

    #[test]
    fn arrows_get_a_head_and_extend_content() {
        let mut model = PuzzleModel::new(2, 2, 40.0);
        model.arrows.push(Arrow {
            line: Line {
                waypoints: vec![GridPoint::new(0.5, 0.5), GridPoint::new(0.5, 3.0)],
                color: Rgb(0x00a0_a0a0),
                thickness: 2.0,
            },
            head_length: 0.3,
        });
        let built = build(&model).unwrap();
        assert_eq!(count(&built, |d| d.owner == Owner::Arrow(0)), 2);
        assert!(built.content_bounds.max.x > built.grid_bounds.max.x);
    }

    #[test]
    fn overlay_styling_rules() {
        let mut model = PuzzleModel::new(2, 2, 40.0);
        let mut circle = OverlayShape::new(GridPoint::new(1.0, 1.0), 1.0, 1.0);
        circle.rounded = true;
        circle.background = Some(Rgb(0x00ff_0000));
        circle.border = Some(Rgb(0x0080_8080));
        circle.text = Some("5".into());
        model.overlays.push(circle);
        let mut pill = OverlayShape::new(GridPoint::new(1.0, 1.0), 2.0, 1.0);
        pill.rounded = true;
        pill.background = Some(Rgb(0x0080_8080));
        model.underlays.push(pill);

        let built = build(&model).unwrap();
        let overlay: Vec<_> = built
            .store
            .iter()
            .filter(|(_, d)| d.owner == Owner::Overlay(0))
            .map(|(_, d)| d.clone())
            .collect();
        assert_eq!(overlay.len(), 2);
        let Primitive::Shape { shape, stroke, .. } = &overlay[0].primitive else {
            panic!("expected shape");
        };
        assert!(matches!(shape, Shape::Ellipse { .. }));
        assert_relative_eq!(overlay[0].fill().unwrap().alpha, 0.5);
        assert!(stroke.is_none(), "grey border on a 1x1 shape is dropped");
        assert_relative_eq!(overlay[1].text().unwrap().font_size, 32.0);

        let underlay = built
            .store
            .iter()
            .find(|(_, d)| d.owner == Owner::Underlay(0))
            .map(|(_, d)| d.clone())
            .unwrap();
        let Primitive::Shape { shape, fill, .. } = &underlay.primitive else {
            panic!("expected shape");
        };
        let Shape::Rect { corner_radius, .. } = shape else {
            panic!("expected rounded rect");
        };
        assert_relative_eq!(*corner_radius, 23.0);
        assert_relative_eq!(fill.unwrap().alpha, 1.0);
    }

    #[test]
    fn non_positive_cell_size_is_rejected() {
        let model = PuzzleModel::new(1, 1, 0.0);
        assert!(build(&model).is_err());
    }

    #[test]
    fn empty_model_has_empty_bounds() {
        let model = PuzzleModel::new(0, 0, 40.0);
        let built = build(&model).unwrap();
        assert!(built.cells.is_empty());
        assert_relative_eq!(built.content_bounds.width(), 0.0);
    }
}
