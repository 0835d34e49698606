#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use approx::assert_relative_eq;
use gridscape::geometry::CellKey;
use gridscape::math::Point2;
use gridscape::operations::union::UnionCells;
use gridscape::scene::{
    Cage, Digit, InteractionState, Orientation, PointerHit, PuzzleModel, ResizeRequest, Scene,
    SceneParams, Theme, ZOrder,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sudoku() -> PuzzleModel {
    let mut model = PuzzleModel::with_boxes(9, 3, 3, 40.0);
    model.cages.push(Cage {
        cells: vec![CellKey::new(0, 0), CellKey::new(0, 1), CellKey::new(1, 0)],
        label: Some("12".into()),
    });
    model
}

fn built(model: &PuzzleModel) -> Scene {
    init_tracing();
    let mut scene = Scene::new(SceneParams::default());
    scene.build(model, &Theme::default()).unwrap();
    scene
}

fn visible(scene: &Scene, id: gridscape::scene::DrawableId) -> bool {
    scene.drawable(id).unwrap().is_visible()
}

#[test]
fn single_cell_region_is_a_scaled_unit_square() {
    let cs = 40.0 * SceneParams::default().scale_factor;
    let outlines = UnionCells::new([CellKey::new(0, 0)]).execute_scaled(cs);
    assert_eq!(outlines.len(), 1);
    let ring = &outlines[0].outer;
    assert_eq!(ring.len(), 4);
    let expected = [(0.0, 0.0), (cs, 0.0), (cs, cs), (0.0, cs)];
    for (p, (x, y)) in ring.points.iter().zip(expected) {
        assert_relative_eq!(p.x, x);
        assert_relative_eq!(p.y, y);
    }

    let mut model = PuzzleModel::new(1, 1, 40.0);
    model.regions.push(vec![CellKey::new(0, 0)]);
    let mut scene = built(&model);
    let frame = scene.render().unwrap();
    assert_eq!(
        frame.items.iter().filter(|d| d.z == ZOrder::REGION).count(),
        1
    );
}

#[test]
fn digit_hides_marks_on_next_update() {
    let mut scene = built(&sudoku());
    let key = CellKey::new(4, 4);
    let mut state = InteractionState::default();
    state.corner_marks.insert(key, BTreeSet::from(['1', '9']));
    state.centre_marks.insert(key, BTreeSet::from(['5']));
    scene.sync(&state).unwrap();

    let handles = scene.cell_handles(key).unwrap().clone();
    assert!(visible(&scene, handles.corner_marks[0]));
    assert!(visible(&scene, handles.centre_mark));

    state.digits.insert(
        key,
        Digit {
            value: '3',
            given: false,
        },
    );
    let passes = scene.sync(&state).unwrap();
    assert!(passes.marks);
    assert!(!passes.selection);
    assert!(handles.corner_marks.iter().all(|&id| !visible(&scene, id)));
    assert!(!visible(&scene, handles.centre_mark));
    assert!(visible(&scene, handles.digit));
}

#[test]
fn background_click_clears_selection_without_rebuild() {
    let mut scene = built(&sudoku());
    scene.render().unwrap();
    let mut state = InteractionState::default();
    let corners = [CellKey::new(0, 0), CellKey::new(8, 8)];
    state.selection.extend(corners);
    scene.sync(&state).unwrap();

    // Content starts half a region stroke left of and above the grid.
    let hit = scene.hit_test(Point2::new(0.5, 0.5));
    assert_eq!(hit, PointerHit::Background);
    assert!(hit.clears_selection());

    scene.clear_selection().unwrap();
    assert_eq!(scene.stats().builds, 1);
    let handles = scene.cell_handles(CellKey::new(8, 8)).unwrap().clone();
    assert!(!visible(&scene, handles.selection));

    // The host mirrors the clear in its own state; nothing is left to apply.
    state.selection.clear();
    assert!(scene.sync(&state).unwrap().is_empty());
}

#[test]
fn selection_change_runs_only_the_selection_pass() {
    let mut scene = built(&sudoku());
    let mut state = InteractionState::default();
    state.selection.insert(CellKey::new(3, 3));
    let passes = scene.sync(&state).unwrap();
    assert!(passes.selection);
    assert!(!passes.marks && !passes.colors && !passes.errors);
}

#[test]
fn resize_fits_content() {
    // Two 50-unit cells plus half the border stroke on every side.
    let model = PuzzleModel::new(1, 2, 50.0);
    let params = SceneParams {
        scale_factor: 1.0,
        cell_stroke: 1.0,
        ..SceneParams::default()
    };
    let mut scene = Scene::new(params);
    scene.build(&model, &Theme::default()).unwrap();
    let content = scene.content_bounds().unwrap();
    assert_relative_eq!(content.min.x, -0.5);
    assert_relative_eq!(content.width(), 101.0);

    let viewport = scene
        .fit(ResizeRequest::new(50.5, 50.5, Orientation::Portrait))
        .unwrap();
    assert_relative_eq!(viewport.scale, 0.5);
    assert_relative_eq!(viewport.output_width, 50.5);
    assert_relative_eq!(viewport.output_height, 25.5);
}

#[test]
fn resize_to_nothing_keeps_previous_viewport() {
    let mut scene = built(&sudoku());
    let before = scene
        .fit(ResizeRequest::new(200.0, 200.0, Orientation::Landscape))
        .unwrap();
    let err = scene
        .fit(ResizeRequest::new(0.0, 200.0, Orientation::Landscape))
        .unwrap_err();
    assert!(err.is_invalid_viewport());
    assert_eq!(scene.viewport(), Some(&before));

    scene.request_resize(ResizeRequest::new(-1.0, 10.0, Orientation::Landscape));
    let frame = scene.render().unwrap();
    assert_relative_eq!(frame.scale, before.scale);
}

/// Coalescing is a scheduling policy: intermediate sizes requested between two
/// frames are dropped and only the latest one is fitted.
#[test]
fn resize_requests_are_coalesced() {
    let mut scene = built(&sudoku());
    scene.request_resize(ResizeRequest::new(100.0, 100.0, Orientation::Landscape));
    scene.request_resize(ResizeRequest::new(300.0, 300.0, Orientation::Landscape));
    let frame = scene.render().unwrap();
    assert_eq!(scene.stats().fits, 1);
    let content = scene.content_bounds().unwrap();
    assert_relative_eq!(frame.scale, 300.0 / content.width().max(content.height()));

    scene.render().unwrap();
    assert_eq!(scene.stats().fits, 1);
    assert_eq!(scene.stats().frames, 2);
}

#[test]
fn lookup_miss_keeps_previous_frame() {
    let mut scene = built(&sudoku());
    let mut state = InteractionState::default();
    state.selection.insert(CellKey::new(2, 2));
    scene.sync(&state).unwrap();
    let before = scene.render().unwrap();

    let mut bad = state.clone();
    bad.selection.insert(CellKey::new(20, 20));
    bad.errors.insert(CellKey::new(0, 0));
    let err = scene.sync(&bad).unwrap_err();
    assert!(err.is_lookup_miss());
    assert_eq!(scene.applied_state(), &state);

    let after = scene.render().unwrap();
    assert_eq!(before.items, after.items);
}

#[test]
fn failed_build_keeps_previous_scene() {
    let mut scene = built(&sudoku());
    let before = scene.render().unwrap();

    let broken = PuzzleModel::new(9, 9, -1.0);
    assert!(scene.build(&broken, &Theme::default()).is_err());
    assert_eq!(scene.stats().builds, 1);
    let after = scene.render().unwrap();
    assert_eq!(before.items, after.items);
}

#[test]
fn collapsed_cage_outline_fails_build_and_keeps_previous_scene() {
    let mut scene = built(&sudoku());
    let before = scene.render().unwrap();

    // A 2-unit cell loses 1 unit on every side, leaving a single point.
    let mut tiny = PuzzleModel::new(1, 1, 2.0 / 1.2);
    tiny.regions.push(vec![CellKey::new(0, 0)]);
    tiny.cages.push(Cage {
        cells: vec![CellKey::new(0, 0)],
        label: None,
    });
    let err = scene.build(&tiny, &Theme::default()).unwrap_err();
    assert!(err.is_degenerate_polygon(), "{err}");
    assert_eq!(scene.stats().builds, 1);

    let after = scene.render().unwrap();
    assert_eq!(before.items, after.items);
}

#[test]
fn first_build_failure_leaves_scene_empty() {
    init_tracing();
    let mut scene = Scene::default();
    let empty = PuzzleModel::new(1, 1, 0.0);
    assert!(scene.build(&empty, &Theme::default()).is_err());
    assert!(scene.render().is_err());
}

#[test]
fn svg_export_lists_cage_label() {
    let mut scene = built(&sudoku());
    let svg = scene.render().unwrap().to_svg();
    assert!(svg.contains(">12</text>"));
    assert!(svg.contains("<path d=\"M "));
}
