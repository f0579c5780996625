use level::test_maps::SquareRoom;

use super::*;
use crate::AutomapRenderer;

#[test]
fn square_room_overview() {
    let map = load(&SquareRoom::default());
    let player = player_at(&map, 0.0);
    let mut surface = RecordingSurface::new(320, 200);
    AutomapRenderer::default().draw(&map, &player, &mut surface);

    assert_eq!(surface.calls[0], DrawCall::Clear);
    assert_eq!(surface.count(|c| matches!(c, DrawCall::Line { .. })), 4);
    assert_eq!(surface.count(|c| matches!(c, DrawCall::Circle { .. })), 1);
    // both things
    assert_eq!(
        surface.count(|c| matches!(c, DrawCall::Rect { w: 2, h: 2, filled: true, .. })),
        2
    );

    let circle = surface.calls.iter().find_map(|c| match *c {
        DrawCall::Circle { x, y, radius, .. } => Some((x, y, radius)),
        _ => None,
    });
    // 128 / 10 in from the bottom left
    assert_eq!(circle, Some((12, 187, 4)));
}

#[test]
fn lines_follow_the_scale() {
    let map = load(&SquareRoom::default());
    let player = player_at(&map, 0.0);
    let mut surface = RecordingSurface::new(320, 200);
    AutomapRenderer::new(2.0).draw(&map, &player, &mut surface);

    // west wall, (0,0) to (0,256)
    assert!(surface.calls.contains(&DrawCall::Line {
        x1: 0,
        y1: 200,
        x2: 0,
        y2: 72,
        colour: [255, 0, 0, 255],
    }));
}

#[test]
fn node_boxes_and_split() {
    let map = load(&SquareRoom::default());
    let mut surface = RecordingSurface::new(320, 200);
    let automap = AutomapRenderer::default();
    automap.draw_node(&map, 0, &mut surface);
    assert_eq!(surface.count(|c| matches!(c, DrawCall::Rect { filled: false, .. })), 2);
    assert_eq!(surface.count(|c| matches!(c, DrawCall::Line { .. })), 1);

    let mut surface = RecordingSurface::new(320, 200);
    automap.draw_node(&map, 5, &mut surface);
    assert!(surface.calls.is_empty());
}
