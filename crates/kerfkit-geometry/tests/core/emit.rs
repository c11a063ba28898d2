use kerfkit_geometry::model::rect;
use kerfkit_geometry::{
    draw, draw_geometry, compose, Geometry, LinearRing, PathCommand, PathCommands, Point, Polygon,
    SvgPathData, Winding,
};

// Rings traced by the recorder, in emission order.
fn traced_rings(commands: &PathCommands) -> Vec<LinearRing> {
    let mut rings = Vec::new();
    let mut current = Vec::new();
    for command in &commands.commands {
        match command {
            PathCommand::MoveTo(p) => current = vec![*p],
            PathCommand::LineTo(p) => current.push(*p),
            PathCommand::ClosePath => rings.push(LinearRing::new(std::mem::take(&mut current))),
        }
    }
    rings
}

#[test]
fn test_orientation_enforced() {
    let exterior = rect((0.0, 10.0), (0.0, 10.0)).exterior.oriented(Winding::Clockwise);
    let hole = rect((3.0, 6.0), (3.0, 6.0)).exterior.oriented(Winding::CounterClockwise);
    let polygon = Polygon::with_holes(exterior.clone(), vec![hole.clone()]);

    let rings = traced_rings(&draw(&Geometry::Polygon(polygon.clone())));
    assert_eq!(rings.len(), 2);
    assert_eq!(rings[0].winding(), Winding::CounterClockwise);
    assert_eq!(rings[1].winding(), Winding::Clockwise);

    // emission works on copies
    assert_eq!(polygon.exterior.winding(), Winding::Clockwise);
    assert_eq!(polygon.holes[0].winding(), Winding::CounterClockwise);
}

#[test]
fn test_one_operation_per_vertex() {
    let square = rect((0.0, 1.0), (0.0, 1.0));
    let cmds = draw(&Geometry::from(square));
    // move, three lines, close
    assert_eq!(cmds.len(), 5);
    assert_eq!(cmds.subpath_count(), 1);
}

#[test]
fn test_mixed_collection() {
    let g = compose!(
        Point::new(5.0, 5.0),
        rect((0.0, 1.0), (0.0, 1.0)),
        kerfkit_geometry::Polyline::new(vec![Point::new(0.0, 0.0), Point::new(2.0, 2.0)]),
    );
    let cmds = draw(&g);
    assert_eq!(cmds.subpath_count(), 2);
    let closes = cmds
        .commands
        .iter()
        .filter(|c| matches!(c, PathCommand::ClosePath))
        .count();
    assert_eq!(closes, 1);
}

#[test]
fn test_replay_into_svg() {
    let g = Geometry::from(rect((0.0, 2.0), (0.0, 1.0)));
    let cmds = draw(&g);

    let mut direct = SvgPathData::with_precision(1);
    draw_geometry(&g, &mut direct);
    let mut replayed = SvgPathData::with_precision(1);
    cmds.replay(&mut replayed);

    assert_eq!(direct.as_str(), replayed.as_str());
    assert_eq!(direct.as_str(), "M 0.0 0.0 L 2.0 0.0 L 2.0 1.0 L 0.0 1.0 Z");
}
