use kerfkit_core::ToolkitConfig;
use kerfkit_geometry::model::rect;
use kerfkit_geometry::{
    bezier, compose, draw, round, FontLibrary, Geometry, GeometryKind, Point, Polygon,
    RoundingOptions, StrokeFont, SvgPathData, TextOptions, Winding,
};

fn signature_font() -> StrokeFont {
    StrokeFont::from_entries(
        "futural",
        &["-8 8", "-5 5 M 0 -12 L 0 2 M 0 7 L -1 8 L 0 9 L 1 8 L 0 7"],
    )
    .unwrap()
}

#[test]
fn test_sheet_of_pieces() {
    let config = ToolkitConfig::default();
    let options = RoundingOptions::from_config(&config);

    // two pieces with a curved connector between them
    let left = round(&rect((0.0, 20.0), (0.0, 20.0)).into(), 2.0, &options).unwrap();
    let right = round(&rect((30.0, 50.0), (0.0, 20.0)).into(), 2.0, &options).unwrap();
    let connector = bezier(
        &[
            Point::new(20.0, 10.0),
            Point::new(25.0, 20.0),
            Point::new(25.0, 0.0),
            Point::new(30.0, 10.0),
        ],
        config.tolerance,
    )
    .unwrap();

    let mut library = FontLibrary::new();
    library.insert(signature_font());
    let signature = library
        .render(
            &config.text.default_font,
            "! !",
            &TextOptions::from_config(&config).scale(0.2).offset(25.0, 30.0),
        )
        .unwrap()
        .into_geometry();

    let sheet = compose!(left, right, connector, signature);
    match &sheet {
        Geometry::Collection(groups) => {
            assert_eq!(groups[0].kind(), GeometryKind::MultiPolygon);
            assert_eq!(groups[1].kind(), GeometryKind::MultiPolyline);
        }
        other => panic!("unexpected {:?}", other.kind()),
    }

    let cmds = draw(&sheet);
    // two outlines, one connector, four strokes
    assert_eq!(cmds.subpath_count(), 7);

    let mut svg = SvgPathData::new();
    cmds.replay(&mut svg);
    assert!(svg.as_str().starts_with("M "));
    assert_eq!(svg.as_str().matches('Z').count(), 2);
}

#[test]
fn test_piece_with_hole_draws_correctly() {
    let outer = rect((0.0, 10.0), (0.0, 10.0)).exterior.oriented(Winding::Clockwise);
    let hole = rect((4.0, 6.0), (4.0, 6.0)).exterior;
    let piece = Polygon::with_holes(outer, vec![hole]);

    let cmds = draw(&piece.into());
    assert_eq!(cmds.subpath_count(), 2);
}

#[test]
fn test_overlapping_pieces_draw_one_outline() {
    let pieces = Geometry::MultiPolygon(vec![
        rect((0.0, 10.0), (0.0, 10.0)),
        rect((5.0, 15.0), (0.0, 10.0)),
    ]);
    let rounded = round(&pieces, 1.0, &RoundingOptions::default()).unwrap();

    let cmds = draw(&rounded);
    assert_eq!(cmds.subpath_count(), 1);
}
