use kerfkit_core::{FontError, ToolkitConfig};
use kerfkit_geometry::text::MISSING_GLYPH_SPACING;
use kerfkit_geometry::{
    draw, FontLibrary, GeometryKind, HAlign, Point, StrokeFont, TextOptions, VAlign,
};

// space, '!', '"' in the compact entry form
fn font() -> StrokeFont {
    StrokeFont::from_entries(
        "futural",
        &[
            "-8 8",
            "-5 5 M 0 -12 L 0 2 M 0 7 L -1 8 L 0 9 L 1 8 L 0 7",
            "-4 4 M -2 -12 L -2 -5 M 2 -12 L 2 -5",
        ],
    )
    .unwrap()
}

#[test]
fn test_glyph_miss_recovery() {
    let path = font().render("!\u{7f}", &TextOptions::default());
    assert_eq!(path.skipped, vec!['\u{7f}']);
    assert_eq!(path.strokes.len(), 2);
    assert_eq!(path.advance, 10.0 + 2.0 * MISSING_GLYPH_SPACING);
}

#[test]
fn test_centered_run_is_symmetric() {
    let options = TextOptions::default().align(HAlign::Center, VAlign::Center);
    let path = font().render("\"\"", &options);
    let g = path.into_geometry();
    let (min_x, _, max_x, _) = g.bounds().unwrap();
    assert!((min_x + max_x).abs() < 1e-9);
}

#[test]
fn test_scale_applies_after_alignment() {
    let options = TextOptions::default()
        .align(HAlign::Left, VAlign::Bottom)
        .scale(2.0)
        .offset(1.0, 1.0);
    let path = font().render("!", &options);
    // (0 + 5, -12 - 10.5) scaled by 2 then moved by (1, 1)
    assert_eq!(path.strokes[0].points[0], Point::new(11.0, -44.0));
}

#[test]
fn test_strokes_become_multipolyline() {
    let g = font().render("!\"", &TextOptions::default()).into_geometry();
    assert_eq!(g.kind(), GeometryKind::MultiPolyline);
    let cmds = draw(&g);
    assert_eq!(cmds.subpath_count(), 4);
}

#[test]
fn test_jhf_wrapped_record() {
    let jhf = "12345  1JZ\n  714  9MWRFRT RRYQZR[S\nZRY\n";
    let font = StrokeFont::from_jhf("futural", jhf).unwrap();
    let bang = font.glyph('!').unwrap();
    assert_eq!(bang.strokes.len(), 2);
    assert_eq!(bang.strokes[1].len(), 5);
}

#[test]
fn test_jhf_truncated_record() {
    let err = StrokeFont::from_jhf("broken", "12345  9MWRFRT").unwrap_err();
    assert!(matches!(err, FontError::MalformedGlyph { index: 0, .. }));
}

#[test]
fn test_library_uses_configured_font() {
    let mut library = FontLibrary::new();
    library.insert(font());

    let config = ToolkitConfig::default();
    let path = library.render_default(&config, "!").unwrap();
    assert_eq!(path.strokes.len(), 2);

    let mut other = config.clone();
    other.text.default_font = "gothic".to_string();
    assert!(matches!(
        library.render_default(&other, "!"),
        Err(FontError::UnknownFont { .. })
    ));
}
