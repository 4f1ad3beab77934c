use svgpath::{parse, ElementKind, ParseError, PathElement, PathOp, Point};

fn points(elem: &PathElement) -> Vec<Point> {
    elem.points.to_vec()
}

#[test]
fn parse_is_deterministic() {
    let d = "M10 10 h 20 v 5 c 1 2 3 4 5 6 s 7 8 9 10 q 1 1 2 0 t 4 0 a 5 7 30 1 0 10 10 z m 1 1 l 2 2";
    let (path_a, elems_a) = parse(d).unwrap();
    let (path_b, elems_b) = parse(d).unwrap();

    assert_eq!(elems_a, elems_b);
    assert_eq!(path_a, path_b);
}

#[test]
fn relative_lines_resolve_to_absolute_points() {
    let (_, elements) = parse("M0,0 l10,0 l0,10").unwrap();
    let ends: Vec<Point> = elements.iter().map(|e| e.end_point()).collect();

    assert_eq!(ends, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]);
}

#[test]
fn smooth_curve_reflects_previous_control_point() {
    let (_, elements) = parse("M0,0 C10,0 10,10 20,10 S30,20 30,30").unwrap();

    assert_eq!(elements[2].kind, ElementKind::CurveTo);
    assert_eq!(points(&elements[2]), vec![
	Point::new(30.0, 10.0),
	Point::new(30.0, 20.0),
	Point::new(30.0, 30.0),
    ]);
}

#[test]
fn implicit_repetition() {
    let (_, elements) = parse("M0,0 L10,0 10,10").unwrap();

    assert_eq!(elements.len(), 3);
    assert_eq!(elements[1], PathElement::line_to(Point::new(10.0, 0.0)));
    assert_eq!(elements[2], PathElement::line_to(Point::new(10.0, 10.0)));
}

#[test]
fn close_and_continue() {
    let (path, elements) = parse("M0,0 L10,0 Z L5,5").unwrap();

    assert_eq!(elements[2], PathElement::close(Point::new(0.0, 0.0)));
    assert_eq!(elements[2].end_point(), Point::new(0.0, 0.0));
    assert_eq!(elements[3], PathElement::line_to(Point::new(5.0, 5.0)));
    assert_eq!(&path.ops()[3..], &[PathOp::MoveTo(Point::new(0.0, 0.0)), PathOp::LineTo(Point::new(5.0, 5.0))]);
}

#[test]
fn relative_command_after_close_starts_from_subpath_start() {
    let (path, elements) = parse("M10,10 L20,10 z l5,5").unwrap();

    assert_eq!(elements[2], PathElement::close(Point::new(10.0, 10.0)));
    assert_eq!(elements[3], PathElement::line_to(Point::new(15.0, 15.0)));
    assert_eq!(&path.ops()[3..], &[PathOp::MoveTo(Point::new(10.0, 10.0)), PathOp::LineTo(Point::new(15.0, 15.0))]);
}

#[test]
fn empty_input() {
    let (path, elements) = parse("").unwrap();

    assert!(elements.is_empty());
    assert!(path.is_empty());
}

#[test]
fn missing_operands_fail_closed() {
    assert_eq!(parse("M0,0 Q"), Err(ParseError::MissingOperands { command: 'Q', offset: 6 }));
    assert_eq!(parse("M0,0 Q 1,1"), Err(ParseError::MissingOperands { command: 'Q', offset: 10 }));
}

#[test]
fn malformed_numbers_fail() {
    let err = parse("M0,0 L1e,2").unwrap_err();
    assert_eq!(err, ParseError::InvalidNumber { offset: 6 });
    assert_eq!(err.offset(), 6);
    assert_eq!(err.to_string(), "malformed number at offset 6");
}

#[test]
fn arcs_become_cubics_ending_at_the_target() {
    let (_, elements) = parse("M0,0 a10,10 0 0,1 20,0").unwrap();

    assert_eq!(elements.len(), 3);
    assert!(elements[1..].iter().all(|e| e.kind == ElementKind::CurveTo));
    assert_eq!(elements[2].end_point(), Point::new(20.0, 0.0));
}
