use crate::error::ParseError;
use crate::parse;
use crate::types::{ElementKind, PathElement, Point, Rect};

/// Receives path operations in traversal order.
pub trait PathSink {
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quad_to(&mut self, ctrl: Point, to: Point);
    fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point);
    fn close(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CurveTo(Point, Point, Point),
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometricPath {
    ops: Vec<PathOp>,
}

impl GeometricPath {
    pub fn new() -> Self { GeometricPath::default() }

    ///Replays elements, opening a subpath at the current point when
    ///drawing starts without a move or continues after a close
    pub fn from_elements(elements: &[PathElement]) -> Self {
	let mut path = GeometricPath { ops: Vec::with_capacity(elements.len() + 1) };
	let mut current = Point::ORIGIN;
	let mut open = false;

	for elem in elements {
	    match (elem.kind, elem.points.as_slice()) {
		(ElementKind::MoveTo, &[p]) => {
		    path.move_to(p);
		    open = true;
		},
		(ElementKind::Close, &[_]) => {
		    if open {
			path.close();
		    }
		    open = false;
		},
		(kind, points) => {
		    if !open {
			path.move_to(current);
			open = true;
		    }

		    match (kind, points) {
			(ElementKind::LineTo, &[p]) => path.line_to(p),
			(ElementKind::QuadTo, &[c, p]) => path.quad_to(c, p),
			(ElementKind::CurveTo, &[c1, c2, p]) => path.curve_to(c1, c2, p),
			_ => continue,
		    }
		},
	    }

	    current = elem.end_point();
	}

	path
    }

    pub fn ops(&self) -> &[PathOp] {
	&self.ops
    }

    pub fn is_empty(&self) -> bool {
	self.ops.is_empty()
    }

    pub fn replay<S: PathSink + ?Sized>(&self, sink: &mut S) {
	for op in &self.ops {
	    match *op {
		PathOp::MoveTo(p) => sink.move_to(p),
		PathOp::LineTo(p) => sink.line_to(p),
		PathOp::QuadTo(c, p) => sink.quad_to(c, p),
		PathOp::CurveTo(c1, c2, p) => sink.curve_to(c1, c2, p),
		PathOp::Close => sink.close(),
	    }
	}
    }

    ///Bounding box of every point, control points included
    pub fn bounds(&self) -> Option<Rect> {
	Rect::from_points(self.ops.iter().flat_map(|op| {
	    let points: Vec<Point> = match *op {
		PathOp::MoveTo(p) | PathOp::LineTo(p) => vec![p],
		PathOp::QuadTo(c, p) => vec![c, p],
		PathOp::CurveTo(c1, c2, p) => vec![c1, c2, p],
		PathOp::Close => Vec::new(),
	    };
	    points
	}))
    }
}

impl PathSink for GeometricPath {
    fn move_to(&mut self, p: Point) { self.ops.push(PathOp::MoveTo(p)) }

    fn line_to(&mut self, p: Point) { self.ops.push(PathOp::LineTo(p)) }

    fn quad_to(&mut self, ctrl: Point, to: Point) { self.ops.push(PathOp::QuadTo(ctrl, to)) }

    fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
	self.ops.push(PathOp::CurveTo(ctrl1, ctrl2, to))
    }

    fn close(&mut self) { self.ops.push(PathOp::Close) }
}

#[cfg(feature = "cairo")]
impl PathSink for cairo::Context {
    fn move_to(&mut self, p: Point) {
	cairo::Context::move_to(self, p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
	cairo::Context::line_to(self, p.x, p.y);
    }

    // cairo has no quadratic primitive: elevate to cubic
    fn quad_to(&mut self, ctrl: Point, to: Point) {
	let (x0, y0) = self.get_current_point();
	let from = Point::new(x0, y0);
	let c1 = from.lerp(ctrl, 2.0 / 3.0);
	let c2 = to.lerp(ctrl, 2.0 / 3.0);

	cairo::Context::curve_to(self, c1.x, c1.y, c2.x, c2.y, to.x, to.y);
    }

    fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
	cairo::Context::curve_to(self, ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y);
    }

    fn close(&mut self) {
	self.close_path();
    }
}

/// A path description compiled once: the element list and the geometry
/// derived from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPath {
    path: GeometricPath,
    elements: Vec<PathElement>,
}

impl ParsedPath {
    pub fn from_elements(elements: Vec<PathElement>) -> Self {
	ParsedPath {
	    path: GeometricPath::from_elements(&elements),
	    elements,
	}
    }

    pub fn parse(description: &str) -> Result<Self, ParseError> {
	parse::parse_elements(description).map(ParsedPath::from_elements)
    }

    pub fn path(&self) -> &GeometricPath {
	&self.path
    }

    pub fn elements(&self) -> &[PathElement] {
	&self.elements
    }

    pub fn is_empty(&self) -> bool {
	self.elements.is_empty()
    }

    pub fn bounds(&self) -> Option<Rect> {
	self.path.bounds()
    }

    ///Every coordinate multiplied by `k`, in a new path
    pub fn scaled(&self, k: f64) -> ParsedPath {
	ParsedPath::from_elements(self.elements.iter().map(|e| e.scaled(k)).collect())
    }
}
