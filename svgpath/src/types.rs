use std::ops::{Add, Sub};

use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
	Point { x, y }
    }

    pub fn scale(self, k: f64) -> Point {
	Point::new(self.x * k, self.y * k)
    }

    ///Mirrors `self` through `center`
    pub fn reflect(self, center: Point) -> Point {
	Point::new(2.0 * center.x - self.x, 2.0 * center.y - self.y)
    }

    pub fn lerp(self, other: Point, t: f64) -> Point {
	Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
	Point::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
	Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
	Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Absolute,
    Relative,
}

impl Position {
    pub fn from_letter(c: char) -> Position {
	if c.is_ascii_uppercase() {
	    Position::Absolute
	} else {
	    Position::Relative
	}
    }

    ///Resolves `p` against the current point
    pub fn resolve(self, current: Point, p: Point) -> Point {
	match self {
	    Position::Absolute => p,
	    Position::Relative => current + p,
	}
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub rx: f64,
    pub ry: f64,
    /// degrees
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: Point,
}

/// One operand group of the path grammar, before resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Position, Point),
    LineTo(Position, Point),
    HorizontalLineTo(Position, f64),
    VerticalLineTo(Position, f64),
    CubicCurveTo(Position, Point, Point, Point),
    SmoothCubicCurveTo(Position, Point, Point),
    QuadraticCurveTo(Position, Point, Point),
    SmoothQuadraticCurveTo(Position, Point),
    EllipticalArcTo(Position, ArcParams),
    ClosePath,
}

impl PathCommand {
    pub fn letter(&self) -> char {
	let (upper, position) = match self {
	    PathCommand::MoveTo(pos, _) => ('M', *pos),
	    PathCommand::LineTo(pos, _) => ('L', *pos),
	    PathCommand::HorizontalLineTo(pos, _) => ('H', *pos),
	    PathCommand::VerticalLineTo(pos, _) => ('V', *pos),
	    PathCommand::CubicCurveTo(pos, ..) => ('C', *pos),
	    PathCommand::SmoothCubicCurveTo(pos, ..) => ('S', *pos),
	    PathCommand::QuadraticCurveTo(pos, ..) => ('Q', *pos),
	    PathCommand::SmoothQuadraticCurveTo(pos, _) => ('T', *pos),
	    PathCommand::EllipticalArcTo(pos, _) => ('A', *pos),
	    PathCommand::ClosePath => return 'Z',
	};

	match position {
	    Position::Absolute => upper,
	    Position::Relative => upper.to_ascii_lowercase(),
	}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    MoveTo,
    LineTo,
    QuadTo,
    CurveTo,
    Close,
}

pub type Points = SmallVec<[Point; 3]>;

/// A resolved path element. Points are absolute:
/// `[end]` for moves and lines, `[ctrl, end]` for quads,
/// `[ctrl1, ctrl2, end]` for cubics and `[subpath start]` for close.
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    pub kind: ElementKind,
    pub points: Points,
}

impl PathElement {
    pub fn new(kind: ElementKind, points: &[Point]) -> Self {
	PathElement {
	    kind,
	    points: points.iter().copied().collect(),
	}
    }

    pub fn move_to(p: Point) -> Self { PathElement::new(ElementKind::MoveTo, &[p]) }

    pub fn line_to(p: Point) -> Self { PathElement::new(ElementKind::LineTo, &[p]) }

    pub fn quad_to(ctrl: Point, to: Point) -> Self {
	PathElement::new(ElementKind::QuadTo, &[ctrl, to])
    }

    pub fn curve_to(ctrl1: Point, ctrl2: Point, to: Point) -> Self {
	PathElement::new(ElementKind::CurveTo, &[ctrl1, ctrl2, to])
    }

    pub fn close(start: Point) -> Self { PathElement::new(ElementKind::Close, &[start]) }

    pub fn end_point(&self) -> Point {
	self.points.last().copied().unwrap_or(Point::ORIGIN)
    }

    pub fn scaled(&self, k: f64) -> PathElement {
	PathElement {
	    kind: self.kind,
	    points: self.points.iter().map(|p| p.scale(k)).collect(),
	}
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Rect> {
	let mut iter = points.into_iter();
	let first = iter.next()?;
	let (mut min, mut max) = (first, first);

	for p in iter {
	    min = Point::new(min.x.min(p.x), min.y.min(p.y));
	    max = Point::new(max.x.max(p.x), max.y.max(p.y));
	}

	Some(Rect {
	    x: min.x,
	    y: min.y,
	    width: max.x - min.x,
	    height: max.y - min.y,
	})
    }
}
