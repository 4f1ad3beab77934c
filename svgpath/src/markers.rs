use std::f64::consts::PI;

use crate::types::{ElementKind, PathElement, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    Mid,
    End,
}

/// Where a vertex marker goes and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPosition {
    pub kind: MarkerKind,
    pub origin: Point,
    /// degrees, clockwise from the positive x axis in y-down space
    pub angle: f64,
}

fn direction(from: Point, to: Point) -> Option<Point> {
    let d = to - from;
    if d.x == 0.0 && d.y == 0.0 { None } else { Some(d) }
}

fn first_direction(from: Point, candidates: &[Point]) -> Option<Point> {
    candidates.iter().find_map(|&p| direction(from, p))
}

///Tangent leaving `start` along `elem`
fn outgoing(start: Point, elem: &PathElement) -> Option<Point> {
    match elem.kind {
	ElementKind::MoveTo => None,
	_ => first_direction(start, &elem.points),
    }
}

///Tangent arriving at the end of `elem`
fn incoming(start: Point, elem: &PathElement) -> Option<Point> {
    let end = elem.end_point();

    match elem.kind {
	ElementKind::MoveTo => None,
	_ => {
	    let mut before: Vec<Point> = elem.points.iter().rev().skip(1).copied().collect();
	    before.push(start);
	    before.iter().find_map(|&p| direction(p, end))
	},
    }
}

fn angle_of(d: Point) -> f64 {
    d.y.atan2(d.x)
}

fn bisect(a_in: f64, a_out: f64) -> f64 {
    let mut diff = a_out - a_in;
    if diff > PI {
	diff -= 2.0 * PI;
    } else if diff < -PI {
	diff += 2.0 * PI;
    }

    a_in + diff / 2.0
}

/// Marker positions for every vertex of the path: the end point of each
/// element. A single vertex gets both a start and an end marker.
pub fn positions(elements: &[PathElement]) -> Vec<MarkerPosition> {
    let mut starts = Vec::with_capacity(elements.len());
    let mut current = Point::ORIGIN;
    for elem in elements {
	starts.push(current);
	current = elem.end_point();
    }

    let last = elements.len().saturating_sub(1);
    let mut result: Vec<MarkerPosition> = elements.iter().enumerate().map(|(i, elem)| {
	let arriving = incoming(starts[i], elem);
	let leaving = elements.get(i + 1).and_then(|next| outgoing(elem.end_point(), next));

	let angle = match (arriving, leaving) {
	    (Some(a), Some(b)) => bisect(angle_of(a), angle_of(b)),
	    (Some(d), None) | (None, Some(d)) => angle_of(d),
	    (None, None) => 0.0,
	};

	let kind = match i {
	    0 => MarkerKind::Start,
	    i if i == last => MarkerKind::End,
	    _ => MarkerKind::Mid,
	};

	MarkerPosition {
	    kind,
	    origin: elem.end_point(),
	    angle: angle.to_degrees(),
	}
    }).collect();

    if let [only] = result.as_slice() {
	let end = MarkerPosition { kind: MarkerKind::End, ..*only };
	result.push(end);
    }

    result
}
