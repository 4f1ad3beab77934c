use std::f64::consts::{FRAC_PI_2, PI};

use crate::types::{ArcParams, PathElement, Point};

/// Center parameterization of an elliptical arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    /// radians
    pub phi: f64,
    pub theta1: f64,
    pub d_theta: f64,
}

impl CenterArc {
    ///Endpoint to center conversion, radii scaled up when they can't
    ///span the chord. None when the arc degenerates to a line or to nothing
    pub fn from_endpoints(from: Point, params: &ArcParams) -> Option<CenterArc> {
	let to = params.to;
	let mut rx = params.rx.abs();
	let mut ry = params.ry.abs();

	if from == to || rx == 0.0 || ry == 0.0 {
	    return None;
	}

	let phi = (params.x_axis_rotation % 360.0).to_radians();
	let (sin_phi, cos_phi) = phi.sin_cos();

	// *** ROTATE INTO ELLIPSE SPACE ***
	let b11 = (from.x - to.x) / 2.0;
	let b21 = (from.y - to.y) / 2.0;
	let x1_prime = cos_phi * b11 + sin_phi * b21;
	let y1_prime = -sin_phi * b11 + cos_phi * b21;

	let lambda = x1_prime.powi(2) / rx.powi(2) + y1_prime.powi(2) / ry.powi(2);
	if lambda > 1.0 {
	    rx *= lambda.sqrt();
	    ry *= lambda.sqrt();
	}

	let num = rx.powi(2) * ry.powi(2) - rx.powi(2) * y1_prime.powi(2) - ry.powi(2) * x1_prime.powi(2);
	let den = rx.powi(2) * y1_prime.powi(2) + ry.powi(2) * x1_prime.powi(2);
	let mut r_scalar = (num / den).max(0.0).sqrt();

	if params.large_arc == params.sweep {
	    r_scalar = -r_scalar;
	}

	let xc_prime = r_scalar * rx * y1_prime / ry;
	let yc_prime = -r_scalar * ry * x1_prime / rx;

	let center = Point::new(
	    cos_phi * xc_prime - sin_phi * yc_prime + (from.x + to.x) / 2.0,
	    sin_phi * xc_prime + cos_phi * yc_prime + (from.y + to.y) / 2.0,
	);

	let u = Point::new((x1_prime - xc_prime) / rx, (y1_prime - yc_prime) / ry);
	let v = Point::new((-x1_prime - xc_prime) / rx, (-y1_prime - yc_prime) / ry);

	let theta1 = angle_between(Point::new(1.0, 0.0), u);
	let mut d_theta = angle_between(u, v);

	if !params.sweep && d_theta > 0.0 {
	    d_theta -= 2.0 * PI;
	} else if params.sweep && d_theta < 0.0 {
	    d_theta += 2.0 * PI;
	}

	Some(CenterArc { center, rx, ry, phi, theta1, d_theta })
    }

    pub fn point_at(&self, theta: f64) -> Point {
	let (sin_phi, cos_phi) = self.phi.sin_cos();
	let (sin_t, cos_t) = theta.sin_cos();

	Point::new(
	    self.center.x + self.rx * cos_t * cos_phi - self.ry * sin_t * sin_phi,
	    self.center.y + self.rx * cos_t * sin_phi + self.ry * sin_t * cos_phi,
	)
    }

    fn derivative_at(&self, theta: f64) -> Point {
	let (sin_phi, cos_phi) = self.phi.sin_cos();
	let (sin_t, cos_t) = theta.sin_cos();

	Point::new(
	    -self.rx * sin_t * cos_phi - self.ry * cos_t * sin_phi,
	    -self.rx * sin_t * sin_phi + self.ry * cos_t * cos_phi,
	)
    }

    ///Cubic segments of at most a quarter turn each, as
    ///`[ctrl1, ctrl2, end]`
    pub fn to_cubics(&self, end: Point) -> Vec<[Point; 3]> {
	let segments = ((self.d_theta.abs() / FRAC_PI_2) - 1e-9).ceil().max(1.0) as usize;
	let delta = self.d_theta / segments as f64;
	let k = 4.0 / 3.0 * (delta / 4.0).tan();

	(0..segments).map(|i| {
	    let t1 = self.theta1 + delta * i as f64;
	    let t2 = t1 + delta;

	    let p1 = self.point_at(t1);
	    let p2 = if i + 1 == segments { end } else { self.point_at(t2) };
	    let d1 = self.derivative_at(t1);
	    let d2 = self.derivative_at(t2);

	    [
		Point::new(p1.x + k * d1.x, p1.y + k * d1.y),
		Point::new(p2.x - k * d2.x, p2.y - k * d2.y),
		p2,
	    ]
	}).collect()
    }
}

fn angle_between(u: Point, v: Point) -> f64 {
    (u.x * v.y - u.y * v.x).atan2(u.x * v.x + u.y * v.y)
}

/// Appends the elements approximating an arc from `from` to `params.to`
/// (already absolute).
pub fn append_arc(from: Point, params: &ArcParams, out: &mut Vec<PathElement>) {
    if from == params.to {
	return;
    }

    match CenterArc::from_endpoints(from, params) {
	Some(arc) => {
	    for [c1, c2, p] in arc.to_cubics(params.to) {
		out.push(PathElement::curve_to(c1, c2, p));
	    }
	},
	None => out.push(PathElement::line_to(params.to)),
    }
}
