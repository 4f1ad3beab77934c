use log::trace;
use nom::{
    IResult,
    bytes::complete::take_while,
    character::complete::{char, one_of},
    combinator::{map, map_res, opt},
    number::complete::recognize_float,
    sequence::tuple,
};

use crate::arc;
use crate::error::ParseError;
use crate::geometry::GeometricPath;
use crate::types::{ArcParams, PathCommand, PathElement, Point, Position};

fn is_wsp(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn wsp(input: &str) -> IResult<&str, &str> {
    take_while(is_wsp)(input)
}

fn comma_wsp(input: &str) -> IResult<&str, ()> {
    map(tuple((wsp, opt(char(',')), wsp)), |_| ())(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    map_res(recognize_float, |s: &str| s.parse::<f64>())(input)
}

fn flag(input: &str) -> IResult<&str, bool> {
    map(one_of("01"), |c| c == '1')(input)
}

fn starts_number(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '+' || c == '-'
}

struct Tokenizer<'a> {
    source: &'a str,
    rest: &'a str,
    // only whitespace may precede the first operand of a group
    group_start: bool,
}

impl<'a> Tokenizer<'a> {
    fn new(source: &'a str) -> Self {
	Tokenizer { source, rest: source, group_start: false }
    }

    fn offset(&self) -> usize {
	self.source.len() - self.rest.len()
    }

    fn peek(&self) -> Option<char> {
	self.rest.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
	let c = self.peek()?;
	self.rest = &self.rest[c.len_utf8()..];
	Some(c)
    }

    fn skip_wsp(&mut self) {
	if let Ok((rest, _)) = wsp(self.rest) {
	    self.rest = rest;
	}
    }

    fn skip_separator(&mut self) {
	if let Ok((rest, _)) = comma_wsp(self.rest) {
	    self.rest = rest;
	}
    }

    fn skip_before_operand(&mut self) {
	if self.group_start {
	    self.group_start = false;
	    self.skip_wsp();
	} else {
	    self.skip_separator();
	}
    }

    ///Errors for an operand that isn't there: the text ended or the next
    ///command began
    fn operand_error(&self, command: char, otherwise: ParseError) -> ParseError {
	match self.peek() {
	    None => ParseError::MissingOperands { command, offset: self.offset() },
	    Some(c) if c.is_ascii_alphabetic() => ParseError::MissingOperands { command, offset: self.offset() },
	    Some(_) => otherwise,
	}
    }

    fn number(&mut self, command: char) -> Result<f64, ParseError> {
	self.skip_before_operand();
	let offset = self.offset();

	match number(self.rest) {
	    Ok((rest, value)) => {
		self.rest = rest;
		Ok(value)
	    },
	    Err(_) => Err(self.operand_error(command, ParseError::InvalidNumber { offset })),
	}
    }

    fn flag(&mut self, command: char) -> Result<bool, ParseError> {
	self.skip_before_operand();
	let offset = self.offset();

	match flag(self.rest) {
	    Ok((rest, value)) => {
		self.rest = rest;
		Ok(value)
	    },
	    Err(_) => Err(self.operand_error(command, ParseError::InvalidFlag { offset })),
	}
    }

    fn point(&mut self, command: char) -> Result<Point, ParseError> {
	let x = self.number(command)?;
	let y = self.number(command)?;
	Ok(Point::new(x, y))
    }

    ///Consumes the separator before another operand group of the same
    ///command, if one follows
    fn continues_group(&mut self) -> bool {
	let saved = self.rest;
	self.skip_separator();

	match self.peek() {
	    Some(c) if starts_number(c) => true,
	    _ => {
		self.rest = saved;
		false
	    }
	}
    }

    fn operands(&mut self, letter: char) -> Result<PathCommand, ParseError> {
	let position = Position::from_letter(letter);
	self.group_start = true;

	Ok(match letter.to_ascii_uppercase() {
	    'M' => PathCommand::MoveTo(position, self.point(letter)?),
	    'L' => PathCommand::LineTo(position, self.point(letter)?),
	    'H' => PathCommand::HorizontalLineTo(position, self.number(letter)?),
	    'V' => PathCommand::VerticalLineTo(position, self.number(letter)?),
	    'C' => {
		let ctrl1 = self.point(letter)?;
		let ctrl2 = self.point(letter)?;
		let to = self.point(letter)?;
		PathCommand::CubicCurveTo(position, ctrl1, ctrl2, to)
	    },
	    'S' => {
		let ctrl2 = self.point(letter)?;
		let to = self.point(letter)?;
		PathCommand::SmoothCubicCurveTo(position, ctrl2, to)
	    },
	    'Q' => {
		let ctrl = self.point(letter)?;
		let to = self.point(letter)?;
		PathCommand::QuadraticCurveTo(position, ctrl, to)
	    },
	    'T' => PathCommand::SmoothQuadraticCurveTo(position, self.point(letter)?),
	    'A' => {
		let rx = self.number(letter)?;
		let ry = self.number(letter)?;
		let x_axis_rotation = self.number(letter)?;
		let large_arc = self.flag(letter)?;
		let sweep = self.flag(letter)?;
		let to = self.point(letter)?;
		PathCommand::EllipticalArcTo(position, ArcParams {
		    rx,
		    ry,
		    x_axis_rotation,
		    large_arc,
		    sweep,
		    to,
		})
	    },
	    _ => PathCommand::ClosePath,
	})
    }
}

/// Splits a path description into commands, one per operand group.
pub fn tokenize(description: &str) -> Result<Vec<PathCommand>, ParseError> {
    let mut tokens = Tokenizer::new(description);
    let mut commands = Vec::new();

    loop {
	tokens.skip_wsp();
	let offset = tokens.offset();

	let letter = match tokens.peek() {
	    None => break,
	    Some(c) if starts_number(c) => return Err(ParseError::ExpectedCommand { offset }),
	    Some(c) if "MLHVCSQTAZ".contains(c.to_ascii_uppercase()) => c,
	    Some(found) => return Err(ParseError::UnknownCommand { found, offset }),
	};
	tokens.bump();

	if letter.eq_ignore_ascii_case(&'z') {
	    commands.push(PathCommand::ClosePath);
	    continue;
	}

	let mut letter = letter;
	loop {
	    commands.push(tokens.operands(letter)?);

	    if !tokens.continues_group() {
		break;
	    }

	    // extra pairs after a moveto are linetos
	    letter = match letter {
		'M' => 'L',
		'm' => 'l',
		other => other,
	    };
	}
    }

    Ok(commands)
}

/// Pen state while resolving commands to absolute elements.
#[derive(Debug, Default)]
struct Pen {
    current: Point,
    subpath_start: Point,
    last_cubic_ctrl: Option<Point>,
    last_quad_ctrl: Option<Point>,
}

impl Pen {
    fn apply(&mut self, command: &PathCommand, out: &mut Vec<PathElement>) {
	let current = self.current;
	let mut cubic_ctrl = None;
	let mut quad_ctrl = None;

	match *command {
	    PathCommand::MoveTo(pos, p) => {
		let p = pos.resolve(current, p);
		self.subpath_start = p;
		self.current = p;
		out.push(PathElement::move_to(p));
	    },
	    PathCommand::LineTo(pos, p) => {
		self.current = pos.resolve(current, p);
		out.push(PathElement::line_to(self.current));
	    },
	    PathCommand::HorizontalLineTo(pos, x) => {
		let x = match pos {
		    Position::Absolute => x,
		    Position::Relative => current.x + x,
		};
		self.current = Point::new(x, current.y);
		out.push(PathElement::line_to(self.current));
	    },
	    PathCommand::VerticalLineTo(pos, y) => {
		let y = match pos {
		    Position::Absolute => y,
		    Position::Relative => current.y + y,
		};
		self.current = Point::new(current.x, y);
		out.push(PathElement::line_to(self.current));
	    },
	    PathCommand::CubicCurveTo(pos, c1, c2, p) => {
		let c2 = pos.resolve(current, c2);
		self.current = pos.resolve(current, p);
		cubic_ctrl = Some(c2);
		out.push(PathElement::curve_to(pos.resolve(current, c1), c2, self.current));
	    },
	    PathCommand::SmoothCubicCurveTo(pos, c2, p) => {
		let c1 = self.last_cubic_ctrl.map_or(current, |c| c.reflect(current));
		let c2 = pos.resolve(current, c2);
		self.current = pos.resolve(current, p);
		cubic_ctrl = Some(c2);
		out.push(PathElement::curve_to(c1, c2, self.current));
	    },
	    PathCommand::QuadraticCurveTo(pos, c, p) => {
		let c = pos.resolve(current, c);
		self.current = pos.resolve(current, p);
		quad_ctrl = Some(c);
		out.push(PathElement::quad_to(c, self.current));
	    },
	    PathCommand::SmoothQuadraticCurveTo(pos, p) => {
		let c = self.last_quad_ctrl.map_or(current, |c| c.reflect(current));
		self.current = pos.resolve(current, p);
		quad_ctrl = Some(c);
		out.push(PathElement::quad_to(c, self.current));
	    },
	    PathCommand::EllipticalArcTo(pos, params) => {
		let to = pos.resolve(current, params.to);
		arc::append_arc(current, &ArcParams { to, ..params }, out);
		self.current = to;
	    },
	    PathCommand::ClosePath => {
		self.current = self.subpath_start;
		out.push(PathElement::close(self.subpath_start));
	    },
	}

	self.last_cubic_ctrl = cubic_ctrl;
	self.last_quad_ctrl = quad_ctrl;
    }
}

/// Resolves commands to absolute elements, in order.
pub fn resolve(commands: &[PathCommand]) -> Vec<PathElement> {
    let mut pen = Pen::default();
    let mut elements = Vec::with_capacity(commands.len());

    for command in commands {
	pen.apply(command, &mut elements);
    }

    elements
}

pub fn parse_elements(description: &str) -> Result<Vec<PathElement>, ParseError> {
    let commands = tokenize(description)?;
    let elements = resolve(&commands);
    trace!("parsed {} commands into {} elements", commands.len(), elements.len());

    Ok(elements)
}

/// Parses a path description. Fails closed: a malformed description
/// yields an error and no geometry.
pub fn parse(description: &str) -> Result<(GeometricPath, Vec<PathElement>), ParseError> {
    let elements = parse_elements(description)?;
    let path = GeometricPath::from_elements(&elements);

    Ok((path, elements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementKind;

    fn pts(elem: &PathElement) -> Vec<(f64, f64)> {
	elem.points.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn numbers_may_abut() {
	let commands = tokenize("M10-5L.5.5").unwrap();
	assert_eq!(commands, vec![
	    PathCommand::MoveTo(Position::Absolute, Point::new(10.0, -5.0)),
	    PathCommand::LineTo(Position::Absolute, Point::new(0.5, 0.5)),
	]);
    }

    #[test]
    fn exponents() {
	let commands = tokenize("m1e1,2E-1").unwrap();
	assert_eq!(commands, vec![PathCommand::MoveTo(Position::Relative, Point::new(10.0, 0.2))]);
    }

    #[test]
    fn packed_arc_flags() {
	let commands = tokenize("M0 0a5 5 0 1010 0").unwrap();
	match commands[1] {
	    PathCommand::EllipticalArcTo(Position::Relative, params) => {
		assert!(params.large_arc);
		assert!(!params.sweep);
		assert_eq!(params.to, Point::new(10.0, 0.0));
	    },
	    ref other => panic!("unexpected command {:?}", other),
	}
    }

    #[test]
    fn relative_move_repeats_as_relative_line() {
	let commands = tokenize("m1 1 2 2").unwrap();
	assert_eq!(commands[1], PathCommand::LineTo(Position::Relative, Point::new(2.0, 2.0)));

	let elements = resolve(&commands);
	assert_eq!(pts(&elements[1]), vec![(3.0, 3.0)]);
    }

    #[test]
    fn horizontal_and_vertical() {
	let (_, elements) = parse("M1,1 H5 v4 h-2 V0").unwrap();
	let ends: Vec<_> = elements.iter().map(|e| (e.end_point().x, e.end_point().y)).collect();
	assert_eq!(ends, vec![(1.0, 1.0), (5.0, 1.0), (5.0, 5.0), (3.0, 5.0), (3.0, 0.0)]);
	assert!(elements[1..].iter().all(|e| e.kind == ElementKind::LineTo));
    }

    #[test]
    fn smooth_cubic_without_previous_curve_uses_current_point() {
	let (_, elements) = parse("M5,5 S10,0 20,5").unwrap();
	assert_eq!(pts(&elements[1]), vec![(5.0, 5.0), (10.0, 0.0), (20.0, 5.0)]);
    }

    #[test]
    fn smooth_quadratic_chain() {
	let (_, elements) = parse("M0,0 Q5,10 10,0 T20,0 T30,0").unwrap();
	assert_eq!(pts(&elements[2]), vec![(15.0, -10.0), (20.0, 0.0)]);
	assert_eq!(pts(&elements[3]), vec![(25.0, 10.0), (30.0, 0.0)]);
    }

    #[test]
    fn smooth_quadratic_after_cubic_is_not_reflected() {
	let (_, elements) = parse("M0,0 C0,5 5,5 10,0 T20,0").unwrap();
	assert_eq!(pts(&elements[2]), vec![(10.0, 0.0), (20.0, 0.0)]);
    }

    #[test]
    fn relative_cubic_resolves_against_start() {
	let (_, elements) = parse("M10,10 c1,1 2,2 3,3").unwrap();
	assert_eq!(pts(&elements[1]), vec![(11.0, 11.0), (12.0, 12.0), (13.0, 13.0)]);
    }

    #[test]
    fn description_without_moveto_starts_at_origin() {
	let (path, elements) = parse("l5,5").unwrap();
	assert_eq!(pts(&elements[0]), vec![(5.0, 5.0)]);
	assert_eq!(path.ops().len(), 2);
    }

    #[test]
    fn error_offsets() {
	assert_eq!(tokenize("M0,0 X1"), Err(ParseError::UnknownCommand { found: 'X', offset: 5 }));
	assert_eq!(tokenize("M0,0 L1,#"), Err(ParseError::InvalidNumber { offset: 8 }));
	assert_eq!(tokenize("M0,0 L1 L2,2"), Err(ParseError::MissingOperands { command: 'L', offset: 8 }));
	assert_eq!(tokenize("10,10"), Err(ParseError::ExpectedCommand { offset: 0 }));
	assert_eq!(tokenize("M0,0 Z 5"), Err(ParseError::ExpectedCommand { offset: 7 }));
	assert_eq!(tokenize("M0,0 A1,1 0 2 0 5,5"), Err(ParseError::InvalidFlag { offset: 12 }));
    }

    #[test]
    fn dangling_comma_is_rejected() {
	assert_eq!(tokenize("M0,0 L1,1, Z"), Err(ParseError::UnknownCommand { found: ',', offset: 9 }));
    }

    #[test]
    fn comma_before_first_operand_is_rejected() {
	assert_eq!(tokenize("M,0,0"), Err(ParseError::InvalidNumber { offset: 1 }));
	assert_eq!(tokenize("M0,0 L ,1,1"), Err(ParseError::InvalidNumber { offset: 7 }));
	assert_eq!(tokenize("M0,0 L1,1,,2,2"), Err(ParseError::UnknownCommand { found: ',', offset: 9 }));
    }

    #[test]
    fn whitespace_only() {
	assert!(tokenize(" \n\t ").unwrap().is_empty());
    }
}
