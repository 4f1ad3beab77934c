use svg::node::element::Path;
use svg::Document;

use crate::geometry::ParsedPath;
use crate::types::{ElementKind, PathElement, Rect};

///Absolute path data for the elements. Coordinates are written at full
///precision so the text parses back to the same elements
pub fn to_d(elements: &[PathElement]) -> String {
    let mut d = String::new();

    for elem in elements {
	if !d.is_empty() {
	    d.push(' ');
	}

	let letter = match elem.kind {
	    ElementKind::MoveTo => 'M',
	    ElementKind::LineTo => 'L',
	    ElementKind::QuadTo => 'Q',
	    ElementKind::CurveTo => 'C',
	    ElementKind::Close => 'Z',
	};
	d.push(letter);
	if elem.kind == ElementKind::Close {
	    continue;
	}

	let coords: Vec<String> = elem.points.iter()
	    .map(|p| format!("{},{}", p.x, p.y))
	    .collect();
	d.push_str(&coords.join(" "));
    }

    d
}

///A standalone document holding the path as a stroked outline, its
///viewBox fitted to the bounds
pub fn to_document(parsed: &ParsedPath) -> Document {
    let bounds = parsed.bounds().unwrap_or(Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 });

    let path = Path::new()
	.set("fill", "none")
	.set("stroke", "black")
	.set("d", to_d(parsed.elements()));

    Document::new()
	.set("viewBox", format!("{} {} {} {}", bounds.x, bounds.y, bounds.width, bounds.height))
	.add(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use crate::types::Point;

    #[test]
    fn exported_data_parses_back() {
	let (_, elements) = parse("M0,0 l10,0 q5,5 10,0 C30,0 30,10 20,10 z").unwrap();
	let (_, reparsed) = parse(&to_d(&elements)).unwrap();

	assert_eq!(reparsed, elements);
    }

    #[test]
    fn export_keeps_full_precision() {
	let d = "M16777217,0.3 L0.1,123456.789 A10,10 0 0,1 20,0 q1.5e-3,2 3,4 z l-1e-7,2";
	let (_, elements) = parse(d).unwrap();
	let (_, reparsed) = parse(&to_d(&elements)).unwrap();

	assert_eq!(reparsed, elements);
	assert_eq!(reparsed[0].end_point(), Point::new(16777217.0, 0.3));
	assert_eq!(reparsed[1].end_point(), Point::new(0.1, 123456.789));
    }

    #[test]
    fn written_commands() {
	let (_, elements) = parse("m1,2 h3 Q0,0 -1.5,2 Z").unwrap();
	assert_eq!(to_d(&elements), "M1,2 L4,2 Q0,0 -1.5,2 Z");
    }

    #[test]
    fn document_fits_bounds() {
	let parsed = ParsedPath::parse("M0,0 L20,10").unwrap();
	let doc = to_document(&parsed).to_string();

	assert!(doc.contains("viewBox=\"0 0 20 10\""));
	assert!(doc.contains("stroke=\"black\""));
    }
}
