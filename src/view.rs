use std::sync::Arc;

use log::warn;
use svgpath::markers::{self, MarkerPosition};
use svgpath::{GeometricPath, ParsedPath, PathElement};

/// Holds one path description and the geometry it compiles to at the
/// view's scale.
#[derive(Debug)]
pub struct PathView {
    scale: f64,
    d: String,
    parsed: Option<Arc<ParsedPath>>,
}

impl PathView {
    pub fn new(scale: f64) -> Self {
	PathView {
	    scale,
	    d: String::new(),
	    parsed: None,
	}
    }

    pub fn scale(&self) -> f64 { self.scale }

    pub fn d(&self) -> &str { &self.d }

    pub fn set_d(&mut self, d: &str) {
	self.d = String::from(d);
	self.resolve();
    }

    pub fn set_scale(&mut self, scale: f64) {
	if scale != self.scale {
	    self.scale = scale;
	    self.resolve();
	}
    }

    fn resolve(&mut self) {
	self.parsed = match svgpath::get_or_parse(&self.d, self.scale) {
	    Ok(parsed) => Some(parsed),
	    Err(err) => {
		warn!("not drawing path {:?}: {}", self.d, err);
		None
	    }
	};
    }

    ///None when the description didn't parse
    pub fn parsed(&self) -> Option<&Arc<ParsedPath>> {
	self.parsed.as_ref()
    }

    pub fn path(&self) -> Option<&GeometricPath> {
	self.parsed.as_ref().map(|p| p.path())
    }

    pub fn elements(&self) -> &[PathElement] {
	match &self.parsed {
	    Some(parsed) => parsed.elements(),
	    None => &[],
	}
    }

    pub fn markers(&self) -> Vec<MarkerPosition> {
	markers::positions(self.elements())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgpath::Point;

    #[test]
    fn views_share_cached_geometry() {
	let mut a = PathView::new(1.0);
	let mut b = PathView::new(1.0);
	a.set_d("M0,0 L7,7 Z");
	b.set_d("M0,0 L7,7 Z");

	assert!(Arc::ptr_eq(a.parsed().unwrap(), b.parsed().unwrap()));
    }

    #[test]
    fn invalid_description_draws_nothing() {
	let mut view = PathView::new(1.0);
	view.set_d("M0,0 L5");

	assert!(view.path().is_none());
	assert!(view.elements().is_empty());
	assert!(view.markers().is_empty());
    }

    #[test]
    fn rescaling_recompiles() {
	let mut view = PathView::new(1.0);
	view.set_d("M0,0 L3,4");
	view.set_scale(2.0);

	assert_eq!(view.scale(), 2.0);
	assert_eq!(view.elements()[1].end_point(), Point::new(6.0, 8.0));
    }
}
