use std::error::Error;
use std::fs::File;
use std::path::Path;

use svgpath::ParsedPath;

const MARGIN: f64 = 1.0;

pub fn write_png(parsed: &ParsedPath, out: &Path) -> Result<(), Box<dyn Error>> {
    let (width, height) = match parsed.bounds() {
	Some(b) => ((b.x + b.width + MARGIN).ceil(), (b.y + b.height + MARGIN).ceil()),
	None => (1.0, 1.0),
    };

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width.max(1.0) as i32, height.max(1.0) as i32)
	.map_err(|status| format!("could not create surface: {:?}", status))?;
    let mut cr = cairo::Context::new(&surface);

    // ***** SET BACKGROUND *******
    cr.set_source_rgb(1.0, 1.0, 1.0);
    cr.paint();

    parsed.path().replay(&mut cr);

    cr.set_source_rgb(0.0, 0.0, 0.0);
    cr.set_line_width(1.0);
    cr.stroke();

    let mut file = File::create(out)?;
    surface.write_to_png(&mut file)
	.map_err(|err| format!("could not write {}: {:?}", out.display(), err))?;

    Ok(())
}
