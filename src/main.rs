mod view;
#[cfg(feature = "cairo")]
mod paint;

use std::env;
use std::error::Error;
use std::path::PathBuf;

use log::info;

use view::PathView;

const USAGE: &str = "usage: path-view <d> [--scale K] [--out FILE]";

#[derive(Debug)]
struct Args {
    d: String,
    scale: f64,
    out: Option<PathBuf>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Args, String> {
    let mut d = None;
    let mut scale = 1.0;
    let mut out = None;

    while let Some(arg) = args.next() {
	match arg.as_str() {
	    "--scale" => {
		let val = args.next().ok_or(USAGE)?;
		scale = val.parse().map_err(|err| format!("invalid scale {:?}: {}", val, err))?;
	    },
	    "--out" => out = Some(PathBuf::from(args.next().ok_or(USAGE)?)),
	    _ if d.is_none() => d = Some(arg),
	    _ => return Err(String::from(USAGE)),
	}
    }

    Ok(Args {
	d: d.ok_or(USAGE)?,
	scale,
	out,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = parse_args(env::args().skip(1))?;

    let mut view = PathView::new(args.scale);
    view.set_d(&args.d);

    let parsed = match view.parsed() {
	Some(parsed) => parsed.clone(),
	None => return Err(format!("nothing to draw for {:?}", view.d()).into()),
    };

    info!("{} elements, {} markers at scale {}", view.elements().len(), view.markers().len(), view.scale());
    info!("cache: {:?}", svgpath::cache::global().stats());

    let document = svgpath::export::to_document(&parsed);

    match args.out {
	#[cfg(feature = "cairo")]
	Some(out) if out.extension().map_or(false, |ext| ext == "png") => paint::write_png(&parsed, &out)?,
	Some(out) => svg::save(&out, &document)?,
	None => println!("{}", document),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
	parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults() {
	let a = args(&["M0,0 L1,1"]).unwrap();
	assert_eq!(a.d, "M0,0 L1,1");
	assert_eq!(a.scale, 1.0);
	assert!(a.out.is_none());
    }

    #[test]
    fn options() {
	let a = args(&["--scale", "2.5", "M0,0", "--out", "x.svg"]).unwrap();
	assert_eq!(a.scale, 2.5);
	assert_eq!(a.out, Some(PathBuf::from("x.svg")));
    }

    #[test]
    fn rejects_bad_input() {
	assert!(args(&[]).is_err());
	assert!(args(&["M0,0", "--scale"]).is_err());
	assert!(args(&["M0,0", "--scale", "big"]).is_err());
	assert!(args(&["M0,0", "M1,1"]).is_err());
    }
}
