use clap::{App, Arg, ArgMatches};
use image::ColorType;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const COLORS: &str = "colors";
const ZOOM: &str = "zoom";
const SEED: &str = "seed";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .about("Tiled, multi-threaded Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output image file (format chosen by extension)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(COLORS)
                .required(false)
                .long(COLORS)
                .short("c")
                .takes_value(true)
                .default_value("256")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        65536,
                        "Could not parse color count",
                        "Color count must be between 1 and 65536",
                    )
                })
                .help("Number of palette colors, which is also the iteration bound"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1.0")
                .validator(|s| match f32::from_str(&s) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Could not parse zoom factor".to_string()),
                })
                .help("Magnification factor"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .takes_value(true)
                .default_value("0")
                .validator(|s| match u64::from_str(&s) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Could not parse palette seed".to_string()),
                })
                .help("Palette seed; 0 picks a fresh palette every run"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("0")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 0 and {}", max_threads),
                    )
                })
                .help("Number of worker threads; 0 means one per logical CPU"),
        )
        .get_matches()
}

fn main() {
    env_logger::init();
    let matches = args();

    let (width, height) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let colors =
        usize::from_str(matches.value_of(COLORS).unwrap()).expect("Could not parse color count");
    let zoom = f32::from_str(matches.value_of(ZOOM).unwrap()).expect("Could not parse zoom factor");
    let seed = u64::from_str(matches.value_of(SEED).unwrap()).expect("Could not parse palette seed");
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Could not parse thread count");
    let threads = if threads == 0 { num_cpus::get() } else { threads };

    let renderer = match mandeltile::Renderer::new(width, height, colors, zoom, seed) {
        Ok(renderer) => renderer,
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    };

    let image = renderer.render(threads);
    let raw = image.into_raw();
    if let Err(e) = image::save_buffer(
        matches.value_of(OUTPUT).unwrap(),
        &raw,
        width as u32,
        height as u32,
        ColorType::RGBA(8),
    ) {
        eprintln!("Could not write image: {}", e);
        std::process::exit(1);
    }
}
