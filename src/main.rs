use getopts::Options;
use log::*;
use reflectrace::envmap::LatLong;
use reflectrace::film::{self, Film};
use reflectrace::renderer::{RenderConfig, Renderer};
use reflectrace::scene::{SceneLimits, MAX_BOUNCES};
use reflectrace::*;
use std::error::Error;
use std::sync::Arc;

fn usage(program: &str, opts: &Options) -> String {
    let brief = format!(
        "Usage: {} [options]\nPresets: {}",
        program,
        example_scenes::PRESETS.join(", ")
    );
    opts.usage(&brief)
}

fn parse_or<T: std::str::FromStr>(
    matches: &getopts::Matches,
    name: &str,
    default: T,
) -> Result<T, Box<dyn Error>>
where
    T::Err: Error + 'static,
{
    match matches.opt_str(name) {
        Some(s) => s
            .parse()
            .map_err(|e| format!("invalid value '{}' for --{}: {}", s, name, e).into()),
        None => Ok(default),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("s", "scene", "scene preset (default: mirrors)", "NAME");
    opts.optopt("w", "width", "image width in pixels (default: 640)", "PX");
    opts.optopt("H", "height", "image height in pixels (default: 480)", "PX");
    opts.optopt(
        "b",
        "bounces",
        &format!("reflection bounce limit, 0..={} (default: 4)", MAX_BOUNCES),
        "N",
    );
    opts.optopt("j", "threads", "worker threads (default: all cores)", "N");
    opts.optopt("", "seed", "seed for the random preset (default: 1)", "N");
    opts.optopt("", "envmap", "equirectangular environment image", "PATH");
    opts.optopt("o", "output", "output PNG path (default: output.png)", "PATH");
    opts.optflag("h", "help", "print this help");
    let matches = opts.parse(&args[1..])?;

    if matches.opt_present("h") {
        print!("{}", usage(&program, &opts));
        return Ok(());
    }

    let preset = matches
        .opt_str("scene")
        .unwrap_or_else(|| "mirrors".to_owned());
    let width: u32 = parse_or(&matches, "width", 640)?;
    let height: u32 = parse_or(&matches, "height", 480)?;
    let bounces: usize = parse_or(&matches, "bounces", 4)?;
    let nthread: usize = parse_or(&matches, "threads", num_cpus::get())?;
    let seed: u64 = parse_or(&matches, "seed", 1)?;
    film::check_size(width, height)?;
    let output = matches
        .opt_str("output")
        .unwrap_or_else(|| "output.png".to_owned());

    let (camera, mut scene) = example_scenes::by_name(&preset, seed)?;
    if let Some(path) = matches.opt_str("envmap") {
        info!("loading environment map {}", path);
        scene = scene.with_envmap(LatLong::open(&path)?);
    }
    let scene = scene.with_bounce_limit(bounces);
    scene.validate(&SceneLimits::default())?;
    info!("scene '{}' ready", preset);

    let film = Renderer.render(
        Arc::new(scene),
        &camera,
        Film::new(width, height),
        RenderConfig { nthread },
    )?;
    film.write_png(&output)?;
    info!("wrote {}", output);
    Ok(())
}
