use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use pbr::ProgressBar;
use structopt::StructOpt;
use tracing::{debug, error, info};

use planet_scatter::logging::{init_logging, DEFAULT_FILTER};
use planet_scatter::texture::ImageTexture;
use planet_scatter::tonemap::{write_exr, write_png};
use planet_scatter::{RenderError, SceneConfig};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "planet_scatter",
    about = "Renders a planet and its atmosphere with single scattering"
)]
struct Opt {
    /// Equirectangular albedo texture of the planet surface.
    #[structopt(long, parse(from_os_str), default_value = "earth.png")]
    texture: PathBuf,

    /// Rendered image, the format follows the extension.
    #[structopt(short, long, parse(from_os_str), default_value = "out.png")]
    output: PathBuf,

    /// JSON scene description, missing fields use the reference Earth scene.
    #[structopt(long, parse(from_os_str))]
    scene: Option<PathBuf>,

    /// Also write the linear, unclamped radiance as OpenEXR.
    #[structopt(long, parse(from_os_str))]
    exr: Option<PathBuf>,

    /// Worker threads, defaults to the number of logical CPUs.
    #[structopt(short, long)]
    threads: Option<usize>,

    /// Hide the progress bar.
    #[structopt(short, long)]
    quiet: bool,
}

fn load_config(path: Option<&Path>) -> Result<SceneConfig, RenderError> {
    let config = match path {
        Some(path) => {
            info!("loading scene {}", path.display());
            SceneConfig::load(path)?
        }
        None => SceneConfig::default(),
    };
    debug!(?config, "scene configuration");
    Ok(config)
}

fn run(opt: &Opt) -> Result<(), RenderError> {
    let config = load_config(opt.scene.as_deref())?;

    let texture =
        ImageTexture::open(&opt.texture).map_err(|source| RenderError::InputUnavailable {
            path: opt.texture.clone(),
            source,
        })?;
    let (tw, th) = texture.dimensions();
    info!("loaded texture {} ({}x{})", opt.texture.display(), tw, th);

    let threads = opt.threads.unwrap_or_else(num_cpus::get);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;

    let scene = config.build_scene();
    let progress = (!opt.quiet).then(|| {
        let mut bar = ProgressBar::new(config.height as u64);
        bar.set_max_refresh_rate(Some(Duration::from_millis(100)));
        bar.message("rows ");
        Mutex::new(bar)
    });
    let film = scene.render(&texture, progress.as_ref());
    if let Some(bar) = progress {
        if let Ok(mut bar) = bar.into_inner() {
            bar.finish_println("");
        }
    }

    write_png(&film, &opt.output)?;
    if let Some(exr_path) = &opt.exr {
        write_exr(&film, exr_path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging(DEFAULT_FILTER);
    let opt = Opt::from_args();

    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
