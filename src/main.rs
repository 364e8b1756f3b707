//! # lumen 💡
//!
//! The CLI front-end: pick a built-in scene, render it in parallel, write a
//! PPM/PAM/TGA file, and optionally preview the result right in the terminal
//! with half-block cells.

use clap::Parser;
use crossterm::style::{self, Stylize};
use log::info;
use lumen::camera::Camera;
use lumen::color::Space;
use lumen::image::Image;
use lumen::precision::Angle;
use lumen::presets::ScenePreset;
use lumen::scene::{RenderConfig, Scene, DEFAULT_TRACE_DEPTH};
use lumen::solvers::SOLVER_STATS;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// lumen — a CPU ray tracer
#[derive(Parser, Debug)]
#[command(
    name = "lumen",
    version,
    about = "A physically inspired CPU ray tracer written in Rust 🦀",
    long_about = "Renders built-in scenes with recursive Phong/Fresnel shading, octree \
                  acceleration, and row-parallel dispatch, then writes the image as \
                  PPM, PAM, or TGA (picked by the output extension).",
    after_help = "EXAMPLES:\n  \
                  lumen --scene showcase --output showcase.ppm\n  \
                  lumen --scene csg --width 1280 --height 720 --output csg.tga\n  \
                  lumen --scene stress --samples 9 --depth 2 --output stress.ppm --preview"
)]
struct Cli {
    /// Scene preset to render
    #[arg(short, long, value_enum, default_value_t = ScenePreset::Showcase)]
    scene: ScenePreset,

    /// Image width in pixels
    #[arg(short = 'W', long, default_value_t = 640)]
    width: usize,

    /// Image height in pixels
    #[arg(short = 'H', long, default_value_t = 480)]
    height: usize,

    /// Horizontal field of view in degrees (must be below 180)
    #[arg(long, default_value_t = 70.0)]
    fov: f64,

    /// Subsamples per pixel (averaged through the 25-point stencil)
    #[arg(long, default_value_t = 9)]
    samples: usize,

    /// Recursion budget shared by reflection and refraction
    #[arg(long, default_value_t = DEFAULT_TRACE_DEPTH)]
    depth: u32,

    /// Output file; the extension picks the format (.ppm, .pgm, .pam, .tga)
    #[arg(short, long, default_value = "render.ppm")]
    output: String,

    /// Worker thread count (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Skip gamma correction and write linear radiance
    #[arg(long)]
    no_gamma: bool,

    /// Show the finished render in the terminal with half-block cells
    #[arg(long)]
    preview: bool,
}

fn print_header(cli: &Cli) {
    eprintln!();
    eprintln!("  ╔═══════════════════════════════════════════════╗");
    eprintln!("  ║  lumen 💡  CPU Ray Tracer                     ║");
    eprintln!("  ╚═══════════════════════════════════════════════╝");
    eprintln!();
    eprintln!("  Scene:      {}", cli.scene.name());
    eprintln!("  Resolution: {}×{}", cli.width, cli.height);
    eprintln!("  Samples:    {} per pixel", cli.samples);
    eprintln!("  Depth:      {} bounces", cli.depth);
    eprintln!("  Output:     {}", cli.output);
    eprintln!();
}

fn write_image(image: &Image, output: &str) -> Option<io::Result<()>> {
    let extension = Path::new(output)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match extension.as_str() {
        "ppm" => Some(image.write_ppm(output)),
        "pgm" => Some(image.write_pgm(output)),
        "pam" => Some(image.write_pam(output, false)),
        "tga" => Some(image.write_tga(output)),
        _ => None,
    }
}

/// Half-block preview: two image rows per terminal line, 24-bit color.
fn preview_halfblock(image: &Image) {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let rows = image.height() / 2;
    for row in 0..rows {
        for x in 0..image.width() {
            let (tr, tg, tb) = image.at(row * 2, x).to_rgb8();
            let (br, bg, bb) = image.at(row * 2 + 1, x).to_rgb8();
            let _ = write!(
                out,
                "{}",
                "▀".with(style::Color::Rgb {
                    r: tr,
                    g: tg,
                    b: tb
                })
                .on(style::Color::Rgb {
                    r: br,
                    g: bg,
                    b: bb
                })
            );
        }
        let _ = writeln!(out);
    }
    let _ = out.flush();
}

fn render(cli: &Cli, scene: &Scene, camera: &Camera) -> Image {
    let total_rows = camera.height().max(1);
    let completed = AtomicUsize::new(0);
    let notify = |_row: usize| {
        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
        let pct = done * 100 / total_rows;
        eprint!("\r  Rendering: {pct:3}% ({done}/{total_rows} rows)");
    };
    let config = RenderConfig {
        samples: cli.samples,
        output_space: if cli.no_gamma {
            Space::Linear
        } else {
            Space::Gamma
        },
        row_notifier: Some(&notify),
        ..RenderConfig::default()
    };
    let image = scene.render(camera, &config);
    eprintln!();
    image
}

fn run(cli: &Cli) -> Result<(), ExitCode> {
    let (mut scene, camera) = cli
        .scene
        .build(cli.height, cli.width, Angle::Degrees(cli.fov))
        .map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(1)
        })?;
    scene.max_depth = cli.depth;

    let t0 = Instant::now();
    let image = render(cli, &scene, &camera);
    let elapsed = t0.elapsed().as_secs_f64();

    let (quadratics, cubics, quartics) = SOLVER_STATS.snapshot();
    let pixels = (cli.width * cli.height) as f64;
    eprintln!(
        "  Time: {elapsed:.2}s | {:.2}M samples | {:.2} Mpix/s",
        pixels * cli.samples as f64 / 1e6,
        pixels / elapsed / 1e6,
    );
    info!("solver invocations: {quadratics} quadratic, {cubics} cubic, {quartics} quartic");

    match write_image(&image, &cli.output) {
        None => {
            eprintln!(
                "error: unrecognized output extension in {:?} (use .ppm, .pgm, .pam, or .tga)",
                cli.output
            );
            return Err(ExitCode::from(1));
        }
        Some(Err(e)) => {
            eprintln!("error: could not write {:?}: {e}", cli.output);
            return Err(ExitCode::from(2));
        }
        Some(Ok(())) => {}
    }

    if cli.preview {
        preview_halfblock(&image);
    }
    eprintln!("  Wrote {}", cli.output);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    // debugging aid: die loudly at the failure site instead of unwinding
    if std::env::var("ABORT").as_deref() == Ok("1") {
        std::panic::set_hook(Box::new(|panic_info| {
            eprintln!("{panic_info}");
            std::process::abort();
        }));
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::from(1);
        }
        Err(e) => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    if let Some(threads) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            eprintln!("error: could not size the thread pool: {e}");
            return ExitCode::from(3);
        }
    }

    print_header(&cli);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}
