//! Quill CLI
//!
//! Render, morph and inspect Quill shapes from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quill_animation::{AnimObject, ObjectFlags};
use quill_core::{DrawContext, OrthoCamera, Size, Vec2, Vec3};
use quill_svg::{
    render_interpolation, Blit, MorphEndpoint, PixmapSurface, RenderContext, Shape,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod demo;

use config::{QuillConfig, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "quill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Progressive vector shape renderer", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./quill.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a demo shape into the cache and save it as PNG
    Render {
        /// Shape name, or "gallery" for every shape as one group
        shape: String,

        /// Animation time in [0, 1]
        #[arg(short, long, default_value = "1.0")]
        t: f32,

        /// Play the reveal backwards
        #[arg(short, long)]
        reverse: bool,

        /// Outline cells and curves
        #[arg(long)]
        debug: bool,

        /// Output PNG
        #[arg(short, long, default_value = "quill.png")]
        output: PathBuf,
    },

    /// Render one frame of a morph between two demo shapes
    Morph {
        from: String,
        to: String,

        /// Interpolation time in [0, 1]
        #[arg(short, long, default_value = "0.5")]
        t: f32,

        /// Canvas edge in pixels
        #[arg(long, default_value = "256")]
        size: u32,

        /// Output PNG
        #[arg(short, long, default_value = "morph.png")]
        output: PathBuf,
    },

    /// Print metrics of a demo shape
    Info {
        /// Shape name
        shape: String,
    },

    /// Write a quill.toml with the default settings
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Render {
            shape,
            t,
            reverse,
            debug,
            output,
        } => cmd_render(cli.config.as_deref(), &shape, t, reverse, debug, &output),

        Commands::Morph {
            from,
            to,
            t,
            size,
            output,
        } => cmd_morph(cli.config.as_deref(), &from, &to, t, size, &output),

        Commands::Info { shape } => cmd_info(&shape),

        Commands::Init => cmd_init(),
    }
}

fn load_config(path: Option<&Path>) -> Result<QuillConfig> {
    match path {
        Some(path) => QuillConfig::load(path),
        None => QuillConfig::load_from_dir(&std::env::current_dir()?),
    }
}

fn styled_object(config: &QuillConfig) -> AnimObject {
    AnimObject::new()
        .with_fill(config.style.fill_color())
        .with_stroke(config.style.stroke_color(), config.style.stroke_width)
}

fn cmd_render(
    config_path: Option<&Path>,
    name: &str,
    t: f32,
    reverse: bool,
    debug: bool,
    output: &Path,
) -> Result<()> {
    let config = load_config(config_path)?;
    if !(0.0..=1.0).contains(&t) {
        anyhow::bail!("t must be in [0, 1], got {}", t);
    }

    let parent = styled_object(&config).with_flags(ObjectFlags {
        draw_debug_boxes: debug,
        draw_curve_debug_boxes: debug,
        ..ObjectFlags::default()
    });
    let scale = Vec2::splat(config.style.scale);

    let surface = PixmapSurface::new(1, 1)?;
    let mut ctx = RenderContext::init(config.render, surface)?;

    let blit = if name == "gallery" {
        demo::gallery()?.render_animated(&mut ctx, t, &parent, scale, reverse)?
    } else {
        demo::shape(name)?.render_animated(&mut ctx, t, &parent, Vec2::ZERO, scale, reverse)?
    };
    print_blit(name, &blit);

    let surface = ctx.shutdown();
    surface
        .save_png(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Cache written to {}", output.display());
    Ok(())
}

fn cmd_morph(
    config_path: Option<&Path>,
    from: &str,
    to: &str,
    t: f32,
    size: u32,
    output: &Path,
) -> Result<()> {
    let config = load_config(config_path)?;
    let src_shape = demo::shape(from)?;
    let dst_shape = demo::shape(to)?;

    let camera = OrthoCamera::new(Vec2::new(size as f32, size as f32));
    let centered = camera.centered_position();
    let margin = (size as f32 - 100.0).max(0.0) * 0.5;
    let position = Vec3::new(centered.x + margin, centered.y + margin, 0.0);
    let src = styled_object(&config).with_position(position);
    let dst = src.clone().with_fill(config.style.stroke_color());

    let mut surface = PixmapSurface::new(size, size)?;
    surface.begin_frame(Size::new(size as f32, size as f32), 1.0);
    render_interpolation(
        &mut surface,
        &camera,
        &config.render,
        MorphEndpoint::new(&src, &src_shape),
        MorphEndpoint::new(&dst, &dst_shape),
        t,
    );
    surface.end_frame();

    surface
        .save_png(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Morph {} -> {} at t={} written to {}", from, to, t, output.display());
    Ok(())
}

fn cmd_info(name: &str) -> Result<()> {
    let shape: Shape = demo::shape(name)?;
    let bbox = shape.bbox();
    let range = shape.point_range();

    println!("Shape: {}", name);
    println!("  Contours:  {}", shape.num_contours());
    println!("  Curves:    {}", shape.num_curves());
    println!("  Perimeter: {:.2}", shape.approximate_perimeter());
    println!(
        "  BBox:      ({:.2}, {:.2}) - ({:.2}, {:.2})",
        bbox.min.x, bbox.min.y, bbox.max.x, bbox.max.y
    );
    println!(
        "  Points:    ({:.2}, {:.2}) - ({:.2}, {:.2})",
        range.min.x, range.min.y, range.max.x, range.max.y
    );
    for (i, contour) in shape.contours().iter().enumerate() {
        println!(
            "  [{}] {} curves{}",
            i,
            contour.len(),
            if contour.is_hole { " (hole)" } else { "" }
        );
    }

    Ok(())
}

fn cmd_init() -> Result<()> {
    let cwd = std::env::current_dir()?;
    let path = cwd.join(CONFIG_FILE);
    if path.exists() {
        anyhow::bail!("This directory already contains a {}", CONFIG_FILE);
    }

    let content = QuillConfig::default().to_toml()?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(())
}

fn print_blit(name: &str, blit: &Blit) {
    let region = blit.region;
    println!("Rendered {}", name);
    println!(
        "  Cell: {}x{} at ({}, {})",
        region.width, region.height, region.x, region.y
    );
    println!(
        "  UV:   [{:.4}, {:.4}] - [{:.4}, {:.4}]",
        blit.uv[0], blit.uv[1], blit.uv[2], blit.uv[3]
    );
}
