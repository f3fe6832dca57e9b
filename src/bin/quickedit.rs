use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use quickedit::{AspectRatio, ExportSink as _, ParamUpdate, RenderParameters, Rgba8};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quickedit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Frame one image and export it as JPEG.
    Render(RenderArgs),
    /// Print the default parameter set as JSON.
    Defaults,
    /// List the aspect-ratio, sharpen and border-color presets.
    Presets,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image (PNG, JPEG, WebP, ...).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JPEG path.
    #[arg(long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Save as `edited-<millis>.jpg` into this directory instead.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Parameter JSON file; flags below override its values.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Target aspect ratio: `original`, `W/H`, `W:H` or a number.
    #[arg(long)]
    ratio: Option<AspectRatio>,

    /// Border thickness in percent of the shorter padded side.
    #[arg(long)]
    border: Option<f64>,

    /// Border color as hex (`#RRGGBB`).
    #[arg(long)]
    border_color: Option<Rgba8>,

    /// JPEG quality (1-100).
    #[arg(long)]
    quality: Option<u8>,

    /// Sharpen strength (0-1).
    #[arg(long)]
    sharpen: Option<f64>,

    /// Brightness percent (100 = unchanged).
    #[arg(long)]
    brightness: Option<f64>,

    /// Contrast percent (100 = unchanged).
    #[arg(long)]
    contrast: Option<f64>,

    /// Saturation percent (100 = unchanged).
    #[arg(long)]
    saturate: Option<f64>,

    /// Grayscale percent (0 = unchanged).
    #[arg(long)]
    grayscale: Option<f64>,

    /// Sepia percent (0 = unchanged).
    #[arg(long)]
    sepia: Option<f64>,

    /// Downscale the export to this width when the canvas is wider.
    #[arg(long)]
    output_width: Option<u32>,
}

impl RenderArgs {
    fn updates(&self) -> Vec<ParamUpdate> {
        let mut out = Vec::new();
        if let Some(v) = self.ratio {
            out.push(ParamUpdate::AspectRatio(v));
        }
        if let Some(v) = self.border {
            out.push(ParamUpdate::BorderSize(v));
        }
        if let Some(v) = self.border_color {
            out.push(ParamUpdate::BorderColor(v));
        }
        if let Some(v) = self.quality {
            out.push(ParamUpdate::ExportQuality(v));
        }
        if let Some(v) = self.sharpen {
            out.push(ParamUpdate::Sharpen(v));
        }
        if let Some(v) = self.brightness {
            out.push(ParamUpdate::Brightness(v));
        }
        if let Some(v) = self.contrast {
            out.push(ParamUpdate::Contrast(v));
        }
        if let Some(v) = self.saturate {
            out.push(ParamUpdate::Saturate(v));
        }
        if let Some(v) = self.grayscale {
            out.push(ParamUpdate::Grayscale(v));
        }
        if let Some(v) = self.sepia {
            out.push(ParamUpdate::Sepia(v));
        }
        if let Some(v) = self.output_width {
            out.push(ParamUpdate::OutputWidth(Some(v)));
        }
        out
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Defaults => cmd_defaults(),
        Command::Presets => cmd_presets(),
    }
}

fn read_params_json(path: &Path) -> anyhow::Result<RenderParameters> {
    let f = File::open(path).with_context(|| format!("open parameters '{}'", path.display()))?;
    let r = BufReader::new(f);
    let params: RenderParameters =
        serde_json::from_reader(r).with_context(|| "parse parameters JSON")?;
    Ok(params)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut params = match &args.params {
        Some(path) => read_params_json(path)?,
        None => RenderParameters::default(),
    };
    for update in args.updates() {
        params.apply(&update)?;
    }
    params.validate()?;

    let source = quickedit::load_source_file(&args.in_path)?;
    let canvas = quickedit::render(&source, &params)?;
    let exported = quickedit::export_jpeg(&canvas, &params)?;

    match (&args.out, &args.out_dir) {
        (Some(out), _) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, &exported.bytes)
                .with_context(|| format!("write jpeg '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        (None, dir) => {
            let dir = dir.clone().unwrap_or_else(|| PathBuf::from("."));
            let mut sink = quickedit::DirectorySink::new(dir);
            sink.deliver(&exported)?;
            for path in sink.saved() {
                eprintln!("wrote {}", path.display());
            }
        }
    }
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&RenderParameters::default())?;
    println!("{json}");
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    println!("aspect ratios:");
    for (name, ratio) in quickedit::ASPECT_RATIO_PRESETS {
        println!("  {name:<10} {ratio}");
    }
    println!("sharpen:");
    for (name, strength) in quickedit::SHARPEN_PRESETS {
        println!("  {name:<10} {strength}");
    }
    println!("border colors:");
    for (name, color) in quickedit::BORDER_COLOR_PRESETS {
        println!("  {name:<10} {color}");
    }
    Ok(())
}
