use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "wallprint", version)]
struct Cli {
    /// Processing config JSON (defaults apply when omitted; `WALLPRINT_*` env vars override).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rotate and trim a local wall photo.
    Trim(TrimArgs),
    /// Fit a local image into a transparent square PNG.
    Thumb(ThumbArgs),
    /// Draw primitives over a local base picture and write a JPEG.
    Problem(ProblemArgs),
    /// Dispatch record events against a filesystem blob store and record store.
    Handle(HandleArgs),
}

#[derive(Args, Debug, Clone, Copy, Default)]
struct TrimFractions {
    #[arg(long, default_value_t = 0.0)]
    trim_left: f64,
    #[arg(long, default_value_t = 0.0)]
    trim_right: f64,
    #[arg(long, default_value_t = 0.0)]
    trim_top: f64,
    #[arg(long, default_value_t = 0.0)]
    trim_bottom: f64,
}

impl TrimFractions {
    fn spec(self) -> wallprint::TrimSpec {
        wallprint::TrimSpec::new(self.trim_left, self.trim_right, self.trim_top, self.trim_bottom)
    }
}

#[derive(Parser, Debug)]
struct TrimArgs {
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; `.jpg`/`.jpeg` writes JPEG, anything else PNG.
    #[arg(long)]
    out: PathBuf,

    /// User rotation in degrees (0, 90, 180 or 270), added to the EXIF orientation.
    #[arg(long, default_value_t = 0)]
    rotation: i64,

    /// Ignore the EXIF orientation tag.
    #[arg(long)]
    no_exif: bool,

    #[command(flatten)]
    trim: TrimFractions,
}

#[derive(Parser, Debug)]
struct ThumbArgs {
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ProblemArgs {
    /// Base picture (already trimmed).
    #[arg(long)]
    base: PathBuf,

    /// JSON array of primitive documents.
    #[arg(long)]
    primitives: PathBuf,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    /// Label font; overrides `label_font_path` from the config. Without either, an installed
    /// system font is used.
    #[arg(long)]
    font: Option<PathBuf>,

    #[command(flatten)]
    trim: TrimFractions,
}

#[derive(Parser, Debug)]
struct HandleArgs {
    /// Store root: blobs live under `<root>/blobs`, records under `<root>/records`.
    #[arg(long)]
    root: PathBuf,

    /// Event JSON: a single event object or an array of events.
    #[arg(long)]
    event: PathBuf,

    /// Handle a batch of events on a rayon pool.
    #[arg(long)]
    parallel: bool,

    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = wallprint::ProcessingConfig::load(cli.config.as_deref())?;
    match cli.cmd {
        Command::Trim(args) => cmd_trim(&cfg, args),
        Command::Thumb(args) => cmd_thumb(&cfg, args),
        Command::Problem(args) => cmd_problem(&cfg, args),
        Command::Handle(args) => cmd_handle(cfg, args),
    }
}

fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read '{}'", path.display()))
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_trim(cfg: &wallprint::ProcessingConfig, args: TrimArgs) -> anyhow::Result<()> {
    let bytes = read_file(&args.in_path)?;
    let user = wallprint::RotationAngle::try_from(args.rotation)?;
    let exif = if args.no_exif {
        None
    } else {
        wallprint::exif_orientation(&bytes)
    };
    let angle = wallprint::resolve_angle(exif, user);

    let source = wallprint::decode_image(&bytes)?;
    let plan = wallprint::plan_crop(
        angle,
        &args.trim.spec(),
        source.width,
        source.height,
        cfg.trimmed_height,
        cfg.trim_scale,
    )?;
    let trimmed = wallprint::compose_trimmed(&source, &plan)?;

    let format = wallprint::OutputFormat::matching(
        image::ImageFormat::from_path(&args.out).ok(),
        cfg.jpeg_quality,
    );
    write_file(&args.out, &wallprint::encode_image(&trimmed, format)?)
}

fn cmd_thumb(cfg: &wallprint::ProcessingConfig, args: ThumbArgs) -> anyhow::Result<()> {
    let source = wallprint::decode_image(&read_file(&args.in_path)?)?;
    let thumb = wallprint::make_thumbnail(&source, cfg.thumb_size)?;
    write_file(
        &args.out,
        &wallprint::encode_image(&thumb, wallprint::OutputFormat::Png)?,
    )
}

fn cmd_problem(cfg: &wallprint::ProcessingConfig, args: ProblemArgs) -> anyhow::Result<()> {
    let base = wallprint::decode_image(&read_file(&args.base)?)?;
    let docs: Vec<serde_json::Value> = serde_json::from_slice(&read_file(&args.primitives)?)
        .with_context(|| format!("parse primitives '{}'", args.primitives.display()))?;
    let primitives = docs
        .iter()
        .map(wallprint::Primitive::from_json)
        .collect::<Result<Vec<_>, _>>()?;

    let mut cfg = cfg.clone();
    if let Some(font) = args.font {
        cfg.label_font_path = Some(font);
    }
    let mut shaper = cfg
        .read_label_font()?
        .map(|font| font.shaper())
        .transpose()?;
    let composite = wallprint::render_problem(
        &base,
        &args.trim.spec(),
        &primitives,
        shaper.as_mut(),
        cfg.text_height,
    )?;
    let jpeg = wallprint::OutputFormat::Jpeg {
        quality: cfg.jpeg_quality,
    };
    write_file(&args.out, &wallprint::encode_image(&composite, jpeg)?)
}

fn cmd_handle(cfg: wallprint::ProcessingConfig, args: HandleArgs) -> anyhow::Result<()> {
    let raw: serde_json::Value = serde_json::from_slice(&read_file(&args.event)?)
        .with_context(|| format!("parse events '{}'", args.event.display()))?;
    let events: Vec<wallprint::RecordEvent> = match raw {
        serde_json::Value::Array(_) => serde_json::from_value(raw)?,
        other => vec![serde_json::from_value(other)?],
    };

    let ctx = wallprint::PipelineContext::new(
        Arc::new(wallprint::FsBlobStore::new(args.root.join("blobs"))),
        Arc::new(wallprint::FsRecordStore::new(args.root.join("records"))),
        Arc::new(wallprint::ImageExifReader),
        cfg,
    )?;
    let dispatcher = wallprint::Dispatcher::new(ctx);
    let opts = wallprint::DispatchOpts {
        parallel: args.parallel,
        threads: args.threads,
    };

    let mut failed = 0usize;
    for (event, result) in events.iter().zip(dispatcher.handle_all(&events, &opts)?) {
        match result {
            Ok(outcome) => println!("{}", serde_json::to_string(&outcome)?),
            Err(e) => {
                failed += 1;
                tracing::error!(
                    collection = event.collection(),
                    id = event.id(),
                    error = %e,
                    "event failed"
                );
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} events failed", events.len());
    }
    Ok(())
}
