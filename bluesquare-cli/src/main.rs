use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bluesquare", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a profile and render its QR code as a PNG.
    Profile(ProfileArgs),
    /// Render an arbitrary payload as a QR code PNG (no network access).
    Code(CodeArgs),
    /// Print the page, image and profile URLs for a profile.
    Links(LinksArgs),
}

#[derive(clap::Args, Debug)]
struct ServiceArgs {
    /// JSON service config; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the local development base URL.
    #[arg(long, default_value_t = false)]
    local: bool,
}

impl ServiceArgs {
    fn load(&self) -> anyhow::Result<bluesquare::ServiceConfig> {
        let mut cfg = match &self.config {
            Some(path) => bluesquare::ServiceConfig::from_path(path)?,
            None => bluesquare::ServiceConfig::default(),
        };
        if self.local {
            cfg.deployment = bluesquare::Deployment::Local;
        }
        Ok(cfg)
    }
}

#[derive(Parser, Debug)]
struct ProfileArgs {
    /// Handle (`alice.bsky.social`) or DID.
    handle: String,

    /// Icon: cloud, cloudButterfly, butterfly or user. Other values render no icon.
    #[arg(long)]
    icon: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    service: ServiceArgs,
}

#[derive(Parser, Debug)]
struct CodeArgs {
    /// Text to encode.
    #[arg(long)]
    payload: String,

    /// Local PNG or JPEG to place at the center.
    #[arg(long)]
    icon_file: Option<PathBuf>,

    /// Output edge length in pixels.
    #[arg(long, default_value_t = bluesquare::DEFAULT_CANVAS_SIZE)]
    size: u32,

    /// Light border around the symbol, in modules.
    #[arg(long, default_value_t = 4)]
    quiet_zone: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct LinksArgs {
    /// Handle or DID.
    handle: String,

    /// Icon selector to embed in the image URL.
    #[arg(long)]
    icon: Option<String>,

    #[command(flatten)]
    service: ServiceArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Profile(args) => cmd_profile(args),
        Command::Code(args) => cmd_code(args),
        Command::Links(args) => cmd_links(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_profile(args: ProfileArgs) -> anyhow::Result<()> {
    let cfg = args.service.load()?;
    let selector = bluesquare::IconSelector::parse(args.icon.as_deref());
    let service = bluesquare::Bluesquare::from_config(cfg);

    let image = match service.render_profile(&args.handle, selector) {
        Ok(image) => image,
        Err(err @ bluesquare::BluesquareError::NotFound(_)) => {
            anyhow::bail!("{}: Not Found ({err})", err.status_code());
        }
        Err(err) => return Err(err.into()),
    };

    write_output(&args.out, &image.bytes)
}

fn cmd_code(args: CodeArgs) -> anyhow::Result<()> {
    use bluesquare::MatrixSource as _;

    let icon = match &args.icon_file {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read icon '{}'", path.display()))?;
            Some(bluesquare::decode_image(&bytes)?)
        }
        None => None,
    };

    bluesquare::ServiceConfig {
        canvas_size: args.size,
        quiet_zone: args.quiet_zone,
        ..bluesquare::ServiceConfig::default()
    }
    .validate()?;
    let matrix = bluesquare::QrMatrixSource::new(args.quiet_zone).encode(&args.payload)?;
    let canvas = bluesquare::render_code(&matrix, args.size, icon.as_ref())?;
    let bytes = bluesquare::encode_png(&canvas)?;
    write_output(&args.out, &bytes)
}

fn cmd_links(args: LinksArgs) -> anyhow::Result<()> {
    let cfg = args.service.load()?;
    let links = bluesquare::ShareLinks::new(&cfg, &args.handle, args.icon.as_deref())?;
    println!("page:    {}", links.page_url);
    println!("image:   {}", links.image_url);
    println!("profile: {}", links.profile_url);
    Ok(())
}

fn write_output(out: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, bytes).with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
