use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quotecard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one quote card as a PNG.
    Render(RenderArgs),
    /// List the available templates.
    Templates,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Job JSON (`{"profile": .., "template": .., "params": ..}`). Replaces the flags below.
    #[arg(long, conflicts_with_all = ["name", "quote"])]
    job: Option<PathBuf>,

    /// Display name shown under the avatar.
    #[arg(long, required_unless_present = "job")]
    name: Option<String>,

    /// Optional subtitle under the name.
    #[arg(long)]
    title: Option<String>,

    /// Avatar source: http(s) URL, data URI or local path.
    #[arg(long, default_value = "")]
    image: String,

    #[arg(long, required_unless_present = "job")]
    quote: Option<String>,

    /// Template id; unknown ids render as `modern`.
    #[arg(long, default_value = "modern")]
    template: String,

    /// Quote font size in px (16..=64).
    #[arg(long, default_value_t = 32)]
    font_size: u32,

    #[arg(long, default_value = "Inter")]
    font_family: quotecard::FontFamily,

    #[arg(long, default_value = "center")]
    align: quotecard::TextAlign,

    /// Directory the PNG is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Device pixel density; overrides `QUOTECARD_RENDER_RESOLUTION`.
    #[arg(long)]
    density: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Templates => cmd_templates(),
    }
}

fn read_job_json(path: &Path) -> anyhow::Result<quotecard::CardJob> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read job '{}'", path.display()))?;
    Ok(quotecard::CardJob::from_json(&json)?)
}

fn job_from_args(args: &RenderArgs) -> anyhow::Result<quotecard::CardJob> {
    if let Some(path) = &args.job {
        return read_job_json(path);
    }
    Ok(quotecard::CardJob {
        profile: quotecard::ProfileData {
            name: args.name.clone().unwrap_or_default(),
            image: args.image.clone(),
            title: args.title.clone(),
        },
        template: args.template.clone(),
        params: quotecard::RenderParams {
            quote_text: args.quote.clone().unwrap_or_default(),
            font_size_px: args.font_size,
            font_family: args.font_family,
            text_align: args.align,
        },
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let job = job_from_args(&args)?;
    job.validate()?;

    let mut config = quotecard::RenderConfig::from_env();
    if let Some(density) = args.density {
        config.render_resolution = density;
    }
    let renderer = quotecard::Renderer::new(config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start tokio runtime")?;
    let surface = runtime.block_on(renderer.render(&job.profile, &job.template, &job.params));
    let png = surface.encode_png()?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let out = args.out_dir.join(quotecard::download_file_name(
        "quote",
        &quotecard::timestamp_token(),
    ));
    std::fs::write(&out, png).with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_templates() -> anyhow::Result<()> {
    for id in quotecard::TemplateId::ALL {
        let style = id.style();
        let background = match &style.background {
            quotecard::Background::Solid(c) => c.to_hex(),
            quotecard::Background::LinearGradient(stops) => stops
                .iter()
                .map(|s| s.color.to_hex())
                .collect::<Vec<_>>()
                .join(" -> "),
        };
        println!("{:<10} {}", id.as_str(), id.display_name());
        println!("    {}", id.description());
        println!(
            "    background {background}, text {}, accent {}",
            style.text_color.to_hex(),
            style.accent_color.to_hex()
        );
    }
    Ok(())
}
