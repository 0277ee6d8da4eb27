use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use greetcard::{
    CardError, Editor, GreetcardConfig, LocalImage, MessageUpdate, Millis, Mode, RecordingSink,
    parse_data_uri, render_qr_svg,
};

#[derive(Parser, Debug)]
#[command(name = "greetcard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a card from image files and print its share link.
    Share(ShareArgs),
    /// Decode a share link and print the card it carries.
    Open(OpenArgs),
    /// Play a shared card headlessly and print the reveal order.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct ShareArgs {
    /// Card title.
    #[arg(long)]
    title: Option<String>,

    /// Image and caption as `PATH=CAPTION`. Repeat for up to five messages.
    #[arg(long = "item", value_name = "IMG=CAPTION", required = true)]
    items: Vec<String>,

    /// Viewer origin, e.g. `https://cards.example`.
    #[arg(long)]
    origin: Option<String>,

    /// Viewer path.
    #[arg(long)]
    path: Option<String>,

    /// JPEG quality in `(0, 1]`.
    #[arg(long)]
    quality: Option<f32>,

    /// Longest edge of re-encoded images, in pixels.
    #[arg(long)]
    max_dimension: Option<u32>,

    /// Also write a scannable code of the link as SVG.
    #[arg(long)]
    qr_svg: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct OpenArgs {
    /// Share link (or bare query string).
    #[arg(long)]
    url: String,

    /// Write the embedded images into this directory.
    #[arg(long)]
    images_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Share link (or bare query string).
    #[arg(long)]
    url: String,

    /// Number of falling items to click.
    #[arg(long, default_value_t = 3)]
    clicks: usize,

    /// Override the decorative randomness seed.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Simulated time step of `play`.
const PLAY_STEP_MS: u64 = 100;
/// Give up on `play` after this much simulated time.
const PLAY_BUDGET_MS: u64 = 10 * 60 * 1_000;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Share(args) => cmd_share(args),
        Command::Open(args) => cmd_open(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GreetcardConfig> {
    match path {
        Some(p) => GreetcardConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(GreetcardConfig::default()),
    }
}

fn cmd_share(args: ShareArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_ref())?;
    if let Some(origin) = args.origin {
        cfg.share.origin = origin;
    }
    if let Some(path) = args.path {
        cfg.share.path = path;
    }
    if let Some(q) = args.quality {
        cfg.image.quality = q;
    }
    if let Some(d) = args.max_dimension {
        cfg.image.max_dimension = d;
    }
    cfg.validate()?;

    let mut editor = Editor::new();
    if let Some(title) = args.title {
        editor.set_title(title);
    }
    for item in &args.items {
        let (path, caption) = item
            .split_once('=')
            .with_context(|| format!("item '{item}' must look like IMG=CAPTION"))?;
        let image = LocalImage::from_path(path)?;
        let id = editor
            .add_message()
            .with_context(|| format!("a card holds at most {} messages", greetcard::MAX_MESSAGES))?;
        editor.update_message(id, MessageUpdate::Image(Some(image)));
        editor.update_message(id, MessageUpdate::Text(caption.to_string()));
    }

    let link = match editor.share(&cfg.image, &cfg.share) {
        Ok(link) => link,
        Err(e @ CardError::PayloadTooLarge { .. }) => {
            eprintln!(
                "The card is too large to share as a link ({e}). Use fewer or smaller images."
            );
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", link.url);
    println!("{}", link.qr_url);

    if let Some(out) = args.qr_svg {
        let svg = render_qr_svg(&link.url, cfg.share.qr_size)?;
        if let Some(parent) = out.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&out, svg).with_context(|| format!("write svg '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_open(args: OpenArgs) -> anyhow::Result<()> {
    let editor = Editor::boot(&args.url);
    if editor.mode() != Mode::Presenting {
        println!("no card in link; a fresh card would open in the editor");
        return Ok(());
    }

    let card = editor.card();
    println!("title: {}", card.title);
    for (i, msg) in card.messages.iter().enumerate() {
        println!("{}. {}", i + 1, msg.text);
    }

    if let Some(dir) = args.images_out {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        for (i, msg) in card.messages.iter().enumerate() {
            let Some(uri) = msg.image_url.as_deref() else {
                continue;
            };
            let data = parse_data_uri(uri)?;
            let ext = data.mime.rsplit('/').next().unwrap_or("bin");
            let out = dir.join(format!("message-{}.{ext}", i + 1));
            std::fs::write(&out, &data.bytes)
                .with_context(|| format!("write image '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        cfg.director.seed = seed;
    }

    let mut editor = Editor::boot(&args.url);
    if editor.mode() != Mode::Presenting {
        anyhow::bail!("link does not carry a card");
    }
    let mut presentation = editor.finalize(cfg.director)?;
    let mut sink = RecordingSink::new();

    println!("{}", presentation.title());
    let mut now = Millis(0);
    presentation.start(now);
    presentation.click_surface(&mut sink);

    let mut revealed = 0;
    while revealed < args.clicks && now.0 < PLAY_BUDGET_MS {
        now = now.after(PLAY_STEP_MS);
        presentation.tick(now);

        if let Some(popup) = presentation.close_popup() {
            revealed += 1;
            println!("[{:>7.1}s] {}", now.as_secs_f64(), popup.text);
            continue;
        }

        let viewport = presentation.director().opts().viewport;
        let target = presentation
            .director()
            .falling_items()
            .find(|e| {
                matches!(
                    e.kind,
                    greetcard::EntityKind::FallingItem { clicked: false, .. }
                )
            })
            .map(|e| (e.id, e.position_at(now, viewport)));
        if let Some((id, at)) = target {
            presentation.click_item(id, at, now, &mut sink);
        }
    }

    presentation.leave();
    println!("center: {}", presentation.center_text());
    Ok(())
}
