use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use dialframe::{BatchPaths, Family, Revision, Theme};

#[derive(Parser, Debug)]
#[command(name = "dialframe", version)]
struct Cli {
    /// Log more (repeat for trace output).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every enabled family into an output tree.
    Generate(GenerateArgs),
    /// Print the effective theme as JSON.
    Theme(ThemeArgs),
    /// List family names in the order they are generated.
    Families,
}

#[derive(Args, Debug)]
struct ThemeArgs {
    /// Built-in revision the theme file is merged over.
    #[arg(long, default_value_t = Revision::default())]
    revision: Revision,

    /// JSON theme file overriding parts of the revision.
    #[arg(long)]
    theme: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Output root directory.
    #[arg(long)]
    out: PathBuf,

    /// Directory holding overlay bitmaps.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Only generate these families (comma separated).
    #[arg(long, value_delimiter = ',')]
    only: Vec<Family>,

    #[command(flatten)]
    theme: ThemeArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Theme(args) => cmd_theme(args),
        Command::Families => {
            for family in Family::ALL {
                println!("{family}");
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::WARN,
        (false, 0) => LevelFilter::INFO,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_theme(args: &ThemeArgs) -> anyhow::Result<Theme> {
    let base = Theme::builtin(args.revision);
    match &args.theme {
        Some(path) => Theme::from_path_over(&base, path)
            .with_context(|| format!("load theme '{}'", path.display())),
        None => Ok(base),
    }
}

fn cmd_theme(args: ThemeArgs) -> anyhow::Result<()> {
    let theme = load_theme(&args)?;
    let json = serde_json::to_string_pretty(&theme).context("serialize theme")?;
    println!("{json}");
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let theme = load_theme(&args.theme)?;
    let paths = BatchPaths {
        out_root: args.out.clone(),
        assets_root: args.assets,
    };
    let summary = dialframe::run_theme(&theme, &paths, &args.only)
        .with_context(|| format!("generate into '{}'", args.out.display()))?;

    eprintln!(
        "{}: {} made, {} changed, {} kept, {} linked",
        args.out.display(),
        summary.made,
        summary.changed,
        summary.kept,
        summary.linked
    );
    Ok(())
}
