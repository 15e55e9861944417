use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use splibcli::{
    analysis::Linkage,
    cli::{self, ChartKind, StatsBy},
    config, types::PkceToken, utils, warning,
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Handle the saved-track library
    Library(LibraryOptions),

    /// Monthly and genre counts
    Stats(StatsOptions),

    /// Render charts of the library
    Chart(ChartOptions),

    /// Cluster genres by the artists they share
    Cluster(ClusterOptions),

    /// Cache and token status
    Info,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle the saved-track library",
    args_conflicts_with_subcommands = true // disallow mixing filters with `update`
)]
pub struct LibraryOptions {
    /// Filter by track or artist name
    #[clap(long)]
    pub search: Option<String>,

    /// Filter by genre
    #[clap(long)]
    pub genre: Option<String>,

    /// Subcommands under `library` (e.g., `update`)
    #[command(subcommand)]
    pub command: Option<LibrarySubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LibrarySubcommand {
    /// Fetch saved tracks and artist genres
    Update(LibraryUpdateOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct LibraryUpdateOpts {
    /// Refetch every artist instead of using the artist cache
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    /// What to count
    #[clap(long, value_enum, default_value_t = StatsBy::Month)]
    pub by: StatsBy,

    /// Only the N most frequent genres
    #[clap(long)]
    pub top: Option<usize>,

    /// First month to include (YYYY-MM)
    #[clap(long, value_parser = utils::parse_month)]
    pub since: Option<String>,

    /// Last month to include (YYYY-MM)
    #[clap(long, value_parser = utils::parse_month)]
    pub until: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ChartOptions {
    /// Chart to render
    #[clap(value_enum)]
    pub kind: ChartKind,

    /// Only the N most frequent genres
    #[clap(long)]
    pub top: Option<usize>,

    /// First month to include (YYYY-MM)
    #[clap(long, value_parser = utils::parse_month)]
    pub since: Option<String>,

    /// Last month to include (YYYY-MM)
    #[clap(long, value_parser = utils::parse_month)]
    pub until: Option<String>,

    /// Output file (SVG)
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Open the chart in the browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ClusterOptions {
    /// Linkage method
    #[clap(long, value_enum, default_value_t = Linkage::Complete)]
    pub linkage: Linkage,

    /// Number of genres to cluster, most widespread first
    #[clap(long, default_value_t = 40)]
    pub top: usize,

    /// Also print a flat cut into this many clusters
    #[clap(long)]
    pub clusters: Option<usize>,

    /// Output file (SVG)
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Open the dendrogram in the browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Library(opt) => match opt.command {
            Some(LibrarySubcommand::Update(u)) => cli::update_library(u.force).await,
            None => cli::list_tracks(opt.search, opt.genre).await,
        },
        Command::Stats(opt) => cli::stats(opt.by, opt.top, opt.since, opt.until).await,
        Command::Chart(opt) => {
            cli::chart(
                opt.kind,
                opt.top,
                opt.since,
                opt.until,
                opt.output,
                opt.open,
            )
            .await
        }
        Command::Cluster(opt) => {
            cli::cluster(opt.linkage, opt.top, opt.clusters, opt.output, opt.open).await
        }
        Command::Info => cli::info().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
