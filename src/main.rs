use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sptracks::{cli, config, error};

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
    /// List the tracks of a playlist
    Playlist(PlaylistOptions),

    /// List the tracks of one or more albums
    Albums(AlbumsOptions),

    /// List the albums in the new-release feed
    Releases(OutputOptions),

    /// List the tracks of every album in the new-release feed
    NewTracks(OutputOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Print JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Playlist id, spotify:playlist:<id> URI or open.spotify.com URL
    pub reference: String,

    #[clap(flatten)]
    pub output: OutputOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct AlbumsOptions {
    /// Album ids, URIs or URLs
    #[clap(required = true, num_args = 1..)]
    pub references: Vec<String>,

    #[clap(flatten)]
    pub output: OutputOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Playlist(opt) => cli::playlist(opt.reference, opt.output.json).await,
        Command::Albums(opt) => cli::albums(opt.references, opt.output.json).await,
        Command::Releases(opt) => cli::releases(opt.json).await,
        Command::NewTracks(opt) => cli::new_tracks(opt.json).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
