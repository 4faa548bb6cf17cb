use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moodify::{cli, config, error};

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
    Auth(AuthOptions),

    /// Build tomorrow's playlist once
    Run(RunOptions),

    /// Build the playlist every day at RUN_TIME
    Schedule,

    /// Show tomorrow's forecast and mood without touching Spotify
    Forecast,

    /// Manage the target playlist
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Paste the redirect URL instead of running the callback server
    #[clap(long)]
    pub manual: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RunOptions {
    /// Log what would be written without changing the playlist
    #[clap(long)]
    pub dry_run: bool,

    /// Number of tracks to put in the playlist
    #[clap(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub track_count: Option<u16>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    #[command(subcommand)]
    pub command: PlaylistSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// Create a playlist and print its ID
    Create(PlaylistCreateOpts),

    /// Append tracks to a playlist without replacing it
    Add(PlaylistAddOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistCreateOpts {
    /// Playlist name
    pub name: String,

    /// Make the playlist public
    #[clap(long)]
    pub public: bool,

    /// Playlist description
    #[clap(long, default_value = "Tomorrow's weather, as music.")]
    pub description: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistAddOpts {
    /// Track ids, spotify:track: URIs or open.spotify.com links
    #[clap(required = true)]
    pub tracks: Vec<String>,

    /// Target playlist (defaults to PLAYLIST_ID)
    #[clap(long)]
    pub playlist_id: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    match cli.command {
        Command::Auth(opt) => cli::auth(&config, opt.manual).await,
        Command::Run(opt) => {
            cli::run(config, opt.dry_run, opt.track_count.map(usize::from)).await
        }
        Command::Schedule => cli::schedule(config).await,
        Command::Forecast => cli::forecast(&config).await,
        Command::Playlist(opt) => match opt.command {
            PlaylistSubcommand::Create(c) => {
                cli::create_playlist(&config, &c.name, c.public, &c.description).await
            }
            PlaylistSubcommand::Add(a) => {
                cli::add_tracks(&config, a.playlist_id.as_deref(), &a.tracks).await
            }
        },
        Command::Completions(_) => {}
    }
}
