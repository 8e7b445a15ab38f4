use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use songscout::{cli, config, error};

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
    /// Create an account and sign in
    Signup(SignupOptions),

    /// Sign in with email and password
    Signin(SigninOptions),

    /// Sign out and forget the stored session
    Signout,

    /// Show the signed-in user
    Whoami,

    /// List popular tracks that have a preview
    Popular,

    /// Search tracks by keyword
    Search(SearchOptions),

    /// Find up to five tracks similar to a track
    Similar(TrackOptions),

    /// Play the preview clip of a track
    Preview(TrackOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SignupOptions {
    /// Display name
    #[clap(long)]
    pub name: String,

    #[clap(long)]
    pub email: String,

    #[clap(long)]
    pub password: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SigninOptions {
    #[clap(long)]
    pub email: String,

    #[clap(long)]
    pub password: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Keyword to search for; leave blank for popular tracks
    #[clap(default_value = "")]
    pub keyword: String,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    /// Spotify track id
    pub track_id: String,
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
        Command::Signup(opt) => cli::sign_up(opt.name, opt.email, opt.password).await,
        Command::Signin(opt) => cli::sign_in(opt.email, opt.password).await,
        Command::Signout => cli::sign_out().await,
        Command::Whoami => cli::whoami().await,
        Command::Popular => cli::popular().await,
        Command::Search(opt) => cli::search(opt.keyword).await,
        Command::Similar(opt) => cli::similar(opt.track_id).await,
        Command::Preview(opt) => cli::preview(opt.track_id).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
