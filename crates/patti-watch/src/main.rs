use clap::Parser;
use tracing_subscriber::EnvFilter;

mod client;

#[derive(Parser)]
#[command(name = "patti-watch")]
#[command(about = "Watch a Teen Patti game room from the terminal", long_about = None)]
struct Cli {
    /// Server host (and port) serving the game-room sockets
    #[arg(long, default_value = "127.0.0.1:8000")]
    host: String,

    /// Game room ID to watch
    #[arg(short, long)]
    room: String,

    /// Signed-in user ID (only used to tag log lines)
    #[arg(short, long)]
    user: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialise tracing (respects RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = client::start_watch(&cli.host, &cli.room, cli.user.as_deref()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
