use anyhow::Result;
use clap::Parser;

mod demo;

#[derive(Debug, Parser)]
#[command(name = "stepline", version, about = "Interactive step progress bar demo")]
struct Cli {
    /// Number of steps to start with
    #[arg(long, default_value_t = 4)]
    steps: usize,

    /// JSON stylesheet to use instead of the embedded one
    #[arg(long)]
    style: Option<std::path::PathBuf>,

    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    demo::run(&cli)
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
