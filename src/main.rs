use anyhow::Result;
use babelx_transcriber::{server, Config};
use clap::Parser;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "babelx-transcriber", version, about = "Speech-to-text upload service")]
struct Args {
    /// Config file (extension optional)
    #[arg(short, long, default_value = "config/babelx")]
    config: String,

    /// Override the bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the HTTP port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut cfg = Config::load(&args.config)?;
    if let Some(bind) = args.bind {
        cfg.service.http.bind = bind;
    }
    if let Some(port) = args.port {
        cfg.service.http.port = port;
    }

    info!("BabelX transcriber v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);
    info!(
        "Speech endpoint: {} (language {})",
        cfg.speech.endpoint, cfg.speech.language_code
    );
    info!("Default upload format: {}", cfg.audio.default_format);

    let state = server::build_state(&cfg)?;
    server::serve(&cfg, state).await
}
