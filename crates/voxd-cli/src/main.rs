//! voxd server binary.
//!
//! Configuration precedence: command-line flags override `VOXD_*`
//! environment variables, which override built-in defaults.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voxd_core::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "voxd",
    version,
    about = "Text-to-speech synthesis server with a shared audio cache"
)]
struct Cli {
    /// HTTP bind port
    #[arg(long)]
    port: Option<u16>,

    /// Cache connection URL (e.g., redis://127.0.0.1:6379)
    #[arg(long)]
    cache_url: Option<String>,

    /// Run without the shared cache (every request synthesizes)
    #[arg(long)]
    no_cache: bool,

    /// Directory where voice models are stored
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Voice model used when a request does not name one
    #[arg(long)]
    default_model: Option<String>,
}

impl Cli {
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(url) = self.cache_url {
            settings.cache_url = url;
        }
        if self.no_cache {
            settings.cache_enabled = false;
        }
        if let Some(dir) = self.models_dir {
            settings.models_dir = Some(dir);
        }
        if let Some(model) = self.default_model {
            settings.default_model = model;
        }
        settings
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = cli.apply(Settings::from_env());
    let port = settings.port;

    tracing::info!(port, cache_enabled = settings.cache_enabled, "starting voxd");

    let state = voxd_axum::bootstrap(settings).await?;
    voxd_axum::serve(state, port).await
}
