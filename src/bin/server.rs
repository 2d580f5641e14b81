use std::sync::Arc;

use clap::Parser;

use svgpress::cdp::CdpEngine;
use svgpress::engine::EngineProcess;
use svgpress::server::{serve, AppState, ListenAddr};
use svgpress::RenderConfig;

/// Long-running render service: POST a URL (raw text or JSON) to `/` and
/// receive the rendered SVG or PDF bytes back
#[derive(Parser, Debug)]
#[command(name = "svgpress-server", version, about)]
struct Cli {
    /// Host for the TCP listener
    #[arg(long, env = "SVGPRESS_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port for the TCP listener
    #[arg(long, env = "SVGPRESS_PORT", default_value_t = 8090)]
    port: u16,

    /// Bind a unix-domain socket at this path instead of TCP
    #[cfg(unix)]
    #[arg(long, env = "SVGPRESS_UNIX")]
    unix: Option<std::path::PathBuf>,
}

impl Cli {
    fn listen_addr(&self) -> ListenAddr {
        #[cfg(unix)]
        if let Some(path) = &self.unix {
            return ListenAddr::Unix(path.clone());
        }

        ListenAddr::Tcp {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = RenderConfig::default();
    let engine: Arc<dyn EngineProcess> = CdpEngine::launch(&config).await?;

    serve(cli.listen_addr(), AppState::new(engine, config)).await?;
    Ok(())
}
