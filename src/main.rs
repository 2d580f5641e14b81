use clap::Parser;

use svgpress::cdp::CdpEngine;
use svgpress::request::{RenderOptions, RenderRequest};
use svgpress::{orchestrator, transport, RenderConfig, RenderMode};

/// Render a web page headlessly and write it to stdout as SVG or PDF
#[derive(Parser, Debug)]
#[command(name = "svgpress", version, about)]
struct Cli {
    /// URL of the web page to render
    url: String,

    /// Output format, one of: svg, pdf
    #[arg(short, long, default_value = "svg")]
    format: String,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> svgpress::Result<()> {
    // Fail on unknown formats before a browser is ever launched.
    RenderMode::resolve(Some(cli.format.as_str()))?;

    let config = RenderConfig::default();
    let engine = CdpEngine::launch(&config).await?;

    let request = RenderRequest {
        url: cli.url,
        options: RenderOptions {
            format: Some(cli.format),
        },
    };
    let rendered = orchestrator::render(engine.as_ref(), &request, &config).await?;

    let mut stdout = tokio::io::stdout();
    transport::deliver(&mut stdout, &rendered.payload, transport::DEFAULT_CHUNK_SIZE).await
}
