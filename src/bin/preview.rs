//! Authshell Preview
//!
//! Renders application paths through the headless browser and prints the
//! mounted markup, so views can be checked without a WASM build.
//!
//! Run with: cargo run --bin authshell-preview -- / /login /unknown
//!
//! The first path is rendered as the initial page load; each following path
//! is reached through in-app navigation, exactly as a link click would.

use anyhow::Context;
use authshell::api::HttpProfileApi;
use authshell::browser::{MemoryBrowser, MemoryDocument};
use authshell::config::{generate_default_config, ShellConfig};
use authshell::{default_routes, RenderOutcome, Router};
use clap::Parser;
use std::path::PathBuf;
use std::rc::Rc;
use url::Url;

#[derive(Parser)]
#[command(name = "authshell-preview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render SPA shell views headlessly")]
struct Cli {
    /// Paths to render, in navigation order
    #[arg(default_value = "/")]
    paths: Vec<String>,

    /// Config file (default: standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Origin the session starts on
    #[arg(long, default_value = "http://localhost:8080")]
    origin: String,

    /// Bearer token for the profile view
    #[arg(long)]
    token: Option<String>,

    /// Print the default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => ShellConfig::load_with_env(path)?,
        None => ShellConfig::load_default(),
    };
    authshell::logging::init_logging(&config.logging);

    let origin = Url::parse(&cli.origin).context("invalid --origin")?;
    let api_base = origin
        .join(&config.api.base_url)
        .context("invalid api.base_url")?;
    let api = Rc::new(HttpProfileApi::new(api_base.as_str(), cli.token.clone())?);

    let routes = default_routes(&config, api)?;

    let (first, rest) = cli
        .paths
        .split_first()
        .context("at least one path is required")?;

    let browser = Rc::new(MemoryBrowser::new(origin.join(first)?.as_str())?);
    let document = Rc::new(MemoryDocument::new(&config.mount.id));
    let router = Router::new(&config, Rc::clone(&browser), Rc::clone(&document), routes);

    let outcome = router.render().await?;
    print_view(&config, &document, &outcome);

    for path in rest {
        let outcome = router.navigate_to(path)?.await?;
        print_view(&config, &document, &outcome);
    }

    tracing::info!(
        history = browser.history_len(),
        renders = document.replacements(),
        "Preview complete"
    );
    Ok(())
}

fn print_view(config: &ShellConfig, document: &MemoryDocument, outcome: &RenderOutcome) {
    if let RenderOutcome::Mounted { path, route, generation } = outcome {
        println!("==> {} ({:?}, generation {})", path, route, generation);
    }

    println!("{}", document.mount_html());

    let active = document.hrefs_with_class(&config.links.attribute, &config.links.active_class);
    if active.is_empty() {
        println!("--- active links: none");
    } else {
        println!("--- active links: {}", active.join(", "));
    }
    println!();
}
