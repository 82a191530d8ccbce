//! Coalition Builder site: entry point.

use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use coalition_content::config::{resolve_api_base, RenderContext};
use coalition_content::pages::{spa, ssr};
use coalition_content::{fallback_site_metadata, PageType};
use coalition_site::{SiteConfig, SiteServer};

#[derive(Parser)]
#[command(
    name = "coalition-site",
    about = "Coalition Builder: server-rendered advocacy campaign site",
    version
)]
struct Cli {
    /// Content API base URL (overrides API_URL / PUBLIC_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Per-request timeout for content API calls, in seconds.
    #[arg(long, global = true)]
    api_timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the site over HTTP (default).
    Serve {
        /// Listen address (host:port). Also reads SITE_ADDR.
        #[arg(long)]
        addr: Option<String>,
    },

    /// Load a page the way the client-side app does and print it as JSON.
    Page {
        /// Page to load (homepage, about, campaigns, contact).
        #[arg(default_value = "homepage")]
        page: String,
    },

    /// Load one campaign's detail page and print it as JSON.
    Campaign {
        /// Campaign name (slug).
        name: String,
    },

    /// Print the fallback site metadata for the current environment.
    Fallback,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   coalition-site completions bash > ~/.local/share/bash-completion/completions/coalition-site
    ///   coalition-site completions zsh > ~/.zfunc/_coalition-site
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let api_timeout = cli.api_timeout.map(Duration::from_secs);

    match cli.command.unwrap_or(Commands::Serve { addr: None }) {
        Commands::Serve { addr } => {
            let config = SiteConfig::load(addr.as_deref(), cli.api_url.as_deref())?
                .with_api_timeout(api_timeout);
            SiteServer::new(config)?.run().await?;
        }

        Commands::Page { page } => {
            let page_type = PageType::parse(&page)
                .ok_or_else(|| anyhow::anyhow!("unknown page '{page}'"))?;
            let base = resolve_api_base(RenderContext::Client, cli.api_url.as_deref());
            let loader = spa::client_loader(&base, api_timeout)?;

            let controller = spa::mount_page(loader, page_type);
            tracing::info!(page = %page_type, "loading");
            let view = controller
                .wait_loaded()
                .await
                .ok_or_else(|| anyhow::anyhow!("page controller closed before loading"))?;
            tracing::info!(page = %page_type, "loaded");

            println!("{}", serde_json::to_string_pretty(&view)?);
        }

        Commands::Campaign { name } => {
            let base = resolve_api_base(RenderContext::Server, cli.api_url.as_deref());
            let loader = ssr::server_loader(&base, api_timeout)?;
            let rendered = ssr::render_campaign_detail(&loader, &name).await?;
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }

        Commands::Fallback => {
            println!("{}", serde_json::to_string_pretty(&fallback_site_metadata())?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "coalition-site", &mut std::io::stdout());
        }
    }

    Ok(())
}
