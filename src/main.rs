use clap::{Parser, Subcommand};
use folio::config::{self, SiteConfig};
use folio::{catalog::Catalog, inventory, output, server};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Web server for a photography portfolio")]
#[command(long_about = "\
Web server for a photography portfolio

The photo root is the data source. Each genre is a folder; a genre shows up
in the navigation as soon as its folder exists. Pages are built on every
request, so copying photos in is all it takes to publish them.

Photo root structure:

  static/photos/
  ├── main/                 # Home page slider
  │   └── 01-harbour.jpg
  ├── landscapes/           # Genre folders (shown when present)
  ├── portraits/
  ├── subject/
  ├── city/
  └── other/

Images: .jpg .jpeg .png .gif .webp (any case), ordered by filename.

Run 'folio gen-config' to generate a documented folio.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (missing default file means stock defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Photo root directory, overrides `photo_root` from the config
    #[arg(long, global = true)]
    photo_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the web server (default)
    Serve {
        /// Listen address, overrides `[server] bind`
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print what the site would show from the photo root
    Check,
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            let mut site_config = load_site_config(cli.config.as_deref(), cli.photo_root)?;
            if let Some(bind) = bind {
                site_config.server.bind = bind;
                site_config.validate()?;
            }
            let addr: SocketAddr = site_config.server.bind.parse()?;
            let state = server::AppState::from_config(&site_config)?;

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(server::serve(state, addr))?;
        }
        Command::Check => {
            let site_config = load_site_config(cli.config.as_deref(), cli.photo_root)?;
            let catalog = Catalog::new(
                &site_config.photo_root,
                Arc::new(site_config.genre_table()?),
                &site_config.static_prefix,
            );
            output::print_check_output(&inventory::take_inventory(&catalog));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `folio.toml` (or the explicit `--config` file) and apply CLI overrides.
fn load_site_config(
    explicit: Option<&Path>,
    photo_root: Option<PathBuf>,
) -> Result<SiteConfig, config::ConfigError> {
    let mut site_config = match explicit {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(Path::new(config::DEFAULT_CONFIG_FILE))?,
    };
    if let Some(root) = photo_root {
        site_config.photo_root = root.to_string_lossy().into_owned();
        site_config.validate()?;
    }
    Ok(site_config)
}

/// Log to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folio=info,tower=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
