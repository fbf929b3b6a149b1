//! F-Droid catalog builder binary.
//!
//! Fetches the index once, writes the filtered catalog and exits.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fdroid_catalog::{CatalogConfig, CatalogError};

#[derive(Parser, Debug)]
#[command(name = "fdroid-catalog")]
#[command(version, about = "Build a catalog of open-source apps from the F-Droid index", long_about = None)]
struct Cli {
    /// Index document URL
    #[arg(long)]
    index_url: Option<String>,

    /// Output file (replaced on success)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base URL icon file names are joined onto
    #[arg(long)]
    icon_base_url: Option<String>,

    /// Icon URL for apps without icon data
    #[arg(long)]
    placeholder_icon_url: Option<String>,

    /// Base URL of per-app detail pages
    #[arg(long)]
    detail_base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Locale preference order, comma separated (e.g. en-US,en)
    #[arg(short, long, value_delimiter = ',')]
    locales: Option<Vec<String>>,

    /// Platform tag added to every record
    #[arg(long)]
    platform: Option<String>,

    /// User-Agent sent with the index request
    #[arg(long)]
    user_agent: Option<String>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// Apply command line overrides on top of the environment config.
    fn apply(self, mut config: CatalogConfig) -> CatalogConfig {
        if let Some(url) = self.index_url {
            config.index_url = url;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(url) = self.icon_base_url {
            config.icon_base_url = url;
        }
        if let Some(url) = self.placeholder_icon_url {
            config.placeholder_icon_url = url;
        }
        if let Some(url) = self.detail_base_url {
            config.detail_base_url = url;
        }
        if let Some(secs) = self.timeout {
            config.timeout_secs = secs;
        }
        if let Some(locales) = self.locales {
            config.locales = locales;
        }
        if let Some(platform) = self.platform {
            config.platform = platform;
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
        config.pretty |= self.pretty;
        config
    }
}

/// Initialize tracing/logging.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,fdroid_catalog=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(usage_exit_code(&e));
        }
    };

    // Load environment variables
    dotenvy::dotenv().ok();
    init_tracing(cli.log_format);

    let result = match CatalogConfig::from_env() {
        Ok(config) => {
            let config = cli.apply(config);
            tracing::info!(
                index_url = %config.index_url,
                output = %config.output.display(),
                locales = ?config.locales,
                "Configuration loaded"
            );
            fdroid_catalog::run(&config).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(summary) => {
            tracing::info!(
                apps = summary.included,
                skipped = summary.errors.len(),
                output = %summary.output.display(),
                "Done"
            );
        }
        Err(e) => {
            report(&e);
            std::process::exit(e.exit_code());
        }
    }
}

/// `--help` and `--version` keep clap's status (0). Real usage errors exit
/// like configuration errors, since 2 means the upstream fetch failed.
fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        err.exit_code()
    }
}

fn report(err: &CatalogError) {
    match err {
        CatalogError::Fetch(e) => tracing::error!(error = %e, "Could not retrieve the index, nothing written"),
        CatalogError::Write(e) => tracing::error!(error = %e, "Catalog built but could not be written"),
        CatalogError::Config(e) => tracing::error!(error = %e, "Invalid configuration"),
    }
}
