#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use favlens_lib::config::Config;
use favlens_lib::scan::write_json;
use favlens_lib::search::ShodanCliStore;
use favlens_lib::telemetry::init_tracing;
use favlens_lib::{
    exit_status, load_run_config, resolve_api_key, FavlensError, HttpFetcher, KeyFlags, Result,
    Scanner, ShodanClient, SourceFlags, Targets, WhoisClient,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find the origin IPs behind a CDN by correlating favicon hashes with a scan index"
)]
struct Cli {
    /// API key for the scan index
    #[arg(short = 'k', long)]
    key: Option<String>,

    /// File whose first line holds the API key
    #[arg(long, value_name = "FILE")]
    key_file: Option<PathBuf>,

    /// Load the API key saved by the Shodan CLI
    #[arg(long)]
    shodan_cli: bool,

    /// Hash a favicon stored in a local file
    #[arg(long, value_name = "FILE")]
    favicon_file: Option<PathBuf>,

    /// Fetch and hash a favicon from a URL
    #[arg(long, value_name = "URL")]
    favicon_url: Option<String>,

    /// Locate the favicon in the home page of a host
    #[arg(short = 'w', long, value_name = "HOST")]
    web: Option<String>,

    /// File listing favicon paths, one per line
    #[arg(long, value_name = "FILE")]
    favicon_list: Option<PathBuf>,

    /// File listing favicon URLs, one per line
    #[arg(long, value_name = "FILE")]
    url_list: Option<PathBuf>,

    /// File listing hosts, one per line
    #[arg(long, value_name = "FILE")]
    web_list: Option<PathBuf>,

    /// Path to configuration TOML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write the records as JSON to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Cli {
    fn key_flags(&self) -> KeyFlags {
        KeyFlags {
            key: self.key.clone(),
            key_file: self.key_file.clone(),
            shodan_cli: self.shodan_cli,
        }
    }

    fn source_flags(&self) -> SourceFlags {
        SourceFlags {
            favicon_file: self.favicon_file.clone(),
            favicon_url: self.favicon_url.clone(),
            web: self.web.clone(),
            favicon_list: self.favicon_list.clone(),
            url_list: self.url_list.clone(),
            web_list: self.web_list.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = load_run_config(&cli.key_flags(), &cli.source_flags(), cli.config.as_deref());
    let logging = config.as_ref().map(|c| c.logging.clone()).unwrap_or_default();
    if let Err(err) = init_tracing(&logging.level, logging.show_target) {
        eprintln!("{err}");
    }

    let result = match config {
        Ok(config) => run(&cli, &config).await,
        Err(err) => Err(err),
    };

    if let Err(err) = &result {
        match err {
            FavlensError::Configuration(msg) => println!("{msg}"),
            other => error!(err = %other, "favlens exited with error"),
        }
    }
    std::process::exit(exit_status(&result));
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let key_flags = cli.key_flags();
    let targets = Targets::from_flags(&cli.source_flags())?;
    let key = resolve_api_key(&key_flags, &ShodanCliStore::from_env())?;

    let scanner = Scanner::new(
        HttpFetcher::new(&config.http)?,
        ShodanClient::new(&config.search, key)?,
        WhoisClient::new(&config.whois),
    );
    info!(targets = targets.len(), "starting scan");

    // Stdout locks per write, never across a network round trip.
    let mut stdout = io::stdout();
    let mut records = Vec::with_capacity(targets.len());
    let scanned = scanner.run_into(&targets, &mut stdout, &mut records).await;
    stdout.flush()?;

    if let Some(path) = &cli.output {
        write_json(path, &records)?;
        info!(path = %path.display(), records = records.len(), "records written");
    }
    scanned
}
