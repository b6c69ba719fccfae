//! `fhrs` - look up food hygiene ratings from the command line.
//!
//! # Examples
//!
//! ```bash
//! # One establishment by FHRSID
//! fhrs get 82940
//!
//! # Search by name, in Welsh
//! fhrs --language cy-GB search --name "Ali's"
//!
//! # Rating values
//! fhrs ratings
//!
//! # Against a local mock server
//! FHRS_BASE_URL=http://127.0.0.1:3000 fhrs ratings
//! ```

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fhrs_core::config::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use fhrs_core::{Config, FhrsClient, SearchParams};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "fhrs")]
#[command(about = "Query the Food Hygiene Rating Scheme API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL.
    #[arg(long, env = "FHRS_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Response language (en-GB or cy-GB).
    #[arg(long, short, env = "FHRS_LANGUAGE", default_value = "en-GB", global = true)]
    pub language: String,

    /// Value sent as `x-api-version`.
    #[arg(long, env = "FHRS_API_VERSION", default_value_t = DEFAULT_API_VERSION, global = true)]
    pub api_version: u32,

    /// Overall request timeout in seconds.
    #[arg(long, default_value_t = 15, global = true)]
    pub timeout_secs: u64,

    /// Print compact rather than pretty JSON.
    #[arg(long, global = true)]
    pub compact: bool,

    /// Log request details to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch one establishment by FHRSID.
    Get {
        /// FHRSID of the establishment.
        id: String,
    },

    /// Search establishments.
    Search(SearchArgs),

    /// List the rating values the API can award.
    Ratings,
}

#[derive(Debug, Default, Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,
    /// Radius in miles around longitude/latitude.
    #[arg(long)]
    pub max_distance: Option<f64>,
    #[arg(long)]
    pub business_type_id: Option<i64>,
    #[arg(long)]
    pub scheme_type: Option<String>,
    #[arg(long)]
    pub rating_key: Option<String>,
    /// Equal, GreaterThanOrEqual or LessThanOrEqual.
    #[arg(long)]
    pub rating_operator: Option<String>,
    #[arg(long)]
    pub local_authority_id: Option<i64>,
    #[arg(long)]
    pub country_id: Option<i64>,
    #[arg(long)]
    pub sort: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl From<SearchArgs> for SearchParams {
    fn from(args: SearchArgs) -> Self {
        SearchParams {
            name: args.name,
            address: args.address,
            longitude: args.longitude,
            latitude: args.latitude,
            max_distance_limit: args.max_distance,
            business_type_id: args.business_type_id,
            scheme_type_key: args.scheme_type,
            rating_key: args.rating_key,
            rating_operator_key: args.rating_operator,
            local_authority_id: args.local_authority_id,
            country_id: args.country_id,
            sort_option_key: args.sort,
            page_number: args.page,
            page_size: args.page_size,
        }
    }
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("fhrs_core=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn build_client(cli: &Cli) -> Result<FhrsClient> {
    let config = Config::new(&cli.base_url)
        .with_context(|| format!("invalid base URL {}", cli.base_url))?
        .with_version(cli.api_version)
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let mut client = FhrsClient::with_config(config);
    client.set_language(&cli.language)?;
    Ok(client)
}

/// Print `value` as JSON; `false` when there was nothing to print.
fn print_json<T: Serialize>(value: Option<T>, compact: bool) -> Result<bool> {
    let Some(value) = value else {
        return Ok(false);
    };
    let out = if compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    println!("{out}");
    Ok(true)
}

fn run(cli: Cli) -> Result<bool> {
    let client = build_client(&cli)?;
    debug!(base_url = %client.config().base_url(), language = %client.config().language(), "client ready");

    match cli.command {
        Commands::Get { id } => {
            let est = client
                .establishments()
                .get_by_id(&id)
                .with_context(|| format!("fetching establishment {id}"))?;
            print_json(est, cli.compact)
        }
        Commands::Search(args) => {
            let params = SearchParams::from(args);
            let page = client
                .establishments()
                .search(&params)
                .context("searching establishments")?;
            print_json(page, cli.compact)
        }
        Commands::Ratings => {
            let ratings = client.ratings().list().context("listing ratings")?;
            print_json(ratings, cli.compact)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("no result");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
