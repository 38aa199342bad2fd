//! promfind - Prometheus template variable query resolver.

mod cli;

use cli::{Cli, OutputFormat};
use promfind::datasource::{HttpDatasource, HttpDatasourceConfig, TimeRange};
use promfind::error::{FindQueryError, Result};
use promfind::find::MetricFindQuery;
use promfind::logging;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init_stderr_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let output = cli
        .parse_output_format()
        .map_err(FindQueryError::config)?;

    let config = HttpDatasourceConfig::new(&cli.url).with_timeout(cli.timeout);
    let datasource = HttpDatasource::new(config)?;
    let range = TimeRange::last(Duration::from_secs(cli.last));

    info!(query = %cli.query, url = %cli.url, "resolving variable query");
    let values = MetricFindQuery::new(&datasource, range)
        .process(&cli.query)
        .await?;

    match output {
        OutputFormat::Text => {
            for value in &values {
                println!("{}", value.text);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&values)
                .map_err(|e| FindQueryError::datasource(e.to_string()))?;
            println!("{json}");
        }
    }

    Ok(())
}
