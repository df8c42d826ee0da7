//! `revenue` binary: directory, ledger and tool servers.

use anyhow::Result;
use clap::Parser;
use revenue_analysis::{CustomerSource, HttpDirectory, HttpLedger, RevenueAggregator, SalesSource};
use revenue_core::{Config, Customer, Sale};
use revenue_ingestion::load_or_empty;
use revenue_lookup::{Directory, Ledger};
use revenue_server::cli::ToolsArgs;
use revenue_server::logging::init_logging;
use revenue_server::serve::{serve_directory, serve_ledger};
use revenue_server::{Cli, Command, ToolServer};
use tokio::io::BufReader;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);
    let config = cli.resolve_config()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match &cli.command {
            Command::Directory(_) => serve_directory(&config.directory).await,
            Command::Ledger(_) => serve_ledger(&config.ledger).await,
            Command::Tools(args) => run_tools(args, &config).await,
        }
    })
}

async fn run_tools(args: &ToolsArgs, config: &Config) -> Result<()> {
    if args.local {
        let directory = Directory::new(load_or_empty::<Customer>(&config.directory.data_path));
        let ledger = Ledger::new(load_or_empty::<Sale>(&config.ledger.data_path));
        info!(customers = directory.len(), sales = ledger.len(), "joining local snapshots");
        serve_stdio(RevenueAggregator::new(directory, ledger)).await
    } else {
        let directory = HttpDirectory::from_config(&config.analysis)?;
        let ledger = HttpLedger::from_config(&config.analysis)?;
        info!(
            customer_api = %config.analysis.customer_api_url,
            sales_api = %config.analysis.sales_api_url,
            timeout_secs = config.analysis.request_timeout_secs,
            "using remote services"
        );
        serve_stdio(RevenueAggregator::new(directory, ledger)).await
    }
}

async fn serve_stdio<C, S>(aggregator: RevenueAggregator<C, S>) -> Result<()>
where
    C: CustomerSource,
    S: SalesSource,
{
    let server = ToolServer::new(aggregator);
    server
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(())
}
