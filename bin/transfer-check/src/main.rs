use clap::Parser;
use std::process::ExitCode;
use transfer_check::cli::Cli;
use transfer_scenario::{RpcLedger, TransferScenario};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Pick up JSON_RPC_ENDPOINT and friends from a local .env, if any.
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    args.log.init_tracing()?;

    let network = args.network.to_config()?;
    let config = args.scenario.to_config()?;

    let ledger = RpcLedger::new(&network);
    let sender = ledger.control_address();
    tracing::info!(
        target: "transfer::cli",
        endpoint = %network.endpoint,
        %sender,
        runs = config.runs,
        fee_law = %config.fee_law,
        "Starting transfer check"
    );

    // Runs share the control account, so they go one after the other.
    let json = args.scenario.json;
    let scenario = TransferScenario::new(&ledger, sender, &config);
    let outcome = scenario
        .run_all(|verdict| {
            if !json {
                println!("{verdict}");
                return;
            }
            match serde_json::to_string(verdict) {
                Ok(line) => println!("{line}"),
                Err(err) => tracing::error!(target: "transfer::cli", %err, "Failed to encode verdict"),
            }
        })
        .await;

    match outcome {
        Ok(reports) => {
            tracing::info!(target: "transfer::cli", runs = reports.len(), "All runs passed");
            Ok(ExitCode::SUCCESS)
        }
        Err((run, err)) => {
            tracing::error!(target: "transfer::cli", run, kind = %err.kind(), %err, "Transfer check failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
