// ABOUTME: Command line entry point for the multi-operator SMSC simulator
// ABOUTME: Parses operator selection and receipt flags, installs logging and runs until Ctrl+C

use argh::FromArgs;
use smsc_sim::{OperatorRegistry, OperatorSelection, Simulator, SimulatorConfig};
use std::error::Error;
use std::net::IpAddr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Multi-operator SMPP simulator: AFTEL (2775), Roshan (2776), AWCC (2777),
/// MTN (2778) and Salaam (2779)
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// operator to simulate, repeatable: aftel, roshan, awcc, mtn, salaam or all (default: all)
    #[argh(option, short = 'o')]
    operator: Vec<String>,

    /// disable automatic delivery receipts
    #[argh(switch)]
    no_dlr: bool,

    /// the address to listen on (default: 0.0.0.0)
    #[argh(option)]
    host: Option<IpAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let level = if cli_args.debugging {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = SimulatorConfig::default()
        .with_operators(OperatorSelection::from_args(&cli_args.operator));
    if let Some(host) = cli_args.host {
        config = config.with_host(host);
    }
    if cli_args.no_dlr {
        config = config.without_receipts();
    }

    let registry = OperatorRegistry::builtin();
    let simulator = Simulator::start_with(&registry, &config).await?;

    println!("Multi-operator SMPP simulator");
    for (name, addr) in simulator.local_addrs()? {
        println!("  {name:12} - {addr}");
    }
    println!("Press Ctrl+C to stop");

    simulator
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("cannot listen for Ctrl+C: {e}");
            }
        })
        .await;

    Ok(())
}
