use clap::Parser;
use scripts::{
    cli::Cli, constants::DEFAULT_LOG_FILTER, errors::ScriptError, factory::RpcContractFactory,
    utils::setup_client,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.deployment_config()?;

    let client = setup_client(&cli.priv_key, &cli.rpc_url)?;
    let factory = RpcContractFactory::new(client, &cli.artifacts_dir);

    cli.command.run(&factory, config).await
}
