use std::error::Error;
use std::sync::Arc;

use configuration::NameserverConfiguration;
use nameserver::ZoneHandler;
use tokio::net::UdpSocket;
use tracing::info;

mod cli_args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args: cli_args::CliArgs = argh::from_env();
    let config: NameserverConfiguration = configuration::get_config(args.config)?;
    nameserver::init_tracing(&config.log_level);

    let handler = ZoneHandler::from_config(&config.zone)?;
    info!(records = handler.len(), "zone loaded");

    let address = config.server.bind_address();
    let socket = UdpSocket::bind(address).await?;
    info!(address = %address, pid = std::process::id(), "listening");

    let shutdown = nameserver::shutdown_signal(tokio::signal::ctrl_c());
    nameserver::serve(socket, Arc::new(handler), config.server.oversize, shutdown).await?;

    Ok(())
}
