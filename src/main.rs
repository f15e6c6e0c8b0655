use std::net::TcpListener;

use env_logger::Env;
use enricher::{configuration::get_configuration, services::ExaClient, startup::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;

    let exa_client = ExaClient::new(&configuration.exa)?;
    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    log::info!("Listening on {}", address);

    run(listener, exa_client)?.await?;

    Ok(())
}
