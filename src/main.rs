use async_io::Async;
use clap::Parser;
use futures::executor::LocalPool;
use futures::prelude::*;
use futures::task::LocalSpawnExt;
use raw_ws::connection::{serve, ServerConfig};
use simple_logger::SimpleLogger;
use std::net::TcpListener;
use std::panic::AssertUnwindSafe;

fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    SimpleLogger::new().with_level(config.log_level).init()?;

    let listener = Async::<TcpListener>::bind(config.addr)?;
    log::info!("listening on {}", config.addr);

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    pool.run_until(async move {
        let incoming = listener.incoming();
        futures::pin_mut!(incoming);
        while let Some(transport) = incoming.next().await {
            let transport = match transport {
                Ok(transport) => transport,
                Err(err) => {
                    log::error!("accept failed: {}", err);
                    continue;
                }
            };
            let peer = transport
                .get_ref()
                .peer_addr()
                .map_or_else(|_| "unknown peer".to_string(), |addr| addr.to_string());
            let connection = AssertUnwindSafe(serve(transport))
                .catch_unwind()
                .map(move |result| match result {
                    Ok(Ok(count)) => log::info!("{} disconnected after {} messages", peer, count),
                    Ok(Err(err)) => log::error!("{} closed with error: {}", peer, err),
                    Err(_) => log::error!("{} connection handler panicked", peer),
                });
            if let Err(err) = spawner.spawn_local(connection) {
                log::error!("failed to spawn connection handler: {}", err);
            }
        }
    });
    Ok(())
}
