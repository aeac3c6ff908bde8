mod config;
mod dispatch;
mod handler;
mod transport;

use std::time::Duration;

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::info;
use wardrobe_core::session::ConnectionId;
use wardrobe_proto::outfit::{CosmeticSlot, OutfitUpdate, OutfitUpdatesPayload};

use config::ClientConfig;
use handler::ClientHandler;
use transport::TransportEvent;

#[tokio::main]
async fn main() {
    let config = match ClientConfig::load("wardrobe.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load wardrobe.toml: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let version = match config.transport_version() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid wardrobe.toml: {e}");
            std::process::exit(1);
        }
    };

    info!(
        "Wardrobe client v{} starting (transport: {:?})",
        env!("CARGO_PKG_VERSION"),
        version
    );
    info!("Outfit channel: {}", version.outfit_channel());

    let mut handler = ClientHandler::new(version, config.cosmetics.log_updates);

    let (events_tx, mut events_rx) = mpsc::channel::<TransportEvent>(64);
    spawn_loopback_feed(events_tx, version.outfit_channel().to_string());

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    loop {
        tokio::select! {
            event = events_rx.recv() => {
                match event {
                    Some(e) => handler.handle_event(e),
                    None => break, // feed closed
                }
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    info!("Wardrobe client shut down.");
}

/// In-process stand-in for the host transport: plays a short scripted
/// session so the pipeline can be observed end to end without a server.
fn spawn_loopback_feed(tx: mpsc::Sender<TransportEvent>, outfit_channel: String) {
    tokio::spawn(async move {
        let conn = ConnectionId(rand::random());
        info!(%conn, "loopback session starting");

        let _ = tx.send(TransportEvent::SessionConnected { conn }).await;

        let equip = OutfitUpdatesPayload::new(vec![
            OutfitUpdate::equip(42, CosmeticSlot::Hat, "cowboy_hat"),
            OutfitUpdate::equip(42, CosmeticSlot::Cape, "red_cape"),
        ]);
        let _ = tx
            .send(TransportEvent::Frame {
                conn,
                channel: outfit_channel.clone(),
                payload: equip.encode_frame(),
            })
            .await;

        // A frame we must leave to the host.
        let _ = tx
            .send(TransportEvent::Frame {
                conn,
                channel: "minecraft:brand".into(),
                payload: Bytes::from_static(b"vanilla"),
            })
            .await;

        // A truncated frame the shim must swallow.
        let _ = tx
            .send(TransportEvent::Frame {
                conn,
                channel: outfit_channel.clone(),
                payload: Bytes::from_static(&[0x05]),
            })
            .await;

        tokio::time::sleep(Duration::from_millis(100)).await;

        let clear = OutfitUpdatesPayload::new(vec![OutfitUpdate::clear(42, CosmeticSlot::Hat)]);
        let _ = tx
            .send(TransportEvent::Frame {
                conn,
                channel: outfit_channel,
                payload: clear.encode_frame(),
            })
            .await;

        let _ = tx.send(TransportEvent::SessionDisconnected { conn }).await;
        info!(%conn, "loopback session finished");
    });
}
