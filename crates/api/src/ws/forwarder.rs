use std::sync::Arc;

use tokio::sync::broadcast;
use wedplan_events::ChangeBus;

use crate::ws::manager::WsManager;
use crate::ws::protocol::ServerFrame;

/// Relay every change on the bus to the connections subscribed to its wedding.
///
/// A lagging receiver has lost events; every subscribed wedding gets a
/// `resync` frame so clients reload instead of drifting.
pub fn start_change_forwarder(
    change_bus: Arc<ChangeBus>,
    ws_manager: Arc<WsManager>,
) -> tokio::task::JoinHandle<()> {
    let mut receiver = change_bus.subscribe();
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let wedding_id = event.wedding_id;
                    let sent = ws_manager
                        .send_to_wedding(wedding_id, ServerFrame::Change { event }.to_message())
                        .await;
                    tracing::trace!(wedding_id, sent, "Change relayed");
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Change forwarder lagged, requesting resync");
                    for wedding_id in ws_manager.subscribed_weddings().await {
                        ws_manager
                            .send_to_wedding(
                                wedding_id,
                                ServerFrame::Resync { wedding_id }.to_message(),
                            )
                            .await;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Change bus closed, forwarder exiting");
                    break;
                }
            }
        }
    })
}
