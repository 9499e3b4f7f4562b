use anyhow::Result;
use barstr::{EventHandler, Outcome};
use nostr_sdk::RelayPoolNotification;
use std::future::Future;
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tracing::{debug, info, warn};

/// Feeds relay events through `handler` one at a time until `shutdown`
/// resolves or the relay pool goes away.
pub async fn listen<F>(
    mut notifications: Receiver<RelayPoolNotification>,
    handler: &EventHandler,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Stopping listener");
                break;
            }
            notification = notifications.recv() => match notification {
                Ok(RelayPoolNotification::Event { relay_url, event, .. }) => {
                    let outcome = handler.handle(&event).await;
                    if let Outcome::Ignored(reason) = outcome {
                        debug!(relay = %relay_url, event_id = %event.id, ?reason, "Event ignored");
                    }
                }
                Ok(RelayPoolNotification::Shutdown) => {
                    info!("Relay pool shut down");
                    break;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Notification stream lagged, events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    Ok(())
}
