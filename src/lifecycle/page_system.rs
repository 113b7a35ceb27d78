use tracing::{error, info};

use crate::clients::PageClient;
use crate::config::EditorConfig;

/// Runtime orchestrator for the page store.
///
/// `PageSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the page actor
/// - **Configuration**: Sizing the store's request channel from [`EditorConfig`]
///
/// # Example
///
/// ```ignore
/// let system = PageSystem::new();
///
/// let page = system.pages.create(page_create).await?;
/// let server = LoopbackServer::new(system.pages.clone(), "dev-token");
///
/// // Drop every other clone of the client before shutting down
/// drop(server);
/// system.shutdown().await?;
/// ```
pub struct PageSystem {
    /// Client for the Page actor
    pub pages: PageClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for PageSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSystem {
    /// Starts the page store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    /// Starts the page store. Must be called inside a Tokio runtime.
    pub fn with_config(config: &EditorConfig) -> Self {
        let (page_actor, page_client) = crate::page_actor::new(config.store_buffer.max(1));
        let page_handle = tokio::spawn(page_actor.run());

        info!(buffer = config.store_buffer, "Page system started");
        Self {
            pages: PageClient::new(page_client),
            handles: vec![page_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the client closes the actor's channel once no other clone
    /// remains; the actor then drains its queue and exits. Clones held
    /// elsewhere (e.g. by a [`LoopbackServer`](crate::api::LoopbackServer))
    /// must be dropped first, or this waits for them.
    ///
    /// Returns `Err` if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.pages);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
