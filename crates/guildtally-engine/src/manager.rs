//! The counter manager: construction, startup, and the event listener.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};
use tracing::{info, warn};

use guildtally_core::GuildId;
use guildtally_platform::{MemberEvent, PlatformClient};
use guildtally_storage::CounterStore;

use crate::cache::CounterCache;
use crate::config::CounterConfig;
use crate::error::SyncError;

/// Owns per-guild counter state and keeps cache, store, and platform in sync.
///
/// One manager exists per process. Commands and reconciliation may be called
/// from any task; reconcile passes for the same guild serialize behind a
/// per-guild lock.
pub struct CounterManager {
    pub(crate) platform: Arc<dyn PlatformClient>,
    pub(crate) store: Arc<dyn CounterStore>,
    pub(crate) cache: CounterCache,
    pub(crate) config: CounterConfig,
    guild_locks: Mutex<HashMap<GuildId, Arc<Mutex<()>>>>,
}

impl CounterManager {
    /// Creates a manager. Backend setup (schema or file creation) has
    /// already happened when the store was constructed.
    #[must_use]
    pub fn new(
        platform: Arc<dyn PlatformClient>,
        store: Arc<dyn CounterStore>,
        config: CounterConfig,
    ) -> Self {
        Self {
            platform,
            store,
            cache: CounterCache::new(),
            config: config.normalized(),
            guild_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a manager wrapped in an `Arc` for sharing.
    #[must_use]
    pub fn new_shared(
        platform: Arc<dyn PlatformClient>,
        store: Arc<dyn CounterStore>,
        config: CounterConfig,
    ) -> Arc<Self> {
        Arc::new(Self::new(platform, store, config))
    }

    /// Starts the manager: fills the cache from the store, spawns the
    /// membership-event listener, then runs one best-effort reconcile pass
    /// per guild the platform knows.
    ///
    /// # Errors
    ///
    /// Returns an error when the startup cache fill fails; a failing
    /// platform guild list only skips the sync pass.
    pub async fn start(self: &Arc<Self>) -> Result<(), SyncError> {
        let records = self.store.list_all().await?;
        info!(
            guilds = records.len(),
            backend = self.store.backend_name(),
            "filled counter cache"
        );
        self.cache.fill(records).await;

        // Subscribe before the sync pass so no event between the two is lost.
        let events = self.platform.events();
        let listener = Arc::clone(self);
        tokio::spawn(async move { listener.listen(events).await });

        match self.platform.known_guilds().await {
            Ok(guild_ids) => {
                for guild_id in guild_ids {
                    if !self.cache.contains(&guild_id).await {
                        continue;
                    }
                    if let Err(error) = self.reconcile(&guild_id).await {
                        warn!(guild = %guild_id, %error, "startup reconcile failed");
                    }
                }
            }
            Err(error) => {
                warn!(%error, "guild list unavailable, skipping startup sync");
            }
        }

        Ok(())
    }

    /// Consumes the membership-event feed and reconciles affected guilds.
    ///
    /// Each notification spawns its own reconcile task; bursts for the same
    /// guild queue up behind the per-guild lock.
    async fn listen(self: Arc<Self>, mut events: broadcast::Receiver<MemberEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if !self.cache.contains(&event.guild_id).await {
                        continue;
                    }
                    let manager = Arc::clone(&self);
                    tokio::spawn(async move {
                        if let Err(error) = manager.reconcile(&event.guild_id).await {
                            warn!(
                                guild = %event.guild_id,
                                %error,
                                "event-triggered reconcile failed"
                            );
                        }
                    });
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "membership event stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    /// Lock serializing reconcile passes for one guild.
    pub(crate) async fn guild_lock(&self, guild_id: &GuildId) -> Arc<Mutex<()>> {
        let mut locks = self.guild_locks.lock().await;
        Arc::clone(locks.entry(guild_id.clone()).or_default())
    }

    pub(crate) async fn drop_guild_lock(&self, guild_id: &GuildId) {
        self.guild_locks.lock().await.remove(guild_id);
    }
}
