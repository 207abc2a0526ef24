//! Generic mutation gateway.
//!
//! One write path for every entity table. Each mutation runs under a
//! deadline and a cancellation token, tags failures with the table it was
//! touching, and on success invalidates the cached reads of that table and
//! of every table whose derived views depend on it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use matchday_cache::TagCache;

use crate::backend::TableBackend;
use crate::error::{BackendResult, DataError, MutationOp, Result};
use crate::schema::EntityRecord;

const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Acknowledgement of a completed delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deleted {
    pub id: Uuid,
}

pub struct MutationGateway {
    backend: Arc<dyn TableBackend>,
    cache: Arc<TagCache>,
    deadline: Duration,
    cancel: CancellationToken,
}

impl MutationGateway {
    pub fn new(backend: Arc<dyn TableBackend>, cache: Arc<TagCache>) -> Self {
        Self {
            backend,
            cache,
            deadline: DEFAULT_DEADLINE,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Tie the gateway's mutations to an external cancellation token, e.g.
    /// the one owning the admin screen the form lives on.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub async fn create<E: EntityRecord>(&self, draft: &E::Draft) -> Result<E> {
        let row = serde_json::to_value(draft)?;
        let stored = self
            .run::<E, _>(MutationOp::Create, self.backend.insert(E::TABLE, row))
            .await?;
        self.invalidate_for::<E>().await;
        Ok(serde_json::from_value(stored)?)
    }

    pub async fn update<E: EntityRecord>(&self, id: Uuid, patch: &E::Patch) -> Result<E> {
        let fields = serde_json::to_value(patch)?;
        let stored = self
            .run::<E, _>(
                MutationOp::Update,
                self.backend.update_by_id(E::TABLE, &id.to_string(), fields),
            )
            .await?;
        self.invalidate_for::<E>().await;
        Ok(serde_json::from_value(stored)?)
    }

    pub async fn remove<E: EntityRecord>(&self, id: Uuid) -> Result<Deleted> {
        self.run::<E, _>(
            MutationOp::Delete,
            self.backend.delete_by_id(E::TABLE, &id.to_string()),
        )
        .await?;
        self.invalidate_for::<E>().await;
        Ok(Deleted { id })
    }

    async fn run<E, T>(
        &self,
        op: MutationOp,
        fut: impl Future<Output = BackendResult<T>>,
    ) -> Result<T>
    where
        E: EntityRecord,
    {
        tokio::select! {
            _ = self.cancel.cancelled() => Err(DataError::Cancelled { table: E::TABLE }),
            outcome = tokio::time::timeout(self.deadline, fut) => match outcome {
                Err(_) => Err(DataError::Timeout {
                    table: E::TABLE,
                    after: self.deadline,
                }),
                Ok(Err(source)) => Err(DataError::Mutation {
                    table: E::TABLE,
                    op,
                    source,
                }),
                Ok(Ok(value)) => Ok(value),
            },
        }
    }

    /// The mutated table always drops from cache; dependent tables follow
    /// from the entity's declaration, never from per-callsite knowledge.
    async fn invalidate_for<E: EntityRecord>(&self) {
        debug!(table = E::TABLE, dependents = ?E::DEPENDENTS, "invalidating after mutation");
        self.invalidate_key(E::TABLE).await;
        for dependent in E::DEPENDENTS {
            self.invalidate_key(dependent).await;
        }
    }

    // The write already landed; a stale-cache eviction failure must not
    // surface as a mutation failure.
    async fn invalidate_key(&self, key: &str) {
        if let Err(err) = self.cache.invalidate(key).await {
            warn!(key, error = %err, "cache invalidation failed");
        }
    }
}
