use super::{KeyValueStore, SessionSnapshot, StoreError, snapshot::SessionSnapshotDto};
use crate::puzzle::PuzzleId;

/// Reads and writes the session snapshot under a fixed key.
///
/// # Examples
///
/// ```
/// use skrambol_app::{
///     persistence::{MemoryStore, SessionSnapshot, SnapshotGateway},
///     puzzle::PuzzleId,
/// };
/// use skrambol_core::Position;
///
/// let mut gateway = SnapshotGateway::new(MemoryStore::default(), "session");
/// let snapshot = SessionSnapshot {
///     puzzle_id: PuzzleId::new("a"),
///     positions: vec![Position::new(2), Position::new(1)],
///     elapsed_ms: 1_234,
///     completion_percentage: 0,
///     is_finished: false,
///     difficulty: None,
/// };
///
/// gateway.save(&snapshot).unwrap();
/// assert_eq!(gateway.load(), Some(snapshot.clone()));
/// assert_eq!(gateway.load_for(&PuzzleId::new("b")), None);
///
/// gateway.clear().unwrap();
/// assert_eq!(gateway.load(), None);
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotGateway<S> {
    store: S,
    key: String,
}

impl<S> SnapshotGateway<S> {
    /// Creates a gateway writing under `key`.
    #[must_use]
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Returns the storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the underlying store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the gateway and returns the underlying store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S> SnapshotGateway<S>
where
    S: KeyValueStore,
{
    /// Serializes `snapshot` and overwrites the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`] if the snapshot has no
    /// puzzle id or no positions; nothing is written in that case. Storage
    /// and encoding failures are returned as is.
    pub fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), GatewayError> {
        if snapshot.puzzle_id.is_empty() {
            return Err(GatewayError::InvalidArgument {
                reason: "snapshot has no puzzle id",
            });
        }
        if snapshot.positions.is_empty() {
            return Err(GatewayError::InvalidArgument {
                reason: "snapshot has no positions",
            });
        }
        let json = serde_json::to_string(&SessionSnapshotDto::from(snapshot))?;
        self.store.set(&self.key, &json)?;
        log::debug!(
            "saved snapshot for puzzle {} ({} ms, finished={})",
            snapshot.puzzle_id,
            snapshot.elapsed_ms,
            snapshot.is_finished
        );
        Ok(())
    }

    /// Reads the stored snapshot.
    ///
    /// Returns `None` when nothing is stored, or when the stored value cannot
    /// be read, parsed or accepted; those faults are logged.
    #[must_use]
    pub fn load(&self) -> Option<SessionSnapshot> {
        let json = match self.store.get(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("snapshot read failed, ignoring: {err}");
                return None;
            }
        };
        let dto = match serde_json::from_str::<SessionSnapshotDto>(&json) {
            Ok(dto) => dto,
            Err(err) => {
                log::warn!("stored snapshot is not valid JSON, ignoring: {err}");
                return None;
            }
        };
        match SessionSnapshot::try_from(dto) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                log::warn!("stored snapshot rejected, ignoring: {err}");
                None
            }
        }
    }

    /// Reads the stored snapshot if it belongs to `puzzle_id`.
    #[must_use]
    pub fn load_for(&self, puzzle_id: &PuzzleId) -> Option<SessionSnapshot> {
        let snapshot = self.load()?;
        if snapshot.puzzle_id != *puzzle_id {
            log::debug!(
                "stored snapshot is for puzzle {}, not {puzzle_id}; ignoring",
                snapshot.puzzle_id
            );
            return None;
        }
        Some(snapshot)
    }

    /// Removes the stored snapshot. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&mut self) -> Result<(), GatewayError> {
        self.store.remove(&self.key)?;
        log::debug!("cleared snapshot");
        Ok(())
    }
}

/// Errors from [`SnapshotGateway`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GatewayError {
    /// The caller passed a snapshot that must not be stored.
    #[display("invalid snapshot: {reason}")]
    #[from(ignore)]
    InvalidArgument {
        /// What was wrong with it.
        reason: &'static str,
    },
    /// The store failed.
    #[display("{_0}")]
    Store(StoreError),
    /// The snapshot could not be encoded.
    #[display("snapshot encoding failed: {_0}")]
    Encode(serde_json::Error),
}
