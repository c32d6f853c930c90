//! Durable snapshots of an in-progress session.
//!
//! A [`KeyValueStore`] holds raw strings; [`SnapshotGateway`] turns a
//! [`SessionSnapshot`] into a versioned JSON document and back. Reads are
//! forgiving: a missing, unreadable or unparseable document is reported as
//! "no snapshot" rather than an error.

pub use self::{
    gateway::{GatewayError, SnapshotGateway},
    snapshot::{SNAPSHOT_VERSION, SessionSnapshot, SnapshotDtoError},
    store::{FileStore, KeyValueStore, MemoryStore, StoreError},
};

mod gateway;
mod snapshot;
mod store;
