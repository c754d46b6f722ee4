use std::future::Future;

use crate::domain::common::entities::CoreError;

/// Port for the injected key/value persistence collaborator.
///
/// Single-key reads and writes are atomic from the caller's perspective;
/// concurrent writers are last-writer-wins with no merge.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw bytes stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>, CoreError>> + Send;

    /// Store `value` under `key`, replacing any prior value wholesale.
    fn set(&self, key: &str, value: Vec<u8>) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Remove the value stored under `key`, if any.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}
