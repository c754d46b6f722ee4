use std::future::Future;

use crate::domain::{
    avoid_list::{entities::AvoidList, value_objects::ProfileSelection},
    common::entities::CoreError,
};

/// Remote avoid-list service client.
#[cfg_attr(test, mockall::automock)]
pub trait AvoidListClient: Send + Sync {
    /// Request a personalized avoid-list for the given profile selection.
    /// One attempt per call; no retries.
    fn fetch_avoid_list(
        &self,
        selection: ProfileSelection,
        user_id: &str,
    ) -> impl Future<Output = Result<AvoidList, CoreError>> + Send;
}
