use std::future::Future;

use bytes::Bytes;

use crate::domain::{
    analysis::entities::{ImageFormat, ScanInput, ScanVerdict, Verdict},
    common::entities::CoreError,
    profile::entities::UserProfile,
};

/// Image submission for the remote analysis endpoint. The container format
/// is sniffed from magic bytes before upload; encoding happens at the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub format: ImageFormat,
    pub data: Bytes,
}

/// Remote ingredient-analysis service client.
#[cfg_attr(test, mockall::automock)]
pub trait AnalysisClient: Send + Sync {
    /// Submit normalized ingredient text for analysis.
    fn analyze_text(
        &self,
        text: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<Verdict, CoreError>> + Send;

    /// Submit a label photo for analysis, used only when text recognition
    /// produced no text.
    fn analyze_image(
        &self,
        payload: ImagePayload,
        user_id: &str,
    ) -> impl Future<Output = Result<Verdict, CoreError>> + Send;
}

/// Entry point for one scan.
pub trait AnalysisService: Send + Sync {
    /// Run the full decision tree for one scan: remote analysis first, the
    /// cached avoid-list only on connectivity loss.
    fn analyze(
        &self,
        input: ScanInput,
        profile: &UserProfile,
    ) -> impl Future<Output = Result<ScanVerdict, CoreError>> + Send;

    /// Offline lexicon scorer, for callers that explicitly want a verdict
    /// with no personalized or remote data.
    fn analyze_heuristic(&self, text: &str, profile: Option<&UserProfile>) -> ScanVerdict;
}
