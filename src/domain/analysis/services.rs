use crate::domain::{
    analysis::{
        entities::{ImageFormat, ScanInput, ScanVerdict, Verdict},
        heuristics, matcher,
        normalize::{TokenSet, normalize},
        ports::{AnalysisClient, AnalysisService, ImagePayload},
    },
    avoid_list::services::OfflineCacheService,
    common::entities::CoreError,
    profile::entities::UserProfile,
    storage::ports::KeyValueStore,
};

/// Sequences one scan through the decision tree and owns the fallback
/// choice: remote analysis, then the cached avoid-list, but only when
/// connectivity itself is gone. Server and decoding errors surface
/// verbatim. Each call is a single pass; no retries.
#[derive(Debug, Clone)]
pub struct AnalysisOrchestrator<C, S> {
    client: C,
    cache: OfflineCacheService<S>,
}

impl<C, S> AnalysisOrchestrator<C, S>
where
    C: AnalysisClient,
    S: KeyValueStore,
{
    pub fn new(client: C, cache: OfflineCacheService<S>) -> Self {
        Self { client, cache }
    }

    async fn analyze_text(
        &self,
        text: &str,
        profile: &UserProfile,
    ) -> Result<ScanVerdict, CoreError> {
        let tokens = normalize(text);
        if tokens.is_empty() {
            return Err(CoreError::InvalidInput);
        }

        match self
            .client
            .analyze_text(tokens.joined(), &profile.full_name)
            .await
        {
            Ok(verdict) => Ok(ScanVerdict::new(verdict)),
            Err(CoreError::NoConnectivity) => {
                tracing::info!("no connectivity, trying cached avoid-list");
                self.analyze_offline(&tokens).await
            }
            Err(e) => {
                tracing::error!(error = %e, "text analysis failed");
                Err(e)
            }
        }
    }

    /// Offline text analysis against the cached avoid-list. A stale entry is
    /// still used here as last-resort; only an absent or empty cache fails.
    async fn analyze_offline(&self, tokens: &TokenSet) -> Result<ScanVerdict, CoreError> {
        let entry = match self.cache.get().await {
            Some(entry) if !entry.list.is_empty() => entry,
            _ => {
                tracing::warn!("no usable cached avoid-list for offline analysis");
                return Err(CoreError::NoConnectivity);
            }
        };

        let findings = matcher::match_avoid_list(tokens, &entry.list);
        let verdict = matcher::offline_verdict(&findings);
        Ok(ScanVerdict::new(Verdict::Remote(verdict)))
    }

    async fn analyze_image(
        &self,
        data: bytes::Bytes,
        profile: &UserProfile,
    ) -> Result<ScanVerdict, CoreError> {
        if data.is_empty() {
            return Err(CoreError::InvalidInput);
        }

        let payload = ImagePayload {
            format: ImageFormat::sniff(&data),
            data,
        };

        // No text to match offline, so connectivity loss surfaces directly.
        let verdict = self
            .client
            .analyze_image(payload, &profile.full_name)
            .await?;
        Ok(ScanVerdict::new(verdict))
    }
}

impl<C, S> AnalysisService for AnalysisOrchestrator<C, S>
where
    C: AnalysisClient,
    S: KeyValueStore,
{
    async fn analyze(
        &self,
        input: ScanInput,
        profile: &UserProfile,
    ) -> Result<ScanVerdict, CoreError> {
        match input {
            ScanInput::Text(text) => self.analyze_text(&text, profile).await,
            ScanInput::Image(data) => self.analyze_image(data, profile).await,
        }
    }

    fn analyze_heuristic(&self, text: &str, profile: Option<&UserProfile>) -> ScanVerdict {
        let tokens = normalize(text);
        ScanVerdict::new(Verdict::Local(heuristics::score(&tokens, profile)))
    }
}
