//! The recommendation pipeline.
//!
//! One request is one sequential pass: assemble candidates → build prompt →
//! one bounded model call → parse → reconcile. Every model-side failure
//! degrades to default annotations; only an empty candidate pool ends a
//! request early. The pipeline holds no per-request state and is safe to
//! share across concurrent requests.

use std::sync::Arc;
use std::time::Duration;

use techtide_core::article::Article;
use techtide_core::llm::{ChatClient, ChatRequest};
use techtide_core::profile::UserProfile;
use techtide_core::store::ArticleStore;
use techtide_core::RecommendationItem;
use tracing::{debug, info, warn};

use crate::assemble::assemble;
use crate::outcome::{DegradeReason, LlmOutcome, NO_CANDIDATES};
use crate::parse::parse_annotations;
use crate::prompt::{build_highlights_prompt, build_prompt, HIGHLIGHTS_PERSONA, SYSTEM_PERSONA};
use crate::reconcile::reconcile;

/// Highlights fallback when the article pool is empty.
pub const EMPTY_POOL_HIGHLIGHTS: &str =
    "The article pool is empty — run the crawler to gather today's tech news.";

/// Highlights fallback when the model cannot be consulted.
pub const UNAVAILABLE_HIGHLIGHTS: &str =
    "Today's highlights are taking a break — browse the latest articles below.";

/// Tunables for one `Recommender`.
#[derive(Debug, Clone)]
pub struct RecommendSettings {
    /// Default candidate/item count per request
    pub limit: usize,

    /// Article pool size for the daily highlights teaser
    pub highlight_limit: usize,

    /// Sampling temperature for model calls
    pub temperature: f32,

    /// Token cap for model calls
    pub max_tokens: u32,

    /// Upper bound on any single model call
    pub llm_timeout: Duration,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            limit: 9,
            highlight_limit: 10,
            temperature: 0.2,
            max_tokens: 800,
            llm_timeout: Duration::from_secs(30),
        }
    }
}

/// The result of one recommendation request.
#[derive(Debug, Clone)]
pub struct Recommendation {
    /// One item per assembled candidate, in candidate order
    pub items: Vec<RecommendationItem>,

    /// Present iff a degraded path was taken
    pub diagnostic: Option<String>,
}

/// The recommendation pipeline.
pub struct Recommender {
    store: Arc<dyn ArticleStore>,
    llm: Option<Arc<dyn ChatClient>>,
    settings: RecommendSettings,
}

impl Recommender {
    /// Create a pipeline over a store and an optional chat client.
    ///
    /// `None` for the client means the model is not configured; every
    /// request then takes the default-annotation path with no network I/O.
    pub fn new(store: Arc<dyn ArticleStore>, llm: Option<Arc<dyn ChatClient>>) -> Self {
        Self {
            store,
            llm,
            settings: RecommendSettings::default(),
        }
    }

    /// Override the default settings.
    pub fn with_settings(mut self, settings: RecommendSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Recommend articles for `profile`, at most `limit` of them.
    ///
    /// Never fails: the worst outcomes are an empty list (empty pool) or a
    /// fully default-annotated list, each with one explanatory diagnostic.
    pub async fn recommend(&self, profile: &UserProfile, limit: usize) -> Recommendation {
        let candidates = assemble(self.store.as_ref(), &profile.interests, limit).await;
        if candidates.is_empty() {
            info!("no candidates available; returning empty recommendation");
            return Recommendation {
                items: Vec::new(),
                diagnostic: Some(NO_CANDIDATES.to_string()),
            };
        }

        let outcome = self.consult_model(&candidates, &profile.interests).await;
        let (annotations, diagnostic) = match outcome {
            LlmOutcome::Annotated(annotations) => {
                debug!(count = annotations.len(), "reconciling model annotations");
                (annotations, None)
            }
            LlmOutcome::Degraded(reason) => {
                debug!(reason = ?reason, "assembling with default annotations");
                (Vec::new(), Some(reason.diagnostic().to_string()))
            }
        };

        let items = reconcile(&candidates, &annotations, &profile.interests);
        Recommendation { items, diagnostic }
    }

    /// Recommend with the configured default limit.
    pub async fn recommend_default(&self, profile: &UserProfile) -> Recommendation {
        self.recommend(profile, self.settings.limit).await
    }

    /// A short free-text teaser over the most recent articles.
    ///
    /// On any failure one of two fixed sentences is returned: one for an
    /// empty pool, one for an unreachable or unusable model.
    pub async fn daily_highlights(&self) -> String {
        let pool = match self.store.find_recent(self.settings.highlight_limit).await {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, "highlights pool read failed");
                Vec::new()
            }
        };
        if pool.is_empty() {
            return EMPTY_POOL_HIGHLIGHTS.to_string();
        }

        let Some(client) = &self.llm else {
            return UNAVAILABLE_HIGHLIGHTS.to_string();
        };

        let request = ChatRequest {
            system: HIGHLIGHTS_PERSONA.into(),
            user: build_highlights_prompt(&pool),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        match tokio::time::timeout(self.settings.llm_timeout, client.complete(request)).await {
            Ok(Ok(reply)) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(Ok(_)) => UNAVAILABLE_HIGHLIGHTS.to_string(),
            Ok(Err(e)) => {
                warn!(error = %e, "highlights call failed");
                UNAVAILABLE_HIGHLIGHTS.to_string()
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.settings.llm_timeout.as_secs(),
                    "highlights call timed out"
                );
                UNAVAILABLE_HIGHLIGHTS.to_string()
            }
        }
    }

    /// One bounded annotation call, folded into a tagged outcome.
    async fn consult_model(&self, candidates: &[Article], interests: &[String]) -> LlmOutcome {
        let Some(client) = &self.llm else {
            return LlmOutcome::Degraded(DegradeReason::NotConfigured);
        };

        let request = ChatRequest {
            system: SYSTEM_PERSONA.into(),
            user: build_prompt(candidates, interests),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let reply = match tokio::time::timeout(self.settings.llm_timeout, client.complete(request))
            .await
        {
            Err(_) => {
                warn!(
                    timeout_secs = self.settings.llm_timeout.as_secs(),
                    "annotation call timed out"
                );
                return LlmOutcome::Degraded(DegradeReason::CallFailed);
            }
            Ok(Err(e)) => {
                warn!(error = %e, "annotation call failed");
                return LlmOutcome::Degraded(DegradeReason::CallFailed);
            }
            Ok(Ok(reply)) => reply,
        };

        if reply.trim().is_empty() {
            return LlmOutcome::Degraded(DegradeReason::EmptyResponse);
        }

        let annotations = parse_annotations(&reply, candidates.len());
        if annotations.is_empty() {
            LlmOutcome::Degraded(DegradeReason::ParseFailed)
        } else {
            LlmOutcome::Annotated(annotations)
        }
    }
}
