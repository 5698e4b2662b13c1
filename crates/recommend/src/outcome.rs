//! Degraded-path taxonomy and the diagnostics the caller sees.
//!
//! The pipeline never raises on a model failure — it tags the request with
//! one of these reasons and assembles with defaults instead.

use crate::parse::Annotation;

/// Diagnostic for the short-circuit when assembly found nothing.
pub const NO_CANDIDATES: &str = "no candidates available";

/// Why the model's output could not be used for this request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeReason {
    /// No usable credential; the call was never attempted
    NotConfigured,
    /// Transport, API, or timeout failure
    CallFailed,
    /// The call succeeded but the body was blank
    EmptyResponse,
    /// The body did not yield a single valid annotation
    ParseFailed,
}

impl DegradeReason {
    /// The fixed diagnostic string reported for this path.
    pub fn diagnostic(&self) -> &'static str {
        match self {
            DegradeReason::NotConfigured => "LLM not configured",
            DegradeReason::CallFailed => "LLM call failed",
            DegradeReason::EmptyResponse => "LLM returned empty content",
            DegradeReason::ParseFailed => "LLM response parse failed",
        }
    }
}

/// The outcome of consulting the model for one request.
#[derive(Debug, Clone)]
pub enum LlmOutcome {
    /// At least one valid annotation to reconcile
    Annotated(Vec<Annotation>),
    /// Assemble with defaults, carrying the reason's diagnostic
    Degraded(DegradeReason),
}
