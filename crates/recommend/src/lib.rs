//! # techtide Recommend
//!
//! Candidate assembly and the LLM-augmented ranking pipeline.
//!
//! The flow for one request:
//!
//! ```text
//! store → matcher / interleave → assemble → prompt → ChatClient
//!       → parse → reconcile → (items, diagnostic)
//! ```
//!
//! Everything after assembly is pure; the only I/O is the store reads and
//! one bounded chat-completion call. Every model-side failure degrades to a
//! default-annotated result — callers never see an error, only an optional
//! diagnostic string.

pub mod assemble;
pub mod interleave;
pub mod matcher;
pub mod outcome;
pub mod parse;
pub mod pipeline;
pub mod prompt;
pub mod reconcile;

pub use outcome::{DegradeReason, LlmOutcome, NO_CANDIDATES};
pub use parse::Annotation;
pub use pipeline::{
    Recommendation, RecommendSettings, Recommender, EMPTY_POOL_HIGHLIGHTS,
    UNAVAILABLE_HIGHLIGHTS,
};
pub use prompt::HOT_PICK;
