//! # techtide Core
//!
//! Domain types, traits, and error definitions for the techtide
//! recommendation service. This crate has **zero framework dependencies** —
//! it defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is defined as a trait here. Implementations
//! live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod article;
pub mod error;
pub mod llm;
pub mod profile;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use article::{ActionLog, Article, RecommendationItem, Source};
pub use error::{Error, LlmError, Result, StoreError};
pub use llm::{ChatClient, ChatRequest};
pub use profile::UserProfile;
pub use store::{ArticleStore, UserStore};
