//! # tabgroup LLM
//!
//! LLM integration for tabgroup.
//!
//! Optional backends that plug into the capability ports of
//! `tabgroup-core`: [`LlmThemeNamer`] names clusters and
//! [`LlmTextAnalyzer`] feeds entities into the embedding pipeline.
//!
//! ## Features
//!
//! - `api`: Cloud API backend (Claude)
//! - `local`: Local backend (Ollama)
//! - `full`: All backends
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tabgroup_llm::{LlmThemeNamer, OllamaBackend};
//!
//! let namer = LlmThemeNamer::new(OllamaBackend::localhost()?);
//! let theme = namer.name_cluster(&titles).await?;
//! ```

mod adapters;
mod backend;
mod prompt;

pub use adapters::{LlmTextAnalyzer, LlmThemeNamer};
pub use backend::{LlmBackend, LlmConfig, LlmError, LlmResult, MockBackend};
pub use prompt::{clean_theme, parse_entities_json, EntityPrompt, PromptTemplate, ThemePrompt};

#[cfg(any(feature = "local", feature = "api"))]
mod http;

#[cfg(feature = "local")]
mod ollama;
#[cfg(feature = "local")]
pub use ollama::OllamaBackend;

#[cfg(feature = "api")]
mod claude;
#[cfg(feature = "api")]
pub use claude::ClaudeBackend;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{LlmBackend, LlmConfig, LlmError, LlmResult, MockBackend};
    pub use crate::{LlmTextAnalyzer, LlmThemeNamer};

    #[cfg(feature = "local")]
    pub use crate::OllamaBackend;

    #[cfg(feature = "api")]
    pub use crate::ClaudeBackend;
}
