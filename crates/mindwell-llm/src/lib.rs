//! mindwell-llm
//!
//! The language-model capability boundary and the conversation orchestrator.
//! The provider is reached through the narrow [`provider::SupportModel`]
//! trait; the orchestrator enforces the default-on-failure contract so a
//! provider outage never blocks a reply.

pub mod bedrock;
pub mod error;
pub mod orchestrator;
pub mod prompts;
pub mod provider;
