//! Thread Translator - conversational translation service.
//!
//! Translates user text into a target language through an OpenAI-compatible
//! model, keeps a bounded per-thread history in a shared state store, and
//! grades every translation with background evals.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
