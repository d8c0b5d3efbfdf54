//! Gemini code-generation client.
//!
//! Wraps the Gemini `generateContent` REST endpoint behind the
//! [`CodeGenerator`] trait so the request pipeline can be exercised with a
//! scripted fake in tests.

pub mod client;

pub use client::{CodeGenerator, GeminiClient, GeminiConfig, GeminiError};
