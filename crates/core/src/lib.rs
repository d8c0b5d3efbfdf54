//! Domain logic shared across the Animagen service.
//!
//! Everything in this crate is pure: prompt templating, code extraction from
//! model replies, scene-class discovery, and the rendered-output path
//! convention. No I/O, no clients — those live in the `animagen-gemini`,
//! `animagen-render`, and `animagen-storage` crates.

pub mod error;
pub mod naming;
pub mod prompt;
pub mod scene;

pub use error::CoreError;
