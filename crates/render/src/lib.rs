//! Manim script runner.
//!
//! Turns a generated script body into a rendered video file by shelling out
//! to the external `manim` CLI. The temp script is removed on every exit
//! path, success or failure.

pub mod runner;

pub use runner::{RenderConfig, RenderError, ScriptRunner};
