//! Scene-class discovery in generated Manim scripts.
//!
//! The renderer needs the name of the scene class to target. Rather than
//! splitting the script on the literal `class ` token, this scans for
//! top-level (column-zero) class declarations and validates the name is a
//! well-formed Python identifier.

use crate::error::CoreError;

/// Find the first top-level class declaration in a Python script and return
/// its name.
///
/// A declaration counts only when the `class` keyword starts at column zero,
/// so indented helper classes and the word "class" inside strings or
/// comments on indented lines are not picked up.
///
/// # Errors
///
/// Returns [`CoreError::NoSceneClass`] when no top-level declaration exists.
pub fn find_scene_class(code: &str) -> Result<String, CoreError> {
    code.lines()
        .filter_map(parse_class_declaration)
        .next()
        .ok_or(CoreError::NoSceneClass)
}

/// Parse a single line as a top-level `class Name(...)` / `class Name:`
/// declaration, returning the class name if it is one.
fn parse_class_declaration(line: &str) -> Option<String> {
    let rest = line.strip_prefix("class")?;

    // Require whitespace after the keyword so e.g. `classify()` is skipped.
    let rest = rest.strip_prefix(|c: char| c.is_whitespace())?;
    let rest = rest.trim_start();

    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    if name.is_empty() || name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }

    // The declaration must continue with a base list, a colon, or nothing
    // but trailing whitespace before the colon on a later line is invalid
    // Python anyway; accept `(` and `:` only.
    match rest[name.len()..].trim_start().chars().next() {
        Some('(') | Some(':') => Some(name),
        _ => None,
    }
}
