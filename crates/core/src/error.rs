/// Domain-level errors for the Animagen core crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The generated script contains no top-level class declaration, so
    /// there is no scene for the renderer to target.
    #[error("could not find a class definition in the generated script")]
    NoSceneClass,
}
