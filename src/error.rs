use thiserror::Error;

/// Errors raised while turning an image reference and a profile into markup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PictureError {
    #[error("image path is empty")]
    EmptyImagePath,
    #[error("image url '{0}' is not well formatted")]
    InvalidImagePath(String),
    #[error("no image paths given")]
    NoImages,
    #[error("invalid picture profile: {0}")]
    InvalidProfile(String),
    #[error("media conditions must be defined in the picture profile when rendering multiple images")]
    MissingMediaConditions,
    #[error("invalid Storyblok focal point '{0}', expected [left]x[top]:[right]x[bottom]")]
    InvalidFocalPoint(String),
}
