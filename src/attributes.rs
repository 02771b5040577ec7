//! Per-render attributes of the `<img>` element and its wrapper.

use crate::types::{FetchPriority, ImageDecoding, LazyLoading};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attributes that vary per rendered picture rather than per profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PictureAttributes {
    /// `alt` attribute; also used as the figcaption text.
    pub img_alt: String,
    pub img_class: Option<String>,
    /// Defaults to `async`.
    pub img_decoding: ImageDecoding,
    /// Defaults to no attribute.
    pub img_fetch_priority: FetchPriority,
    /// Defaults to browser-native lazy loading.
    pub lazy_loading: LazyLoading,
    /// Render `width`/`height` from the fallback width and the profile's
    /// height constraint.
    pub render_img_width_height: bool,
    /// Extra attributes (`itemprop`, `data-*`, `style`) rendered on the
    /// `<img>` element in insertion order. A `width` entry replaces the
    /// computed width and height attributes.
    pub img_additional_attributes: IndexMap<String, String>,
    /// Class of the `<picture>`, or of the `<figure>` when the profile
    /// wraps pictures in figures.
    pub wrap_class: Option<String>,
}

impl PictureAttributes {
    pub fn with_alt(alt: impl Into<String>) -> Self {
        Self {
            img_alt: alt.into(),
            ..Self::default()
        }
    }

    /// Add an extra `<img>` attribute, replacing any earlier value.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.img_additional_attributes
            .insert(name.into(), value.into());
        self
    }
}

/// Whether `name` can be written as an HTML attribute name without
/// changing the surrounding markup.
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '"' | '\'' | '=' | '<' | '>' | '/' | '`')
        })
}
