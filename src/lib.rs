//! # Picture Renderer
//!
//! Renders responsive `<picture>` elements for images served through an
//! image CDN. A [`PictureProfile`] describes one layout slot (which widths
//! go into the `srcset`, what the `sizes` attribute says, how tall each
//! variant is) and which CDN builds the transformation URLs.
//!
//! ```
//! use picture_renderer::{PictureAttributes, PictureProfile, render};
//!
//! let profile = PictureProfile {
//!     srcset_widths: vec![150, 300],
//!     sizes: vec!["150px".to_string()],
//!     aspect_ratio: Some(1.0),
//!     ..PictureProfile::cloudflare()
//! };
//! let html = render("/dog.jpg", &profile, &PictureAttributes::with_alt("A dog"), None)
//!     .unwrap()
//!     .into_string();
//! assert!(html.starts_with(
//!     r#"<picture><source srcset="/cdn-cgi/image/width=150,format=auto,fit=crop,height=150/dog.jpg 150w"#
//! ));
//! ```
//!
//! # Architecture: Data, Then Markup
//!
//! ```text
//! 1. Source      "/img.jpg?x=1"      →  ImageSource     (domain, path, query, format)
//! 2. Urls        source + profile    →  PictureData     (srcset, webp srcset, fallback)
//! 3. Markup      data + attributes   →  maud::Markup    (<picture> element)
//! ```
//!
//! Every stage is a pure function, so the same inputs always render the
//! same bytes. The only exception is the info overlay id, which is random.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`source`] | Parses absolute and relative image references |
//! | [`profile`] | Per-CDN profile type, validation, height and fallback rules |
//! | [`attributes`] | Per-render `<img>` attributes (alt, class, loading, extra attributes) |
//! | [`url_builders`] | ImageSharp, Cloudflare and Storyblok url construction |
//! | [`picture_data`] | Srcsets and fallback urls, single and multi-image |
//! | [`render`] | Byte-stable `<picture>` markup |
//! | [`config`] | `profiles.toml` loading, `[defaults]` merging and validation |
//! | [`types`] | Small shared enums and the focal point |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Markup As Strings, Returned As Maud
//!
//! The markup is assembled with explicit attribute order and spacing so
//! existing pages can be compared byte for byte. User text (alt, classes,
//! attribute values) is escaped through Maud, and the result is a
//! [`maud::Markup`] so it splices into Maud templates without being escaped
//! twice.
//!
//! ## One Profile Type, CDN As Data
//!
//! The CDN is an enum inside the profile rather than a profile subtype.
//! CDN-only settings (`create_webp_for_format`, `disabled`) live on the
//! variant that uses them, so an impossible combination cannot be built.
//!
//! ## Profiles From Config
//!
//! Profiles can be built in code or loaded by name from TOML. The file's
//! `[defaults]` table is deep-merged under every profile, the way sparse
//! config overlays are merged elsewhere.

pub mod attributes;
pub mod config;
pub mod error;
pub mod output;
pub mod picture_data;
pub mod profile;
pub mod render;
pub mod source;
pub mod types;
pub mod url_builders;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use attributes::{PictureAttributes, is_valid_attribute_name};
pub use error::PictureError;
pub use picture_data::{
    MediaImage, MediaImagesPictureData, PictureData, multi_image_picture_data, picture_data,
};
pub use profile::{
    Cdn, DEFAULT_IMAGESHARP_QUALITY, MediaCondition, PictureProfile,
    convert_storyblok_focal_point,
};
pub use render::{render, render_multi, render_picture_data};
pub use source::ImageSource;
pub use types::{FetchPriority, FocalPoint, ImageDecoding, ImageFormat, LazyLoading};
pub use url_builders::build_image_url;
