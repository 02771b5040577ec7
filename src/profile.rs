//! Picture profiles: the per-CDN configuration a picture is rendered with.
//!
//! A profile says which widths go into the `srcset`, what the `sizes`
//! attribute contains, how tall each variant is, and which CDN builds the
//! URLs. Profiles are usually defined once per layout slot (hero, card,
//! thumbnail) and reused for every image rendered in that slot.
//!
//! ```
//! use picture_renderer::{PictureProfile, Cdn};
//!
//! let card = PictureProfile {
//!     srcset_widths: vec![150, 300],
//!     sizes: vec!["150px".to_string()],
//!     aspect_ratio: Some(1.0),
//!     ..PictureProfile::image_sharp()
//! };
//! assert_eq!(card.fallback_width(), 300);
//! assert_eq!(card.image_height(150), 150);
//! assert!(matches!(card.cdn, Cdn::ImageSharp { .. }));
//! ```

use crate::error::PictureError;
use crate::types::{FocalPoint, ImageFormat};
use serde::{Deserialize, Serialize};

/// Quality applied by ImageSharp profiles unless overridden.
pub const DEFAULT_IMAGESHARP_QUALITY: u8 = 80;

/// The image service that builds the transformation URLs.
#[derive(Debug, Clone, PartialEq)]
pub enum Cdn {
    /// ImageSharp.Web style query strings (`?width=..&height=..&quality=..`).
    ImageSharp {
        /// Source formats that get an additional WebP `<source>`.
        create_webp_for_format: Vec<ImageFormat>,
    },
    /// Cloudflare image resizing (`/cdn-cgi/image/<options>/<url>`).
    Cloudflare {
        /// When set, the original image url is used unchanged.
        disabled: bool,
    },
    /// Storyblok image service (`<url>/m/<w>x<h>/filters:..`).
    Storyblok,
}

impl Cdn {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ImageSharp { .. } => "imagesharp",
            Self::Cloudflare { .. } => "cloudflare",
            Self::Storyblok => "storyblok",
        }
    }
}

/// A media query paired with the image width used when it matches.
///
/// Only used for multi-image pictures, where each media condition gets its
/// own `<source>` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MediaCondition {
    pub media: String,
    pub width: u32,
}

impl MediaCondition {
    pub fn new(media: impl Into<String>, width: u32) -> Self {
        Self {
            media: media.into(),
            width,
        }
    }
}

/// Everything needed to turn an image reference into a `<picture>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct PictureProfile {
    pub cdn: Cdn,
    /// Widths rendered into the `srcset` attribute.
    pub srcset_widths: Vec<u32>,
    /// Entries of the `sizes` attribute, joined with `", "`.
    pub sizes: Vec<String>,
    /// Width of the `<img>` fallback. Defaults to the largest srcset width.
    pub fallback_width: Option<u32>,
    pub quality: Option<u8>,
    /// Width divided by height. Takes precedence over `fixed_height`.
    pub aspect_ratio: Option<f64>,
    pub fixed_height: Option<u32>,
    /// Used when rendering different images for different viewports.
    pub media_conditions: Vec<MediaCondition>,
    /// Render an overlay showing which variant the browser selected.
    pub show_info: bool,
    pub use_figure_wrap: bool,
    /// Only meaningful with `use_figure_wrap`; the caption is the alt text.
    pub include_figcaption: bool,
}

impl PictureProfile {
    /// An empty profile for the given CDN, with that CDN's defaults.
    pub fn new(cdn: Cdn) -> Self {
        let quality = match cdn {
            Cdn::ImageSharp { .. } => Some(DEFAULT_IMAGESHARP_QUALITY),
            Cdn::Cloudflare { .. } | Cdn::Storyblok => None,
        };
        Self {
            cdn,
            srcset_widths: Vec::new(),
            sizes: Vec::new(),
            fallback_width: None,
            quality,
            aspect_ratio: None,
            fixed_height: None,
            media_conditions: Vec::new(),
            show_info: false,
            use_figure_wrap: false,
            include_figcaption: false,
        }
    }

    /// ImageSharp profile creating WebP variants for JPEG sources.
    pub fn image_sharp() -> Self {
        Self::new(Cdn::ImageSharp {
            create_webp_for_format: vec![ImageFormat::Jpeg],
        })
    }

    pub fn cloudflare() -> Self {
        Self::new(Cdn::Cloudflare { disabled: false })
    }

    pub fn storyblok() -> Self {
        Self::new(Cdn::Storyblok)
    }

    /// Check the fields a single-image render depends on.
    pub fn validate(&self) -> Result<(), PictureError> {
        if self.srcset_widths.is_empty() {
            return Err(PictureError::InvalidProfile(
                "srcset_widths must not be empty".into(),
            ));
        }
        if self.srcset_widths.contains(&0) {
            return Err(PictureError::InvalidProfile(
                "srcset_widths must be non-zero".into(),
            ));
        }
        if self.sizes.is_empty() {
            return Err(PictureError::InvalidProfile("sizes must not be empty".into()));
        }
        self.validate_shared()
    }

    /// Check the fields a multi-image render depends on. Srcset widths and
    /// sizes are not used there, so they may be empty.
    pub fn validate_multi_image(&self) -> Result<(), PictureError> {
        self.validate_shared()
    }

    fn validate_shared(&self) -> Result<(), PictureError> {
        if let Some(q) = self.quality
            && (q == 0 || q > 100)
        {
            return Err(PictureError::InvalidProfile(format!(
                "quality must be 1-100, got {q}"
            )));
        }
        if self.fallback_width == Some(0) {
            return Err(PictureError::InvalidProfile(
                "fallback_width must be non-zero".into(),
            ));
        }
        if self.media_conditions.iter().any(|c| c.width == 0) {
            return Err(PictureError::InvalidProfile(
                "media condition widths must be non-zero".into(),
            ));
        }
        if let Some(ratio) = self.aspect_ratio {
            if !(ratio > 0.0 && ratio.is_finite()) {
                return Err(PictureError::InvalidProfile(format!(
                    "aspect_ratio must be positive, got {ratio}"
                )));
            }
            // heights are u32; a tiny ratio must not saturate them
            let widest = self
                .srcset_widths
                .iter()
                .copied()
                .chain(self.media_conditions.iter().map(|c| c.width))
                .chain(self.fallback_width)
                .max()
                .unwrap_or_default();
            if (widest as f64 / ratio).round_ties_even() > u32::MAX as f64 {
                return Err(PictureError::InvalidProfile(format!(
                    "aspect_ratio {ratio} gives an image height out of range for width {widest}"
                )));
            }
        }
        Ok(())
    }

    /// Width of the `<img>` fallback for single-image pictures.
    pub fn fallback_width(&self) -> u32 {
        self.fallback_width
            .or_else(|| self.srcset_widths.iter().copied().max())
            .unwrap_or_default()
    }

    /// Width of the `<img>` fallback for multi-image pictures: the first
    /// (widest) media condition unless set explicitly.
    pub fn multi_image_fallback_width(&self) -> u32 {
        self.fallback_width
            .or_else(|| self.media_conditions.first().map(|c| c.width))
            .unwrap_or_else(|| self.fallback_width())
    }

    /// Height for an image of the given width, or 0 when the profile does
    /// not constrain height.
    ///
    /// Halfway cases round to even, so `980 / 1.777` gives 551.
    pub fn image_height(&self, width: u32) -> u32 {
        if let Some(ratio) = self.aspect_ratio
            && ratio > 0.0
        {
            return (width as f64 / ratio).round_ties_even() as u32;
        }
        match self.fixed_height {
            Some(h) if h > 0 => h,
            _ => 0,
        }
    }
}

/// Converts a Storyblok `focus` value (`[left]x[top]:[right]x[bottom]`) into
/// a focal point, using only the left and top values.
pub fn convert_storyblok_focal_point(focus: &str) -> Result<FocalPoint, PictureError> {
    let invalid = || PictureError::InvalidFocalPoint(focus.to_string());

    let top_left = focus.split(':').next().ok_or_else(invalid)?;
    let (x, y) = top_left.split_once('x').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;

    Ok(FocalPoint::new(x, y))
}
