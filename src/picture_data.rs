//! Url sets for a picture, computed before any markup is written.
//!
//! [`picture_data`] covers the common case: one image, many widths, rendered
//! as `srcset` entries. [`multi_image_picture_data`] covers art direction:
//! different images (or crops) per viewport, selected with the profile's
//! media conditions.
//!
//! Both are serializable so the CLI can print them as JSON.

use crate::error::PictureError;
use crate::profile::PictureProfile;
use crate::source::ImageSource;
use crate::types::{FocalPoint, ImageFormat};
use crate::url_builders::{build_image_url, should_render_webp};
use serde::Serialize;

/// Urls for a single-image picture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PictureData {
    /// `url 150w, url 300w` in profile order.
    pub srcset: String,
    pub srcset_webp: Option<String>,
    /// Profile sizes joined with `", "`.
    pub sizes: String,
    pub img_src: String,
    pub fallback_width: u32,
    /// Element id used by the info overlay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
}

/// One `<source>` pair of a multi-image picture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaImage {
    pub media: String,
    pub image_url: String,
    pub image_url_webp: Option<String>,
}

/// Urls for a multi-image picture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaImagesPictureData {
    pub media_images: Vec<MediaImage>,
    pub img_src: String,
    pub fallback_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
}

/// Compute the srcsets and fallback url for one image.
pub fn picture_data(
    image_path: &str,
    profile: &PictureProfile,
    focal_point: Option<FocalPoint>,
) -> Result<PictureData, PictureError> {
    profile.validate()?;
    let source = ImageSource::parse(image_path)?;

    let fallback_width = profile.fallback_width();
    let srcset_webp = should_render_webp(profile, &source)
        .then(|| build_srcset(&source, profile, Some(ImageFormat::Webp), focal_point));

    Ok(PictureData {
        srcset: build_srcset(&source, profile, None, focal_point),
        srcset_webp,
        sizes: profile.sizes.join(", "),
        img_src: build_image_url(&source, profile, fallback_width, None, focal_point),
        fallback_width,
        unique_id: unique_id(profile),
    })
}

/// Compute one url pair per media condition.
///
/// Image `i` is used for media condition `i`. When there are fewer images
/// than media conditions the last image fills the remaining conditions;
/// surplus images are ignored. `focal_points[i]` belongs to image `i`, and
/// a missing entry means no focal point. The `<img>` fallback is always
/// the first image.
pub fn multi_image_picture_data(
    image_paths: &[&str],
    profile: &PictureProfile,
    focal_points: &[Option<FocalPoint>],
) -> Result<MediaImagesPictureData, PictureError> {
    if profile.media_conditions.is_empty() {
        return Err(PictureError::MissingMediaConditions);
    }
    if image_paths.is_empty() {
        return Err(PictureError::NoImages);
    }
    profile.validate_multi_image()?;

    let sources = image_paths
        .iter()
        .map(|path| ImageSource::parse(path))
        .collect::<Result<Vec<_>, _>>()?;
    let focal_point_for = |idx: usize| focal_points.get(idx).copied().flatten();

    if sources.len() > profile.media_conditions.len() {
        tracing::debug!(
            images = sources.len(),
            media_conditions = profile.media_conditions.len(),
            "more images than media conditions, extra images are ignored"
        );
    }

    let media_images = profile
        .media_conditions
        .iter()
        .enumerate()
        .map(|(i, condition)| {
            let image_idx = i.min(sources.len() - 1);
            let source = &sources[image_idx];
            let focal_point = focal_point_for(image_idx);
            tracing::debug!(media = %condition.media, image = image_idx, "selected image for media condition");

            MediaImage {
                media: condition.media.clone(),
                image_url: build_image_url(source, profile, condition.width, None, focal_point),
                image_url_webp: should_render_webp(profile, source).then(|| {
                    build_image_url(
                        source,
                        profile,
                        condition.width,
                        Some(ImageFormat::Webp),
                        focal_point,
                    )
                }),
            }
        })
        .collect();

    let fallback_width = profile.multi_image_fallback_width();
    Ok(MediaImagesPictureData {
        media_images,
        img_src: build_image_url(&sources[0], profile, fallback_width, None, focal_point_for(0)),
        fallback_width,
        unique_id: unique_id(profile),
    })
}

fn build_srcset(
    source: &ImageSource,
    profile: &PictureProfile,
    format: Option<ImageFormat>,
    focal_point: Option<FocalPoint>,
) -> String {
    profile
        .srcset_widths
        .iter()
        .map(|&width| {
            format!(
                "{} {width}w",
                build_image_url(source, profile, width, format, focal_point)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn unique_id(profile: &PictureProfile) -> Option<String> {
    profile
        .show_info
        .then(|| uuid::Uuid::new_v4().simple().to_string()[..10].to_string())
}
