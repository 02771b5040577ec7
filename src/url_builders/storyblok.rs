//! Storyblok image service urls.
//!
//! Documentation: <https://www.storyblok.com/docs/image-service>
//!
//! Focal points are pixel coordinates here, taken from the asset's `focus`
//! field (see [`convert_storyblok_focal_point`](crate::convert_storyblok_focal_point)).

use super::format_coordinate;
use crate::profile::PictureProfile;
use crate::source::ImageSource;
use crate::types::FocalPoint;

pub(super) fn build_url(
    source: &ImageSource,
    profile: &PictureProfile,
    width: u32,
    focal_point: Option<FocalPoint>,
) -> String {
    // height 0 lets Storyblok keep the original proportions
    let height = profile.image_height(width);

    let quality_filter = profile
        .quality
        .map(|q| format!(":quality({q})"))
        .unwrap_or_default();
    let focal_filter = focal_point.map(focal_filter).unwrap_or_default();

    let filters = if quality_filter.is_empty() && focal_filter.is_empty() {
        String::new()
    } else {
        format!("/filters{quality_filter}{focal_filter}")
    };

    format!(
        "{}{}/m/{width}x{height}{filters}",
        source.domain(),
        source.path()
    )
}

/// Storyblok wants a focal area; a one-pixel box at the focal point.
fn focal_filter(fp: FocalPoint) -> String {
    if fp.x > 1.0 && fp.y > 1.0 {
        format!(
            ":focal({}x{}:{}x{})",
            format_coordinate(fp.x),
            format_coordinate(fp.y),
            format_coordinate(fp.x + 1.0),
            format_coordinate(fp.y + 1.0)
        )
    } else {
        String::new()
    }
}
