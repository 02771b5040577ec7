//! CDN-specific image url construction.
//!
//! | CDN | Url shape |
//! |---|---|
//! | **ImageSharp** | `/img.jpg?format=webp&width=300&height=300&rxy=0.1%2c0.1&quality=80` |
//! | **Cloudflare** | `/cdn-cgi/image/width=300,format=auto,fit=crop,height=300/https://host/img.jpg` |
//! | **Storyblok** | `https://host/img.jpg/m/300x300/filters:quality(80):focal(50x30:51x31)` |
//!
//! Every builder is a pure function of the parsed source, the profile, the
//! requested width, an optional output format and an optional focal point.

mod cloudflare;
mod imagesharp;
mod storyblok;

use crate::profile::{Cdn, PictureProfile};
use crate::source::ImageSource;
use crate::types::{FocalPoint, ImageFormat};

/// Build the url for one variant of an image.
///
/// `format` is only honoured by CDNs that take an explicit output format;
/// Cloudflare negotiates the format itself and Storyblok keeps the source
/// format.
pub fn build_image_url(
    source: &ImageSource,
    profile: &PictureProfile,
    width: u32,
    format: Option<ImageFormat>,
    focal_point: Option<FocalPoint>,
) -> String {
    let url = match &profile.cdn {
        Cdn::ImageSharp { .. } => {
            imagesharp::build_url(source, profile, width, format, focal_point)
        }
        Cdn::Cloudflare { disabled } => {
            cloudflare::build_url(source, profile, *disabled, width, focal_point)
        }
        Cdn::Storyblok => storyblok::build_url(source, profile, width, focal_point),
    };
    tracing::trace!(cdn = profile.cdn.name(), width, url = %url, "built image url");
    url
}

/// Whether a WebP `<source>` should be rendered next to the original format.
pub fn should_render_webp(profile: &PictureProfile, source: &ImageSource) -> bool {
    match &profile.cdn {
        Cdn::ImageSharp {
            create_webp_for_format,
        } => source
            .format()
            .is_some_and(|f| create_webp_for_format.contains(&f)),
        Cdn::Cloudflare { .. } | Cdn::Storyblok => false,
    }
}

/// Focal point coordinates rounded to three decimals, shortest form.
pub(crate) fn focal_point_as_strings(focal_point: FocalPoint) -> (String, String) {
    (
        format_coordinate(round3(focal_point.x)),
        format_coordinate(round3(focal_point.y)),
    )
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}

/// `1.0` prints as `1`, `0.5` as `0.5`; never in exponent form.
pub(crate) fn format_coordinate(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::image_sharp_profile;

    #[test]
    fn focal_point_is_rounded_to_three_decimals() {
        let fp = FocalPoint::new(0.5, 0.32149);
        assert_eq!(
            focal_point_as_strings(fp),
            ("0.5".to_string(), "0.321".to_string())
        );
    }

    #[test]
    fn whole_coordinates_have_no_decimals() {
        let fp = FocalPoint::new(1.0, 0.0004);
        assert_eq!(
            focal_point_as_strings(fp),
            ("1".to_string(), "0".to_string())
        );
    }

    #[test]
    fn webp_only_for_listed_source_formats() {
        let profile = image_sharp_profile();
        let jpg = ImageSource::parse("/a.jpg").unwrap();
        let jpeg = ImageSource::parse("/a.jpeg").unwrap();
        let png = ImageSource::parse("/a.png").unwrap();
        assert!(should_render_webp(&profile, &jpg));
        assert!(should_render_webp(&profile, &jpeg));
        assert!(!should_render_webp(&profile, &png));
    }

    #[test]
    fn no_webp_for_other_cdns() {
        let jpg = ImageSource::parse("/a.jpg").unwrap();
        assert!(!should_render_webp(&PictureProfile::cloudflare(), &jpg));
        assert!(!should_render_webp(&PictureProfile::storyblok(), &jpg));
    }

    #[test]
    fn dispatches_on_cdn() {
        let source = ImageSource::parse("/a.jpg").unwrap();
        let mut profile = image_sharp_profile();
        assert!(build_image_url(&source, &profile, 150, None, None).starts_with("/a.jpg?"));

        profile.cdn = Cdn::Cloudflare { disabled: false };
        assert!(
            build_image_url(&source, &profile, 150, None, None).starts_with("/cdn-cgi/image/")
        );

        profile.cdn = Cdn::Storyblok;
        assert!(build_image_url(&source, &profile, 150, None, None).starts_with("/a.jpg/m/"));
    }
}
