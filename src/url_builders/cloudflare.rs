//! Cloudflare image resizing urls.
//!
//! Documentation: <https://developers.cloudflare.com/images/transform-images/transform-via-url/>

use super::focal_point_as_strings;
use crate::profile::PictureProfile;
use crate::source::ImageSource;
use crate::types::FocalPoint;

const PREFIX: &str = "/cdn-cgi/image/";

pub(super) fn build_url(
    source: &ImageSource,
    profile: &PictureProfile,
    disabled: bool,
    width: u32,
    focal_point: Option<FocalPoint>,
) -> String {
    if disabled {
        return original_url(source);
    }

    let mut options = vec![
        format!("width={width}"),
        "format=auto".to_string(),
        "fit=crop".to_string(),
    ];

    let height = profile.image_height(width);
    if height > 0 {
        options.push(format!("height={height}"));
    }
    if let Some(quality) = profile.quality {
        options.push(format!("quality={quality}"));
    }
    if let Some(fp) = focal_point.filter(FocalPoint::is_set) {
        let (x, y) = focal_point_as_strings(fp);
        options.push(format!("gravity={x}x{y}"));
    }

    let domain = source.domain();
    let origin = if domain.is_empty() {
        String::new()
    } else {
        format!("/{domain}")
    };

    format!("{PREFIX}{}{origin}{}", options.join(","), source.path())
}

fn original_url(source: &ImageSource) -> String {
    match source.query() {
        Some(query) => format!("{}{}?{query}", source.domain(), source.path()),
        None => format!("{}{}", source.domain(), source.path()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::cloudflare_profile;

    fn url(path: &str, profile: &PictureProfile, width: u32, fp: Option<FocalPoint>) -> String {
        let source = ImageSource::parse(path).unwrap();
        build_url(&source, profile, false, width, fp)
    }

    #[test]
    fn options_then_origin_url() {
        assert_eq!(
            url("https://mydomain.com/myImage.jpg", &cloudflare_profile(), 150, None),
            "/cdn-cgi/image/width=150,format=auto,fit=crop,height=150/https://mydomain.com/myImage.jpg"
        );
    }

    #[test]
    fn relative_path_is_appended_directly() {
        assert_eq!(
            url("/myImage.jpg", &cloudflare_profile(), 300, None),
            "/cdn-cgi/image/width=300,format=auto,fit=crop,height=300/myImage.jpg"
        );
    }

    #[test]
    fn quality_and_gravity() {
        let profile = PictureProfile {
            quality: Some(80),
            ..cloudflare_profile()
        };
        assert_eq!(
            url(
                "https://mydomain.com/myImage.jpg",
                &profile,
                150,
                Some(FocalPoint::new(0.50, 0.321))
            ),
            "/cdn-cgi/image/width=150,format=auto,fit=crop,height=150,quality=80,gravity=0.5x0.321/https://mydomain.com/myImage.jpg"
        );
    }

    #[test]
    fn no_height_without_constraint() {
        let profile = PictureProfile {
            aspect_ratio: None,
            ..cloudflare_profile()
        };
        assert_eq!(
            url("/a.jpg", &profile, 640, None),
            "/cdn-cgi/image/width=640,format=auto,fit=crop/a.jpg"
        );
    }

    #[test]
    fn disabled_returns_original_url() {
        let profile = cloudflare_profile();
        let source = ImageSource::parse("/myImage.jpg").unwrap();
        assert_eq!(build_url(&source, &profile, true, 150, None), "/myImage.jpg");

        let with_query = ImageSource::parse("https://mydomain.com/a.jpg?v=2").unwrap();
        assert_eq!(
            build_url(&with_query, &profile, true, 150, None),
            "https://mydomain.com/a.jpg?v=2"
        );
    }
}
