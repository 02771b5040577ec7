//! Small value types shared by profiles, attributes, URL builders and the
//! markup renderer.

use serde::{Deserialize, Serialize};

/// Point of interest inside an image, used by CDNs to anchor crops.
///
/// The coordinate space depends on the CDN: ImageSharp and Cloudflare expect
/// fractions in `0..=1`, Storyblok expects pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FocalPoint {
    pub x: f64,
    pub y: f64,
}

impl FocalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A point at the origin means "no focal point".
    pub fn is_set(&self) -> bool {
        self.x > 0.0 || self.y > 0.0
    }
}

impl From<(f64, f64)> for FocalPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// `loading` attribute of the `<img>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LazyLoading {
    None,
    /// Browser-native lazy loading (`loading="lazy"`).
    #[default]
    Browser,
}

/// `decoding` attribute of the `<img>` element. `None` omits the attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDecoding {
    #[default]
    Async,
    Sync,
    Auto,
    None,
}

impl ImageDecoding {
    pub fn as_attribute(self) -> Option<&'static str> {
        match self {
            Self::Async => Some("async"),
            Self::Sync => Some("sync"),
            Self::Auto => Some("auto"),
            Self::None => None,
        }
    }
}

/// `fetchPriority` attribute of the `<img>` element. `None` omits the attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPriority {
    #[default]
    None,
    Auto,
    High,
    Low,
}

impl FetchPriority {
    pub fn as_attribute(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Auto => Some("auto"),
            Self::High => Some("high"),
            Self::Low => Some("low"),
        }
    }
}

/// Image formats the renderer knows how to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    #[serde(rename = "webp")]
    Webp,
    #[serde(rename = "jpg", alias = "jpeg")]
    Jpeg,
    #[serde(rename = "png")]
    Png,
}

impl ImageFormat {
    /// Name used in query strings and file extensions.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// MIME type for the `type` attribute of a `<source>` element.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Webp => "image/webp",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Detect the format from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "webp" => Some(Self::Webp),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focal_point_at_origin_is_unset() {
        assert!(!FocalPoint::default().is_set());
        assert!(FocalPoint::new(0.0, 0.2).is_set());
        assert!(FocalPoint::new(0.5, 0.0).is_set());
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("webp"), Some(ImageFormat::Webp));
        assert_eq!(ImageFormat::from_extension("gif"), None);
    }

    #[test]
    fn jpeg_is_named_jpg() {
        assert_eq!(ImageFormat::Jpeg.as_str(), "jpg");
        assert_eq!(ImageFormat::Webp.mime_type(), "image/webp");
    }

    #[test]
    fn decoding_none_has_no_attribute() {
        assert_eq!(ImageDecoding::default().as_attribute(), Some("async"));
        assert_eq!(ImageDecoding::None.as_attribute(), None);
    }

    #[test]
    fn fetch_priority_defaults_to_no_attribute() {
        assert_eq!(FetchPriority::default().as_attribute(), None);
        assert_eq!(FetchPriority::High.as_attribute(), Some("high"));
    }
}
