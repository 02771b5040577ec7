//! Parsing of the image reference a picture is rendered from.
//!
//! Image references come in two shapes:
//!
//! - absolute `http`/`https` urls (`https://mydomain.com/myImage.jpg?quality=7`)
//! - site-relative paths (`/myImage.jpg`, `media/myImage.jpg`)
//!
//! Relative paths are resolved against a placeholder host so both shapes can
//! be handled by [`url::Url`]. The placeholder host never appears in output:
//! [`ImageSource::domain`] is empty for relative references.

use crate::error::PictureError;
use crate::types::ImageFormat;
use url::Url;

const RELATIVE_BASE: &str = "https://relative.invalid/";

/// A parsed image reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    url: Url,
    relative: bool,
}

impl ImageSource {
    pub fn parse(image_path: &str) -> Result<Self, PictureError> {
        let trimmed = image_path.trim();
        if trimmed.is_empty() {
            return Err(PictureError::EmptyImagePath);
        }
        let invalid = || PictureError::InvalidImagePath(trimmed.to_string());

        match Url::parse(trimmed) {
            Ok(url) => {
                if matches!(url.scheme(), "http" | "https") && url.has_host() {
                    return Ok(Self {
                        url,
                        relative: false,
                    });
                }
                return Err(invalid());
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {}
            Err(_) => return Err(invalid()),
        }

        let base = Url::parse(RELATIVE_BASE).map_err(|_| invalid())?;
        let url = base.join(trimmed).map_err(|_| invalid())?;
        // `//cdn.example.com/a.jpg` joins to an absolute url on another host
        let relative = url.host_str() == base.host_str();
        Ok(Self { url, relative })
    }

    /// Scheme and authority of an absolute reference (`https://mydomain.com`),
    /// or an empty string for relative paths.
    pub fn domain(&self) -> String {
        if self.relative {
            String::new()
        } else {
            self.url.origin().ascii_serialization()
        }
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Percent-encoded absolute path, always starting with `/`.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Raw query string without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.url.query().filter(|q| !q.is_empty())
    }

    /// Decoded query items in their original order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url.query_pairs().into_owned().collect()
    }

    /// Decoded query items in their original order. A key written without
    /// `=` (`?flag`) has no value, which is kept apart from an empty one.
    pub fn query_items(&self) -> Vec<(String, Option<String>)> {
        self.query()
            .map(|query| {
                query
                    .split('&')
                    .filter(|item| !item.is_empty())
                    .map(|item| match item.split_once('=') {
                        Some((key, value)) => (decode_component(key), Some(decode_component(value))),
                        None => (decode_component(item), None),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Format of the source image, detected from the file extension.
    pub fn format(&self) -> Option<ImageFormat> {
        let file_name = self.path().rsplit('/').next()?;
        let (_, ext) = file_name.rsplit_once('.')?;
        ImageFormat::from_extension(ext)
    }
}

/// Form-style decoding: `+` is a space, malformed escapes are kept as written.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
