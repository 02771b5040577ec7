//! ImageSharp.Web query-string urls.
//!
//! Query items already present on the source url are kept, in order, so
//! editors can pin values such as `quality=20` or a hand-picked `height` on
//! individual images. The builder then appends its own items in a fixed
//! order: `format`, `width`, `height`, `rxy`, `quality`. `quality` is always
//! moved last.

use super::focal_point_as_strings;
use crate::profile::PictureProfile;
use crate::source::ImageSource;
use crate::types::{FocalPoint, ImageFormat};

/// Ordered query items with case-insensitive key lookup. Items taken from
/// the source url may have no value (`?flag`).
#[derive(Debug, Default)]
struct QueryItems(Vec<(String, Option<String>)>);

impl QueryItems {
    fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k.eq_ignore_ascii_case(key))
    }

    fn remove(&mut self, key: &str) -> Option<Option<String>> {
        let idx = self.0.iter().position(|(k, _)| k.eq_ignore_ascii_case(key))?;
        let (_, value) = self.0.remove(idx);
        self.0.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        Some(value)
    }

    fn push(&mut self, key: &str, value: impl Into<String>) {
        self.0.push((key.to_string(), Some(value.into())));
    }

    fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| match v {
                Some(v) => format!("{}={}", encode_component(k), encode_component(v)),
                None => encode_component(k),
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

pub(super) fn build_url(
    source: &ImageSource,
    profile: &PictureProfile,
    width: u32,
    format: Option<ImageFormat>,
    focal_point: Option<FocalPoint>,
) -> String {
    let mut query = QueryItems(source.query_items());

    if let Some(format) = format {
        query.remove("format");
        query.push("format", format.as_str());
    }

    query.remove("width");
    query.push("width", width.to_string());

    if !query.contains("height") {
        let height = profile.image_height(width);
        if height > 0 {
            query.push("height", height.to_string());
        }
    }

    if let Some(fp) = focal_point.filter(FocalPoint::is_set)
        && !query.contains("rxy")
    {
        let (x, y) = focal_point_as_strings(fp);
        query.push("rxy", format!("{x},{y}"));
    }

    match query.remove("quality") {
        Some(pinned) => query.0.push(("quality".to_string(), pinned)),
        None => {
            if let Some(quality) = profile.quality {
                query.push("quality", quality.to_string());
            }
        }
    }

    format!(
        "{}{}?{}",
        source.domain(),
        source.path(),
        query.to_query_string()
    )
}

/// Form-encode a query component the way ImageSharp.Web hosts expect it:
/// alphanumerics and `-_.!*()` stay as they are, a space becomes `+` and
/// everything else is escaped with lowercase hex (`,` → `%2c`, `~` → `%7e`).
fn encode_component(value: &str) -> String {
    let encoded = urlencoding::encode(value);
    let mut out = String::with_capacity(encoded.len());
    let mut chars = encoded.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => {
                let escape: String = chars.by_ref().take(2).collect();
                match escape.as_str() {
                    "20" => out.push('+'),
                    "21" => out.push('!'),
                    "28" => out.push('('),
                    "29" => out.push(')'),
                    "2A" => out.push('*'),
                    _ => {
                        out.push('%');
                        out.push_str(&escape.to_ascii_lowercase());
                    }
                }
            }
            '~' => out.push_str("%7e"),
            _ => out.push(c),
        }
    }
    out
}
