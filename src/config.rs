//! Profile configuration files.
//!
//! Picture profiles are declared in a TOML file (`profiles.toml` by default)
//! and looked up by name when rendering. A `[defaults]` table is deep-merged
//! under every profile, so shared values are written once.
//!
//! ## Layout
//!
//! ```toml
//! [defaults]
//! sizes = ["(max-width: 980px) calc((100vw - 40px))", "750px"]
//!
//! [profiles.card]
//! cdn = "imagesharp"              # imagesharp | cloudflare | storyblok
//! srcset_widths = [150, 300]
//! aspect_ratio = 1.0
//! create_webp_for_format = ["jpg"]  # imagesharp only
//!
//! [profiles.hero]
//! cdn = "cloudflare"
//! srcset_widths = [375, 750, 980, 1500]
//! fixed_height = 400
//! disabled = false                # cloudflare only
//!
//! [[profiles.hero.media_conditions]]
//! media = "(min-width: 1200px)"
//! width = 1500
//! ```
//!
//! ## Profile keys
//!
//! | Key | Type | Default |
//! |---|---|---|
//! | `cdn` | `imagesharp`, `cloudflare`, `storyblok` | required |
//! | `srcset_widths` | list of widths | required |
//! | `sizes` | list of `sizes` entries | required |
//! | `fallback_width` | width | largest srcset width |
//! | `quality` | 1-100 | 80 for imagesharp, unset otherwise |
//! | `aspect_ratio` | width / height | unset |
//! | `fixed_height` | pixels | unset |
//! | `media_conditions` | `{ media, width }` tables | none |
//! | `create_webp_for_format` | formats | `["jpg"]` |
//! | `disabled` | bool | `false` |
//! | `show_info` | bool | `false` |
//! | `use_figure_wrap` | bool | `false` |
//! | `include_figcaption` | bool | `false` |
//!
//! Unknown keys are rejected to catch typos early, at the top level and
//! inside every profile.

use crate::profile::{Cdn, MediaCondition, PictureProfile};
use crate::types::ImageFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("profile '{name}': {message}")]
    Profile { name: String, message: String },
}

/// CDN selector as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CdnKind {
    ImageSharp,
    Cloudflare,
    Storyblok,
}

/// One profile table after merging with `[defaults]`.
///
/// Options are `None` when the file leaves them out, so CDN defaults can
/// be applied on conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    pub cdn: Option<CdnKind>,
    pub srcset_widths: Vec<u32>,
    pub sizes: Vec<String>,
    pub fallback_width: Option<u32>,
    pub quality: Option<u8>,
    pub aspect_ratio: Option<f64>,
    pub fixed_height: Option<u32>,
    pub media_conditions: Vec<MediaCondition>,
    pub create_webp_for_format: Option<Vec<ImageFormat>>,
    pub disabled: Option<bool>,
    pub show_info: bool,
    pub use_figure_wrap: bool,
    pub include_figcaption: bool,
}

impl TryFrom<ProfileConfig> for PictureProfile {
    type Error = ConfigError;

    fn try_from(config: ProfileConfig) -> Result<Self, Self::Error> {
        let kind = config
            .cdn
            .ok_or_else(|| ConfigError::Validation("cdn is required".into()))?;

        if kind != CdnKind::ImageSharp && config.create_webp_for_format.is_some() {
            return Err(ConfigError::Validation(
                "create_webp_for_format is only supported by the imagesharp cdn".into(),
            ));
        }
        if kind != CdnKind::Cloudflare && config.disabled.is_some() {
            return Err(ConfigError::Validation(
                "disabled is only supported by the cloudflare cdn".into(),
            ));
        }

        let base = match kind {
            CdnKind::ImageSharp => match config.create_webp_for_format {
                Some(formats) => PictureProfile::new(Cdn::ImageSharp {
                    create_webp_for_format: formats,
                }),
                None => PictureProfile::image_sharp(),
            },
            CdnKind::Cloudflare => PictureProfile::new(Cdn::Cloudflare {
                disabled: config.disabled.unwrap_or(false),
            }),
            CdnKind::Storyblok => PictureProfile::storyblok(),
        };

        let profile = PictureProfile {
            srcset_widths: config.srcset_widths,
            sizes: config.sizes,
            fallback_width: config.fallback_width,
            quality: config.quality.or(base.quality),
            aspect_ratio: config.aspect_ratio,
            fixed_height: config.fixed_height,
            media_conditions: config.media_conditions,
            show_info: config.show_info,
            use_figure_wrap: config.use_figure_wrap,
            include_figcaption: config.include_figcaption,
            ..base
        };
        profile
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        Ok(profile)
    }
}

/// Named profiles loaded from one config file, sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSet {
    profiles: BTreeMap<String, PictureProfile>,
}

impl ProfileSet {
    /// Look up a profile, listing the available names when it is missing.
    pub fn get(&self, name: &str) -> Result<&PictureProfile, ConfigError> {
        self.profiles.get(name).ok_or_else(|| ConfigError::Profile {
            name: name.to_string(),
            message: format!(
                "not defined (available: {})",
                self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
            ),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PictureProfile)> {
        self.profiles.iter().map(|(name, p)| (name.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Deep-merge two TOML values. Tables merge recursively; everything else
/// (scalars, arrays) is replaced by the overlay.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse a profile file from a string.
pub fn parse_profiles(content: &str) -> Result<ProfileSet, ConfigError> {
    let mut root: toml::Table = toml::from_str(content)?;

    if let Some(key) = root
        .keys()
        .find(|k| k.as_str() != "defaults" && k.as_str() != "profiles")
    {
        return Err(ConfigError::Validation(format!(
            "unknown top-level key '{key}', expected [defaults] or [profiles.<name>]"
        )));
    }

    let defaults = match root.remove("defaults") {
        Some(toml::Value::Table(table)) => table,
        Some(_) => return Err(ConfigError::Validation("defaults must be a table".into())),
        None => toml::Table::new(),
    };
    let profile_tables = match root.remove("profiles") {
        Some(toml::Value::Table(table)) => table,
        Some(_) => return Err(ConfigError::Validation("profiles must be a table".into())),
        None => toml::Table::new(),
    };

    let mut profiles = BTreeMap::new();
    for (name, table) in profile_tables {
        if !table.is_table() {
            return Err(ConfigError::Profile {
                name,
                message: "must be a table".into(),
            });
        }
        let merged = merge_toml(toml::Value::Table(defaults.clone()), table);
        let profile = merged
            .try_into::<ProfileConfig>()
            .map_err(ConfigError::from)
            .and_then(PictureProfile::try_from)
            .map_err(|e| ConfigError::Profile {
                name: name.clone(),
                message: match e {
                    ConfigError::Validation(msg) => msg,
                    other => other.to_string(),
                },
            })?;
        tracing::debug!(profile = %name, cdn = profile.cdn.name(), "loaded picture profile");
        profiles.insert(name, profile);
    }

    Ok(ProfileSet { profiles })
}

/// Load and validate a profile file.
pub fn load_profiles(path: &Path) -> Result<ProfileSet, ConfigError> {
    let content = fs::read_to_string(path)?;
    let set = parse_profiles(&content)?;
    tracing::debug!(path = %path.display(), profiles = set.len(), "loaded profile file");
    Ok(set)
}

/// A documented sample profile file, printed by `picture-renderer gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# picture-renderer profiles
#
# Each [profiles.<name>] table describes how one layout slot renders its
# images. Values in [defaults] apply to every profile unless overridden.
# Unknown keys are rejected.

[defaults]
# Entries of the sizes attribute, joined with ", ".
sizes = [
    "(max-width: 980px) calc((100vw - 40px))",
    "(max-width: 1200px) 368px",
    "750px",
]

# ImageSharp query strings: /img.jpg?width=375&height=211&quality=80
[profiles.article]
cdn = "imagesharp"
srcset_widths = [375, 750, 980, 1500]
aspect_ratio = 1.777            # width / height; omit to keep proportions
# fallback_width = 1500         # <img> width, defaults to the largest srcset width
# quality = 80                  # 1-100, imagesharp defaults to 80
create_webp_for_format = ["jpg"]  # source formats that also get a WebP <source>

# Square thumbnails with a different image per viewport.
[profiles.thumbnail]
cdn = "imagesharp"
srcset_widths = [150, 300]
sizes = ["150px"]
aspect_ratio = 1.0

[[profiles.thumbnail.media_conditions]]
media = "(min-width: 1200px)"
width = 400

[[profiles.thumbnail.media_conditions]]
media = "(min-width: 600px)"
width = 200

[[profiles.thumbnail.media_conditions]]
media = "(min-width: 300px)"
width = 100

# Cloudflare image resizing: /cdn-cgi/image/width=375,format=auto,fit=crop/...
[profiles.hero]
cdn = "cloudflare"
srcset_widths = [375, 750, 980, 1500]
fixed_height = 400              # used when aspect_ratio is not set
disabled = false                # true renders the original image url
use_figure_wrap = true          # wrap <picture> in <figure>
include_figcaption = true       # alt text as <figcaption>

# Storyblok image service: /img.jpg/m/375x211/filters:quality(75)
[profiles.storyblok]
cdn = "storyblok"
srcset_widths = [375, 750, 980, 1500]
aspect_ratio = 1.777
quality = 75
show_info = false               # overlay showing the selected variant
"##
}
