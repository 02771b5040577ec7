//! Shared profiles for the unit tests.
//!
//! Every CDN gets the same small profile: two srcset widths, a single
//! `sizes` entry and a square aspect ratio. The ImageSharp profile also
//! carries three media conditions so it can be used for multi-image tests.

use crate::profile::{MediaCondition, PictureProfile};

fn small_square(base: PictureProfile) -> PictureProfile {
    PictureProfile {
        srcset_widths: vec![150, 300],
        sizes: vec!["150px".to_string()],
        aspect_ratio: Some(1.0),
        ..base
    }
}

/// Media conditions from widest to narrowest viewport.
pub fn media_conditions() -> Vec<MediaCondition> {
    vec![
        MediaCondition::new("(min-width: 1200px)", 400),
        MediaCondition::new("(min-width: 600px)", 200),
        MediaCondition::new("(min-width: 300px)", 100),
    ]
}

pub fn image_sharp_profile() -> PictureProfile {
    PictureProfile {
        media_conditions: media_conditions(),
        ..small_square(PictureProfile::image_sharp())
    }
}

pub fn cloudflare_profile() -> PictureProfile {
    small_square(PictureProfile::cloudflare())
}

pub fn storyblok_profile() -> PictureProfile {
    small_square(PictureProfile::storyblok())
}

/// The wide four-width profile used for the "real page" examples.
pub fn wide_profile(base: PictureProfile) -> PictureProfile {
    PictureProfile {
        srcset_widths: vec![375, 750, 980, 1500],
        sizes: vec![
            "(max-width: 980px) calc((100vw - 40px))".to_string(),
            "(max-width: 1200px) 368px".to_string(),
            "750px".to_string(),
        ],
        aspect_ratio: Some(1.777),
        ..base
    }
}
