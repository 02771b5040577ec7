//! CLI output formatting.
//!
//! # Entity Display Contract
//!
//! Every profile follows the same two-level pattern:
//!
//! 1. **Header line**: positional index + name + CDN
//! 2. **Context lines**: indented widths, sizes, height rule and options
//!
//! ```text
//! Profiles
//! 001 article (imagesharp)
//!     Widths: 375, 750, 980, 1500
//!     Sizes: (max-width: 980px) calc((100vw - 40px)), 750px
//!     Fallback: 1500px
//!     Height: aspect ratio 1.777
//!     Quality: 80
//!     WebP: jpg
//! 002 hero (cloudflare)
//!     ...
//!     Media: (min-width: 1200px) → 1500px
//!     Options: figure, figcaption
//! ```
//!
//! # Architecture
//!
//! Each listing has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::config::ProfileSet;
use crate::profile::{Cdn, PictureProfile};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// How the profile decides image heights.
fn height_rule(profile: &PictureProfile) -> String {
    match (profile.aspect_ratio, profile.fixed_height) {
        (Some(ratio), _) => format!("aspect ratio {ratio}"),
        (None, Some(h)) if h > 0 => format!("fixed {h}px"),
        _ => "original proportions".to_string(),
    }
}

/// Context lines for one profile, without indentation.
fn profile_details(profile: &PictureProfile) -> Vec<String> {
    let mut lines = vec![
        format!("Widths: {}", join(&profile.srcset_widths)),
        format!("Sizes: {}", profile.sizes.join(", ")),
        format!("Fallback: {}px", profile.fallback_width()),
        format!("Height: {}", height_rule(profile)),
    ];

    if let Some(q) = profile.quality {
        lines.push(format!("Quality: {q}"));
    }
    match &profile.cdn {
        Cdn::ImageSharp {
            create_webp_for_format,
        } if !create_webp_for_format.is_empty() => {
            let formats: Vec<&str> = create_webp_for_format.iter().map(|f| f.as_str()).collect();
            lines.push(format!("WebP: {}", formats.join(", ")));
        }
        Cdn::Cloudflare { disabled: true } => lines.push("Disabled: original urls".to_string()),
        _ => {}
    }
    for condition in &profile.media_conditions {
        lines.push(format!("Media: {} → {}px", condition.media, condition.width));
    }

    let options: Vec<&str> = [
        (profile.use_figure_wrap, "figure"),
        (profile.use_figure_wrap && profile.include_figcaption, "figcaption"),
        (profile.show_info, "info"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();
    if !options.is_empty() {
        lines.push(format!("Options: {}", options.join(", ")));
    }

    lines
}

/// Format the loaded profiles, sorted by name.
pub fn format_profile_list(profiles: &ProfileSet) -> Vec<String> {
    if profiles.is_empty() {
        return vec!["No profiles defined".to_string()];
    }

    let mut lines = vec!["Profiles".to_string()];
    for (i, (name, profile)) in profiles.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            name,
            profile.cdn.name()
        ));
        lines.extend(
            profile_details(profile)
                .into_iter()
                .map(|line| format!("{}{}", indent(1), line)),
        );
    }
    lines
}

pub fn print_profile_list(profiles: &ProfileSet) {
    for line in format_profile_list(profiles) {
        println!("{}", line);
    }
}
