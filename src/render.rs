//! `<picture>` markup rendering.
//!
//! The output is byte-stable: attribute order and spacing never depend on
//! anything but the inputs, so rendered pages can be diffed and cached.
//!
//! ## Single image
//!
//! ```text
//! <picture>
//!   <source srcset="..webp.." sizes=".." type="image/webp"/>   (when the profile creates WebP)
//!   <source srcset=".." sizes=".." />
//!   <img alt=".." src=".." loading="lazy" decoding="async" />
//! </picture>
//! ```
//!
//! ## Multiple images
//!
//! One `<source>` pair per media condition, WebP first:
//!
//! ```text
//! <source media="(min-width: 1200px)" srcset=".." type="image/webp"/>
//! <source media="(min-width: 1200px)" srcset=".."/>
//! ```
//!
//! (Indentation above is for reading only; elements are emitted without
//! whitespace between them.)
//!
//! The result is a [`Markup`] value so it can be spliced straight into Maud
//! templates: `html! { article { (picture) } }`.

use crate::attributes::{PictureAttributes, is_valid_attribute_name};
use crate::error::PictureError;
use crate::picture_data::{MediaImagesPictureData, PictureData, multi_image_picture_data, picture_data};
use crate::profile::{Cdn, PictureProfile};
use crate::types::{FocalPoint, ImageFormat, LazyLoading};
use maud::{Markup, PreEscaped, html};

/// Render a `<picture>` element for one image.
pub fn render(
    image_path: &str,
    profile: &PictureProfile,
    attributes: &PictureAttributes,
    focal_point: Option<FocalPoint>,
) -> Result<Markup, PictureError> {
    let data = picture_data(image_path, profile, focal_point)?;
    tracing::debug!(
        image = image_path,
        cdn = profile.cdn.name(),
        widths = ?profile.srcset_widths,
        webp = data.srcset_webp.is_some(),
        "rendering picture"
    );

    Ok(render_picture_data(&data, profile, attributes))
}

/// Render a `<picture>` element showing different images per media condition.
pub fn render_multi(
    image_paths: &[&str],
    profile: &PictureProfile,
    attributes: &PictureAttributes,
    focal_points: &[Option<FocalPoint>],
) -> Result<Markup, PictureError> {
    let data = multi_image_picture_data(image_paths, profile, focal_points)?;
    tracing::debug!(
        images = image_paths.len(),
        cdn = profile.cdn.name(),
        sources = data.media_images.len(),
        "rendering multi-image picture"
    );

    let sources = multi_image_sources(&data);
    let img = img_element(
        &data.img_src,
        data.fallback_width,
        data.unique_id.as_deref(),
        profile,
        attributes,
    );
    Ok(wrap(
        &sources,
        &img,
        data.unique_id.as_deref(),
        profile,
        attributes,
    ))
}

/// Render from precomputed url data, for callers that cache [`PictureData`].
pub fn render_picture_data(
    data: &PictureData,
    profile: &PictureProfile,
    attributes: &PictureAttributes,
) -> Markup {
    let mut sources = String::new();
    // browsers pick the first supported source, so WebP goes first
    if let Some(srcset_webp) = &data.srcset_webp {
        sources.push_str(&format!(
            r#"<source srcset="{srcset_webp}" sizes="{}" type="{}"/>"#,
            data.sizes,
            ImageFormat::Webp.mime_type()
        ));
    }
    sources.push_str(&format!(
        r#"<source srcset="{}" sizes="{}" />"#,
        data.srcset, data.sizes
    ));
    let img = img_element(
        &data.img_src,
        data.fallback_width,
        data.unique_id.as_deref(),
        profile,
        attributes,
    );
    wrap(&sources, &img, data.unique_id.as_deref(), profile, attributes)
}

fn multi_image_sources(data: &MediaImagesPictureData) -> String {
    let mut sources = String::new();
    for image in &data.media_images {
        if let Some(webp) = &image.image_url_webp {
            sources.push_str(&format!(
                r#"<source media="{}" srcset="{webp}" type="{}"/>"#,
                image.media,
                ImageFormat::Webp.mime_type()
            ));
        }
        sources.push_str(&format!(
            r#"<source media="{}" srcset="{}"/>"#,
            image.media, image.image_url
        ));
    }
    sources
}

/// `<img>` with attributes in a fixed order. Every attribute after `src`
/// carries its own trailing space, except `class`, which closes the tag.
fn img_element(
    src: &str,
    fallback_width: u32,
    unique_id: Option<&str>,
    profile: &PictureProfile,
    attributes: &PictureAttributes,
) -> String {
    let mut img = String::from("<img");
    if let Some(id) = unique_id {
        img.push_str(&format!(r#" id="{id}""#));
    }
    img.push_str(&format!(
        r#" alt="{}" src="{src}" "#,
        escape(&attributes.img_alt)
    ));

    let additional = &attributes.img_additional_attributes;
    match additional.get("width") {
        Some(width) => img.push_str(&format!(r#"width="{}" "#, escape(width))),
        None if attributes.render_img_width_height => {
            img.push_str(&format!(r#"width="{fallback_width}" "#));
            let height = profile.image_height(fallback_width);
            if height > 0 {
                img.push_str(&format!(r#"height="{height}" "#));
            }
        }
        None => {}
    }

    if attributes.lazy_loading == LazyLoading::Browser {
        img.push_str(r#"loading="lazy" "#);
    }
    if let Some(decoding) = attributes.img_decoding.as_attribute() {
        img.push_str(&format!(r#"decoding="{decoding}" "#));
    }
    if let Some(priority) = attributes.img_fetch_priority.as_attribute() {
        img.push_str(&format!(r#"fetchPriority="{priority}" "#));
    }
    for (name, value) in additional.iter().filter(|(name, _)| *name != "width") {
        if !is_valid_attribute_name(name) {
            tracing::warn!(attribute = %name, "skipping img attribute with an invalid name");
            continue;
        }
        img.push_str(&format!(r#"{name}="{}" "#, escape(value)));
    }
    if let Some(class) = attributes.img_class.as_deref().filter(|c| !c.is_empty()) {
        img.push_str(&format!(r#"class="{}""#, escape(class)));
    }
    img.push_str("/>");
    img
}

/// Wrap sources and img in `<picture>`, optionally inside a `<figure>`, and
/// append the info overlay.
fn wrap(
    sources: &str,
    img: &str,
    unique_id: Option<&str>,
    profile: &PictureProfile,
    attributes: &PictureAttributes,
) -> Markup {
    let wrap_class = attributes
        .wrap_class
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| format!(r#" class="{}""#, escape(c)))
        .unwrap_or_default();

    let (picture_class, figure_class) = if profile.use_figure_wrap {
        ("", wrap_class.as_str())
    } else {
        (wrap_class.as_str(), "")
    };
    let picture = format!("<picture{picture_class}>{sources}{img}</picture>");

    let info = match unique_id {
        Some(id) if profile.show_info => info_elements(id, &profile.cdn),
        _ => String::new(),
    };

    let html = if profile.use_figure_wrap {
        let figcaption = if profile.include_figcaption {
            format!("<figcaption>{}</figcaption>", escape(&attributes.img_alt))
        } else {
            String::new()
        };
        format!("<figure{figure_class}>{picture}{figcaption}</figure>{info}")
    } else {
        format!("{picture}{info}")
    };

    PreEscaped(html)
}

/// Overlay that shows the transformation of the variant the browser picked.
fn info_elements(id: &str, cdn: &Cdn) -> String {
    let format_body = match cdn {
        Cdn::ImageSharp { .. } => {
            r"return input.split('/').pop().replace('?', '\n').replaceAll('&', ', ').replace('%2c', ',').replace('rxy', 'focal point');"
        }
        Cdn::Cloudflare { .. } => {
            "return input.split('/cdn-cgi/image/').pop().replace('/http', ', http');"
        }
        Cdn::Storyblok => "return input.split('/m/').pop().replaceAll('/', ', ');",
    };
    let format_function = format!("function format{id}(input) {{ {format_body} }}");

    let info_div = format!(
        r#"<div id="pinfo{id}" style="position: absolute; margin-top:-60px; padding:0 5px 2px 5px; font-size:0.8rem; text-align:left; background-color:rgba(255, 255, 255, 0.8);"></div>"#
    );
    let script = format!(
        r#"<script type="text/javascript"> window.addEventListener("load",function () {{ const pictureInfo = document.getElementById('pinfo{id}'); var image = document.getElementById('{id}'); pictureInfo.innerText = format{id}(image.currentSrc); image.onload = function () {{ pictureInfo.innerText = format{id}(image.currentSrc); }}; {format_function} }}, false);</script>"#
    );

    format!("\n{info_div}\n{script}")
}

/// HTML-escape text for use inside a double-quoted attribute or element body.
fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}
