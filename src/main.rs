use clap::{Parser, Subcommand};
use picture_renderer::{
    FetchPriority, FocalPoint, ImageDecoding, LazyLoading, PictureAttributes, config,
    convert_storyblok_focal_point, is_valid_attribute_name, multi_image_picture_data, output,
    picture_data, render, render_multi,
};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "picture-renderer")]
#[command(about = "Render responsive <picture> elements for image CDNs")]
#[command(long_about = "\
Render responsive <picture> elements for image CDNs

Profiles are read from a TOML file and selected by name:

  [profiles.card]
  cdn = \"imagesharp\"            # imagesharp | cloudflare | storyblok
  srcset_widths = [150, 300]
  sizes = [\"150px\"]
  aspect_ratio = 1.0

One image renders a srcset picture. Several images render one <source>
per media condition of the profile, in order; the last image fills any
remaining conditions.

Run 'picture-renderer gen-config' to generate a documented profiles.toml.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Profile file
    #[arg(long, default_value = "profiles.toml", global = true)]
    config: PathBuf,

    /// Log more detail to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Profile name from the config file
    #[arg(long, short)]
    profile: String,

    /// Image urls or paths; more than one renders a multi-image picture
    #[arg(required = true)]
    images: Vec<String>,

    /// Alt text for the <img> element
    #[arg(long, default_value = "")]
    alt: String,

    /// CSS class for the <img> element
    #[arg(long)]
    class: Option<String>,

    /// CSS class for the wrapping <picture> or <figure>
    #[arg(long)]
    wrap_class: Option<String>,

    /// Focal point per image, as x,y (0-1) or a Storyblok focus value
    #[arg(long = "focal", value_parser = parse_focal_point)]
    focal_points: Vec<FocalPoint>,

    /// Loading behaviour: browser or none
    #[arg(long, default_value = "browser", value_parser = parse_lazy_loading)]
    lazy: LazyLoading,

    /// Decoding hint: async, sync, auto or none
    #[arg(long, default_value = "async", value_parser = parse_decoding)]
    decoding: ImageDecoding,

    /// Fetch priority: none, auto, high or low
    #[arg(long, default_value = "none", value_parser = parse_fetch_priority)]
    fetch_priority: FetchPriority,

    /// Render width and height attributes on the <img>
    #[arg(long)]
    width_height: bool,

    /// Additional <img> attribute as name=value (repeatable)
    #[arg(long = "attr", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,

    /// Print the computed urls as JSON instead of markup
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Render a <picture> element with a named profile
    Render(RenderArgs),
    /// List the profiles defined in the config file
    Profiles,
    /// Print a stock profiles.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Render(args) => {
            let profiles = config::load_profiles(&cli.config)?;
            let profile = profiles.get(&args.profile)?;
            let images: Vec<&str> = args.images.iter().map(String::as_str).collect();
            let focal_points: Vec<Option<FocalPoint>> =
                args.focal_points.iter().copied().map(Some).collect();
            let attributes = PictureAttributes {
                img_alt: args.alt,
                img_class: args.class,
                img_decoding: args.decoding,
                img_fetch_priority: args.fetch_priority,
                lazy_loading: args.lazy,
                render_img_width_height: args.width_height,
                img_additional_attributes: args.attributes.into_iter().collect(),
                wrap_class: args.wrap_class,
            };

            match (images.as_slice(), args.json) {
                ([image], true) => {
                    let data = picture_data(image, profile, focal_points.first().copied().flatten())?;
                    println!("{}", serde_json::to_string_pretty(&data)?);
                }
                (_, true) => {
                    let data = multi_image_picture_data(&images, profile, &focal_points)?;
                    println!("{}", serde_json::to_string_pretty(&data)?);
                }
                ([image], false) => {
                    let markup = render(
                        image,
                        profile,
                        &attributes,
                        focal_points.first().copied().flatten(),
                    )?;
                    println!("{}", markup.into_string());
                }
                (_, false) => {
                    let markup = render_multi(&images, profile, &attributes, &focal_points)?;
                    println!("{}", markup.into_string());
                }
            }
        }
        Command::Profiles => {
            let profiles = config::load_profiles(&cli.config)?;
            output::print_profile_list(&profiles);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `0.3,0.6` for ImageSharp and Cloudflare, `LxT:RxB` for Storyblok.
fn parse_focal_point(value: &str) -> Result<FocalPoint, String> {
    if let Some((x, y)) = value.split_once(',') {
        let x: f64 = x.trim().parse().map_err(|_| format!("invalid x in '{value}'"))?;
        let y: f64 = y.trim().parse().map_err(|_| format!("invalid y in '{value}'"))?;
        return Ok(FocalPoint::new(x, y));
    }
    convert_storyblok_focal_point(value).map_err(|e| e.to_string())
}

fn parse_attribute(value: &str) -> Result<(String, String), String> {
    let (name, attr_value) = value
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{value}'"))?;
    let name = name.trim();
    if !is_valid_attribute_name(name) {
        return Err(format!("invalid attribute name '{name}' in '{value}'"));
    }
    Ok((name.to_string(), attr_value.to_string()))
}

fn parse_lazy_loading(value: &str) -> Result<LazyLoading, String> {
    match value {
        "browser" => Ok(LazyLoading::Browser),
        "none" => Ok(LazyLoading::None),
        _ => Err(format!("expected browser or none, got '{value}'")),
    }
}

fn parse_decoding(value: &str) -> Result<ImageDecoding, String> {
    match value {
        "async" => Ok(ImageDecoding::Async),
        "sync" => Ok(ImageDecoding::Sync),
        "auto" => Ok(ImageDecoding::Auto),
        "none" => Ok(ImageDecoding::None),
        _ => Err(format!("expected async, sync, auto or none, got '{value}'")),
    }
}

fn parse_fetch_priority(value: &str) -> Result<FetchPriority, String> {
    match value {
        "none" => Ok(FetchPriority::None),
        "auto" => Ok(FetchPriority::Auto),
        "high" => Ok(FetchPriority::High),
        "low" => Ok(FetchPriority::Low),
        _ => Err(format!("expected none, auto, high or low, got '{value}'")),
    }
}
