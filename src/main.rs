use std::path::PathBuf;

use tessel::components::{global_registry, register_component, BadgeRenderer, Dimensions};
use tessel::compose::TileComposer;
use tessel::config::load_config;
use tessel::event::EventRecord;
use tessel::layout::LayoutType;
use tessel::render::{Font, RecordingSurface};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Arguments of `tessel render`.
#[derive(Debug, Clone, PartialEq)]
struct RenderArgs {
    event: PathBuf,
    width: f64,
    height: f64,
    layout: Option<LayoutType>,
    config: Option<PathBuf>,
    svg: Option<PathBuf>,
}

fn parse_dimension(flag: &str, value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(px) if px.is_finite() && px > 0.0 => Ok(px),
        _ => Err(format!("{} expects a positive number of pixels, got '{}'", flag, value)),
    }
}

fn parse_render_args(args: &[String]) -> Result<RenderArgs, String> {
    let mut event = None;
    let mut width = None;
    let mut height = None;
    let mut layout = None;
    let mut config = None;
    let mut svg = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| format!("{} expects a value", flag))?;
        match flag.as_str() {
            "--event" => event = Some(PathBuf::from(value)),
            "--width" => width = Some(parse_dimension(flag, value)?),
            "--height" => height = Some(parse_dimension(flag, value)?),
            "--layout" => layout = Some(value.parse::<LayoutType>()?),
            "--config" => config = Some(PathBuf::from(value)),
            "--svg" => svg = Some(PathBuf::from(value)),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(RenderArgs {
        event: event.ok_or("--event is required")?,
        width: width.ok_or("--width is required")?,
        height: height.ok_or("--height is required")?,
        layout,
        config,
        svg,
    })
}

fn parse_config_flag(args: &[String]) -> Result<Option<PathBuf>, String> {
    match args {
        [] => Ok(None),
        [flag, path] if flag == "--config" => Ok(Some(PathBuf::from(path))),
        _ => Err(format!("Unknown argument: {}", args.join(" "))),
    }
}

/// Registers the components that ship outside the built-in set.
fn register_components() {
    if let Err(err) = register_component(BadgeRenderer) {
        log::error!("Failed to register the badge component: {}", err);
    }
}

fn run_render(args: RenderArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref());
    let contents = std::fs::read_to_string(&args.event)
        .map_err(|e| format!("Failed to read {:?}: {}", args.event, e))?;
    let event: EventRecord = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse event {:?}: {}", args.event, e))?;

    let composer = TileComposer::from_config(&config, global_registry());
    let dimensions = Dimensions::new(args.width, args.height);
    let mut surface = RecordingSurface::new(Font::new(
        config.tile.font_family.clone(),
        config.tile.font_size,
    ));
    let outcome = match args.layout {
        Some(layout) => composer.compose_with_layout(&mut surface, &event, dimensions, layout),
        None => composer.compose(&mut surface, &event, dimensions),
    };

    for skipped in &outcome.skipped {
        log::warn!("Skipped '{}': {}", skipped.name, skipped.reason);
    }

    if let Some(path) = &args.svg {
        std::fs::write(path, surface.to_svg(dimensions.width, dimensions.height))
            .map_err(|e| format!("Failed to write {:?}: {}", path, e))?;
        log::info!("Wrote {:?}", path);
    }

    let report = serde_json::json!({
        "event": event.id,
        "dimensions": dimensions,
        "layout": outcome.layout_type,
        "display_time": outcome.display_time,
        "final_cursor_y": outcome.final_cursor_y,
        "components": outcome.entries,
        "skipped": outcome.skipped,
        "ops": surface.ops(),
    });
    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn run_components(config: Option<PathBuf>) {
    let config = load_config(config.as_deref());
    let registry = global_registry();
    let profiles = config.layout_profiles();
    for name in registry.names() {
        let layouts: Vec<&str> = LayoutType::ALL
            .iter()
            .filter(|layout| profiles.get(**layout).has(&name))
            .map(|layout| layout.as_str())
            .collect();
        if layouts.is_empty() {
            println!("{}", name);
        } else {
            println!("{:<16} {}", name, layouts.join(", "));
        }
    }
}

fn print_help() {
    println!(
        "tessel {}
Adaptive event tile renderer for booking calendars

USAGE:
    tessel render --event <FILE> --width <PX> --height <PX> [OPTIONS]
    tessel components [--config <FILE>]

RENDER OPTIONS:
    --event <FILE>     Event record as JSON
    --width <PX>       Tile width in pixels
    --height <PX>      Tile height in pixels
    --layout <TYPE>    Force minimal, short, medium, standard or large
    --config <FILE>    Config file to use instead of the default
    --svg <FILE>       Also write the painted tile as SVG

OPTIONS:
    -h, --help         Print this help message
    -v, --version      Print version information

ENVIRONMENT:
    RUST_LOG           Set log level (error, warn, info, debug, trace)

CONFIG:
    ~/.config/tessel/config.toml

EXAMPLES:
    tessel render --event event.json --width 180 --height 90
    RUST_LOG=tessel::trace=debug tessel render --event event.json --width 80 --height 40",
        VERSION
    );
}

fn init_logging() {
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    logger
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {:>5} {}] {}",
                chrono::Utc::now().to_rfc3339(),
                record.level(),
                record.target(),
                record.args()
            )?;
            buf.flush()
        })
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let Some(command) = args.first() else {
        print_help();
        return;
    };

    match command.as_str() {
        "-h" | "--help" => print_help(),
        "-v" | "--version" => println!("tessel {}", VERSION),
        "render" => {
            init_logging();
            register_components();
            let result = parse_render_args(&args[1..]).and_then(run_render);
            if let Err(err) = result {
                eprintln!("{}", err);
                eprintln!("Try 'tessel --help' for more information.");
                std::process::exit(1);
            }
        }
        "components" => {
            init_logging();
            register_components();
            match parse_config_flag(&args[1..]) {
                Ok(config) => run_components(config),
                Err(err) => {
                    eprintln!("{}", err);
                    std::process::exit(1);
                }
            }
        }
        other => {
            eprintln!("Unknown argument: {}", other);
            eprintln!("Try 'tessel --help' for more information.");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_render_arguments() {
        let parsed = parse_render_args(&args(&[
            "--event",
            "event.json",
            "--width",
            "180",
            "--height",
            "90",
            "--layout",
            "large",
        ]))
        .unwrap();
        assert_eq!(parsed.event, PathBuf::from("event.json"));
        assert_eq!(parsed.width, 180.0);
        assert_eq!(parsed.layout, Some(LayoutType::Large));
        assert_eq!(parsed.svg, None);
    }

    #[test]
    fn rejects_missing_and_bad_values() {
        assert!(parse_render_args(&args(&["--width", "180", "--height", "90"])).is_err());
        assert!(parse_render_args(&args(&["--event", "e.json", "--width", "-3"])).is_err());
        assert!(parse_render_args(&args(&["--event"])).is_err());
        assert!(parse_render_args(&args(&["--colour", "red"])).is_err());
    }

    #[test]
    fn components_accepts_optional_config() {
        assert_eq!(parse_config_flag(&[]), Ok(None));
        assert_eq!(
            parse_config_flag(&args(&["--config", "c.toml"])),
            Ok(Some(PathBuf::from("c.toml")))
        );
        assert!(parse_config_flag(&args(&["--verbose"])).is_err());
    }
}
