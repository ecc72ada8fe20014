//! mermaid-sourcemap CLI entry point.
//!
//! Inspect how diagram source maps to rendered elements without a browser:
//! print the identifier→line map, resolve element ids, annotate an SVG
//! produced by the diagram engine, or replay pan/zoom input against a
//! preview configuration.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

use mermaid_sourcemap::annotate::annotate;
use mermaid_sourcemap::viewport::Viewport;
use mermaid_sourcemap::{LineMap, PreviewConfig, resolve_detailed};

/// Map rendered Mermaid elements back to source lines.
#[derive(Parser, Debug)]
#[command(
    name = "mermaid-sourcemap",
    version = env!("MERMAID_SOURCEMAP_VERSION"),
    about = "Map rendered Mermaid elements back to source lines"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the identifier→line map as `id<TAB>line`
    Lines {
        /// Diagram source (reads from stdin if not provided)
        input: Option<String>,
    },
    /// Resolve rendered element ids to source lines
    Resolve {
        /// Diagram source (reads from stdin if not provided)
        #[arg(short = 'i', long = "input")]
        input: Option<String>,

        /// Element ids as emitted by the diagram engine
        #[arg(required = true)]
        element_ids: Vec<String>,
    },
    /// Add resolvable ids and click affordances to an engine SVG
    Annotate {
        /// SVG file produced by the diagram engine
        svg: String,

        /// Write output to this file instead of stdout
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },
    /// List clickable elements of an engine SVG with their source lines
    Elements {
        /// SVG file produced by the diagram engine
        svg: String,

        /// Diagram source (reads from stdin if not provided)
        #[arg(short = 'i', long = "input")]
        input: Option<String>,
    },
    /// Replay wheel and drag input and print the resulting CSS transform
    Viewport {
        #[arg(long = "initial-zoom")]
        initial_zoom: Option<f64>,

        #[arg(long = "min-zoom")]
        min_zoom: Option<f64>,

        #[arg(long = "max-zoom")]
        max_zoom: Option<f64>,

        #[arg(long = "wheel-sensitivity")]
        wheel_sensitivity: Option<f64>,

        /// Wheel delta; repeatable, applied in order before any drag
        #[arg(long = "wheel", allow_negative_numbers = true)]
        wheel: Vec<f64>,

        /// Drag by `DX,DY` pixels; repeatable
        #[arg(long = "drag", allow_hyphen_values = true, value_parser = parse_offset)]
        drag: Vec<(f64, f64)>,
    },
}

fn parse_offset(s: &str) -> Result<(f64, f64), String> {
    let (dx, dy) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad offset '{v}': {e}"))
    };
    Ok((parse(dx)?, parse(dy)?))
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Read from a file, or from stdin when no path is given.
fn read_input(path: Option<&str>) -> String {
    match path {
        Some(path) => fs::read_to_string(path)
            .unwrap_or_else(|e| fail(format!("cannot read '{}': {}", path, e))),
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                fail(format!("cannot read stdin: {}", e));
            }
            buf
        }
    }
}

fn write_output(path: Option<&str>, text: &str) {
    if let Some(path) = path {
        if let Err(e) = fs::write(path, text) {
            fail(format!("cannot write '{}': {}", path, e));
        }
        return;
    }
    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
        fail(format!("cannot write stdout: {}", e));
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Lines { input } => {
            let map = LineMap::from_source(&read_input(input.as_deref()));
            let mut out = String::new();
            for (id, line) in map.iter() {
                out.push_str(&format!("{id}\t{line}\n"));
            }
            write_output(None, &out);
        }
        Command::Resolve { input, element_ids } => {
            let map = LineMap::from_source(&read_input(input.as_deref()));
            let mut out = String::new();
            for element_id in &element_ids {
                match resolve_detailed(element_id, &map) {
                    Some(r) => out.push_str(&format!(
                        "{element_id}\t{}\t{}\t{}\n",
                        r.line, r.node_id, r.strategy
                    )),
                    None => out.push_str(&format!("{element_id}\t-\n")),
                }
            }
            write_output(None, &out);
        }
        Command::Annotate { svg, output } => {
            let markup = read_input(Some(&svg));
            let annotated = annotate(&markup).unwrap_or_else(|e| fail(e));
            write_output(output.as_deref(), &annotated.svg);
        }
        Command::Elements { svg, input } => {
            let markup = read_input(Some(&svg));
            let annotated = annotate(&markup).unwrap_or_else(|e| fail(e));
            let map = LineMap::from_source(&read_input(input.as_deref()));
            let mut out = String::new();
            for element in &annotated.elements {
                let Some(id) = &element.id else {
                    continue;
                };
                let line = resolve_detailed(id, &map)
                    .map_or_else(|| "-".to_string(), |r| r.line.to_string());
                out.push_str(&format!("{id}\t{:?}\t{line}\n", element.kind));
            }
            write_output(None, &out);
        }
        Command::Viewport {
            initial_zoom,
            min_zoom,
            max_zoom,
            wheel_sensitivity,
            wheel,
            drag,
        } => {
            let defaults = PreviewConfig::default();
            let config = PreviewConfig {
                initial_zoom: initial_zoom.unwrap_or(defaults.initial_zoom),
                min_zoom: min_zoom.unwrap_or(defaults.min_zoom),
                max_zoom: max_zoom.unwrap_or(defaults.max_zoom),
                wheel_sensitivity: wheel_sensitivity.unwrap_or(defaults.wheel_sensitivity),
                ..defaults
            };
            let mut viewport = Viewport::try_new(&config).unwrap_or_else(|e| fail(e));
            for delta in wheel {
                viewport.wheel(delta);
            }
            for (dx, dy) in drag {
                viewport.pointer_down(0.0, 0.0);
                viewport.pointer_move(dx, dy);
                viewport.pointer_up();
            }
            write_output(None, &format!("{}\n", viewport.css_transform()));
        }
    }
}
