//! Command-line interface for footnotes
//! Reads an HTML file, consolidates the footnote markers in every selected
//! block, and writes the transformed document.
//!
//! Usage:
//!   footnotes <path> [--blocks <selector>] [--output <path>]   - Process a file
//!   footnotes <path> --config footnotes.toml --destination notes

use clap::{Arg, ArgAction, Command};
use footnotes::config::Loader;
use footnotes::{process_html, SelectorList};

fn main() {
    let matches = Command::new("footnotes")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Consolidates inline footnote markers in an HTML document")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the HTML file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("blocks")
                .long("blocks")
                .short('b')
                .help("Selector for the blocks to process, each as its own footnote group")
                .default_value("body"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("markers")
                .long("markers")
                .help("Selector list for footnote sources"),
        )
        .arg(
            Arg::new("prepend")
                .long("prepend")
                .help("Selector list for markers whose link is prepended"),
        )
        .arg(
            Arg::new("destination")
                .long("destination")
                .help("Base id for the footnote list"),
        )
        .arg(
            Arg::new("content-anchor")
                .long("content-anchor")
                .help("Selector for the element the created list is appended to"),
        )
        .arg(
            Arg::new("single-destination")
                .long("single-destination")
                .help("Collect all groups into one shared footnote list")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("unordered")
                .long("unordered")
                .help("Use an unnumbered (ul) footnote list")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the transformed document here instead of stdout"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable diagnostic output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");

    let mut loader = Loader::new();
    if let Some(config_path) = matches.get_one::<String>("config") {
        loader = loader.with_file(config_path);
    }
    loader = apply_overrides(loader, &matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let opts = loader
        .build()
        .and_then(|file_opts| file_opts.into_options())
        .unwrap_or_else(|e| {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        });

    if opts.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let blocks = matches
        .get_one::<String>("blocks")
        .expect("blocks has a default value");
    let blocks = SelectorList::parse(blocks).unwrap_or_else(|e| {
        eprintln!("Invalid --blocks selector: {}", e);
        std::process::exit(1);
    });

    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {}", path, e);
        std::process::exit(1);
    });

    let output = process_html(&source, &blocks, &opts).unwrap_or_else(|e| {
        eprintln!("Processing error: {}", e);
        std::process::exit(1);
    });

    match matches.get_one::<String>("output") {
        Some(out_path) => {
            if let Err(e) = std::fs::write(out_path, output) {
                eprintln!("Cannot write {}: {}", out_path, e);
                std::process::exit(1);
            }
        }
        None => println!("{}", output),
    }
}

/// Map CLI flags onto configuration keys so they layer over file values.
fn apply_overrides(
    mut loader: Loader,
    matches: &clap::ArgMatches,
) -> Result<Loader, footnotes::FootnoteError> {
    for (flag, key) in [
        ("markers", "markers"),
        ("prepend", "prepend"),
        ("destination", "destination-id"),
        ("content-anchor", "content-anchor"),
    ] {
        if let Some(value) = matches.get_one::<String>(flag) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }
    if matches.get_flag("single-destination") {
        loader = loader.set_override("single-destination", true)?;
    }
    if matches.get_flag("unordered") {
        loader = loader.set_override("ordered-list", false)?;
    }
    if matches.get_flag("debug") {
        loader = loader.set_override("debug", true)?;
    }
    Ok(loader)
}
