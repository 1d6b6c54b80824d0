// Command-line interface for marc
//
// This binary is a thin shell over marc-babel: converting between formats, formatting marc files
// and showing a document in all four representations the way an editor with four panes would.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  marc <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  marc convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  marc format <input> [--check]         - Print the canonical form of a marc file
//  marc sync <input> [--from <format>]   - Run one edit through the hub and print every pane
//  marc example [--reformat]             - Print the example document
//  marc --list-formats                   - List available formats
//
// Configuration:
//
// marc.toml in the working directory is picked up when present, --config adds an explicit file on
// top. --log-level overrides logging.level; logs go to stderr so stdout stays pipeable.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use marc_babel::{BabelConverter, Converter, Document, FormatKind, SyncHub};
use marc_config::{LogLevel, Loader, MarcConfig};
use std::fs;

const FORMATS: &[&str] = &["marc", "json", "yaml", "toml"];
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
const SUBCOMMANDS: &[&str] = &["convert", "format", "sync", "example", "help"];

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
        .value_hint(ValueHint::Other)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print the document snapshot as JSON instead of panes")
        .action(ArgAction::SetTrue)
}

fn build_cli() -> Command {
    Command::new("marc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert, format and synchronize marc documents")
        .long_about(
            "marc is a command-line tool for the marc assignment syntax and its JSON, YAML and\n\
            TOML equivalents.\n\n\
            Commands:\n  \
            - convert: Transform between formats (default command)\n  \
            - format:  Print the canonical form of a marc file\n  \
            - sync:    Show a file in all four representations\n  \
            - example: Show the example document\n\n\
            Examples:\n  \
            marc config.marc --to yaml            # Convert to YAML (outputs to stdout)\n  \
            marc config.toml --to marc -o out.marc\n  \
            marc format config.marc --check       # Fail when the file is not canonical\n  \
            marc sync config.yaml                 # Print MARC, JSON, YAML and TOML panes",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a marc.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Verbosity of diagnostics on stderr (overrides logging.level)")
                .value_parser(clap::builder::PossibleValuesParser::new(LOG_LEVELS))
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert a document between formats. Every conversion goes through JSON.\n\n\
                    Supported formats: marc, json, yaml, toml\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(input_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Print the canonical form of a marc file")
                .long_about(
                    "Parse a marc file, check that it evaluates, and print it in canonical layout.\n\
                    Comments and entry order are kept.\n\n\
                    Examples:\n  \
                    marc format input.marc                  # Format to stdout\n  \
                    marc format input.marc --check          # Exit 1 if not canonical",
                )
                .arg(input_arg())
                .arg(
                    Arg::new("check")
                        .long("check")
                        .help("Exit with status 1 instead of printing when the file is not canonical")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("sync")
                .about("Show a file in all four representations")
                .long_about(
                    "Treat the file as an edit of its format and print every representation,\n\
                    the way the four editor panes would show them. Panes that fail show the\n\
                    error instead, and the command exits with status 1.",
                )
                .arg(input_arg())
                .arg(from_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("example")
                .about("Show the example document")
                .arg(json_arg())
                .arg(
                    Arg::new("reformat")
                        .long("reformat")
                        .help("Run the formatter on the marc pane first")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1 && !args[1].starts_with('-') && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_one::<String>("log-level").map(|s| s.as_str()),
    );
    init_logging(config.logging.level);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let to = required(sub_matches, "to");
            let from = source_format(sub_matches, input, &config);
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &config);
        }
        Some(("format", sub_matches)) => {
            let input = required(sub_matches, "input");
            handle_format_command(input, sub_matches.get_flag("check"), &config);
        }
        Some(("sync", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = source_format(sub_matches, input, &config);
            handle_sync_command(input, &from, sub_matches.get_flag("json"), &config);
        }
        Some(("example", sub_matches)) => {
            handle_example_command(
                sub_matches.get_flag("json"),
                sub_matches.get_flag("reformat"),
                &config,
            );
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing argument '{name}'");
            std::process::exit(1);
        }
    }
}

/// The explicit --from, or the format owning the input's extension.
fn source_format(matches: &ArgMatches, input: &str, config: &MarcConfig) -> String {
    if let Some(from) = matches.get_one::<String>("from") {
        return from.clone();
    }
    match config
        .converter()
        .registry()
        .detect_format_from_filename(input)
    {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn print_text(text: &str) {
    if text.is_empty() || text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    config: &MarcConfig,
) {
    let converter = config.converter();
    let registry = converter.registry();

    // Validate formats exist
    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let source = read_input(input);
    tracing::debug!(input, from, to, "Converting");

    let tree = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    let result = registry.serialize(&tree, to).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print_text(&result),
    }
}

/// Handle the format command
fn handle_format_command(input: &str, check: bool, config: &MarcConfig) {
    let source = read_input(input);
    let formatted = config.converter().canonicalize(&source).unwrap_or_else(|e| {
        eprintln!("{}", e.message);
        std::process::exit(1);
    });

    if check {
        if formatted != source {
            eprintln!("'{input}' is not formatted");
            std::process::exit(1);
        }
        return;
    }
    print!("{formatted}");
}

/// Handle the sync command
fn handle_sync_command(input: &str, from: &str, json: bool, config: &MarcConfig) {
    let kind: FormatKind = from.parse().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    let source = read_input(input);
    let hub = SyncHub::new(config.converter());
    let doc = hub.transition(Document::empty(), kind, &source);
    print_document(&doc, json);
    if doc.has_errors() {
        std::process::exit(1);
    }
}

/// Handle the example command
fn handle_example_command(json: bool, reformat: bool, config: &MarcConfig) {
    let hub: SyncHub<BabelConverter> = SyncHub::new(config.converter());
    let doc = hub.initial().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    let doc = if reformat { hub.reformat(doc) } else { doc };
    print_document(&doc, json);
}

fn print_document(doc: &Document, json: bool) {
    if json {
        match serde_json::to_string_pretty(doc) {
            Ok(snapshot) => println!("{snapshot}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    for (index, (kind, slot)) in doc.slots().enumerate() {
        if index > 0 {
            println!();
        }
        match slot.error() {
            None => println!("== {kind} =="),
            Some(error) => println!("== {kind} ({} error) ==", error.kind),
        }
        print_text(&slot.text);
    }
}

/// Handle the list-formats flag
fn handle_list_formats_command(config: &MarcConfig) {
    let converter = config.converter();
    let registry = converter.registry();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            println!(
                "  {:<6} {} (.{})",
                name,
                format.description(),
                format.file_extensions().join(", .")
            );
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>, log_level: Option<&str>) -> MarcConfig {
    let loader = Loader::new().with_optional_file("marc.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = match log_level {
        Some(level) => loader.set_override("logging.level", level),
        None => Ok(loader),
    };

    loader.and_then(Loader::build).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn init_logging(level: LogLevel) {
    let max_level = match level {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}
