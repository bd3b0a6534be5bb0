// Command-line interface for downmark
//
// This binary converts exported HTML/XHTML documents into lightweight markup
// (AsciiDoc, Textile) and reflows existing markup documents in place.
//
// The core capabilities use the downmark crate; this layer only deals with
// files, flags, and printing. Recoverable conversion warnings go to stderr;
// structural errors abort with a non-zero exit.
//
// Converting:
//
// The target dialect can be auto-detected from the output file extension,
// while being overwrittable by an explicit --to flag.
// Usage:
//  downmark <input> [--to <dialect>] [--output <file>]   - Convert a document (default)
//  downmark convert <input> [--to <dialect>] [...]       - Same as above (explicit)
//  downmark reflow <input> [--output <file>]             - Reflow a markup document in place
//  downmark list-dialects                                - List available target dialects

use clap::{Arg, ArgAction, Command, ValueHint};
use downmark::{
    reformat_blocks, ConvertOptions, DialectRegistry, Hints, Pipeline, Report, Stylesheet,
};
use downmark_config::{DownmarkConfig, Loader};
use std::fs;

fn build_cli() -> Command {
    Command::new("downmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting documents to lightweight markup")
        .long_about(
            "downmark is a command-line tool for turning exported HTML/XHTML documents\n\
            into lightweight markup, and for reflowing markup documents in place.\n\n\
            Commands:\n  \
            - convert: Translate a document to AsciiDoc or Textile (default)\n  \
            - reflow:  Rewrap an existing markup document's paragraphs\n  \
            - list-dialects: Show available target dialects\n\n\
            Examples:\n  \
            downmark page.html --to asciidoc            # Convert to AsciiDoc (stdout)\n  \
            downmark page.html -o page.adoc             # Dialect detected from extension\n  \
            downmark page.html --stylesheet page.css    # Use exported CSS for hints\n  \
            downmark reflow notes.adoc                  # Rewrap paragraphs at 80 columns",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a downmark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("max-line-length")
                .long("max-line-length")
                .value_name("COLUMNS")
                .help("Column limit for word wrapping")
                .value_parser(clap::value_parser!(usize))
                .global(true),
        )
        .arg(
            Arg::new("sentence-mode")
                .long("sentence-mode")
                .help("Start each sentence on its own line")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document to a target dialect (default command)")
                .long_about(
                    "Convert an exported HTML/XHTML document to lightweight markup.\n\n\
                    Supported dialects:\n  \
                    - asciidoc: AsciiDoc (.adoc)\n  \
                    - textile:  Textile (.textile)\n\n\
                    The target dialect is auto-detected from the output file extension\n\
                    when -o is given; otherwise the configured default applies.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    downmark convert page.html --to textile          # Convert (stdout)\n  \
                    downmark convert page.html -o page.adoc          # Detected from extension\n  \
                    downmark convert page.html --hints fix.hints     # Regex pre-pass",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_name("DIALECT")
                        .help("Target dialect (e.g. asciidoc, textile)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("stylesheet")
                        .long("stylesheet")
                        .value_name("PATH")
                        .help("CSS stylesheet exported with the document")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("hints")
                        .long("hints")
                        .value_name("PATH")
                        .help("Hints file of regex rewrites applied before translation")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("PATH")
                        .help("Output file (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("reflow")
                .about("Rewrap an existing markup document's paragraphs")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("PATH")
                        .help("Output file (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("list-dialects").about("List available target dialects"))
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // Check if this is a "missing subcommand" error by seeing if
            // the first arg looks like a file
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "convert"
                && args[1] != "reflow"
                && args[1] != "list-dialects"
                && args[1] != "help"
            {
                // Inject "convert" as the subcommand
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

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    let mut options = ConvertOptions::from(&config);
    if let Some(columns) = matches.get_one::<usize>("max-line-length") {
        options.max_line_length = *columns;
    }
    if matches.get_flag("sentence-mode") {
        options.sentence_mode = true;
        options.paragraph_layout = false;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to_arg = sub_matches.get_one::<String>("to");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());

            // Auto-detect --to from the output filename if not provided
            let to = if let Some(t) = to_arg {
                t.to_string()
            } else if let Some(detected) =
                output.and_then(|path| DialectRegistry::default().detect_dialect_from_filename(path))
            {
                detected
            } else {
                config.convert.dialect.clone()
            };

            let stylesheet = sub_matches.get_one::<String>("stylesheet").map(|s| s.as_str());
            let hints = sub_matches.get_one::<String>("hints").map(|s| s.as_str());
            handle_convert_command(input, &to, stylesheet, hints, output, &options);
        }
        Some(("reflow", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_reflow_command(input, output, &options);
        }
        Some(("list-dialects", _)) => {
            handle_list_dialects_command();
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> DownmarkConfig {
    let loader = Loader::new().with_optional_file("downmark.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn handle_convert_command(
    input: &str,
    to: &str,
    stylesheet_path: Option<&str>,
    hints_path: Option<&str>,
    output: Option<&str>,
    options: &ConvertOptions,
) {
    let registry = DialectRegistry::default();

    let dialect = registry.get(to).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let stylesheet = stylesheet_path.map(|path| {
        let text = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file '{path}': {e}");
            std::process::exit(1);
        });
        Stylesheet::parse(&text).unwrap_or_else(|e| {
            eprintln!("Stylesheet error: {e}");
            std::process::exit(1);
        })
    });

    let hints = hints_path.map(|path| {
        let text = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file '{path}': {e}");
            std::process::exit(1);
        });
        Hints::parse(&text).unwrap_or_else(|e| {
            eprintln!("Hints error: {e}");
            std::process::exit(1);
        })
    });

    let mut pipeline = Pipeline::new(dialect).with_options(options.clone());
    if let Some(sheet) = stylesheet.as_ref() {
        pipeline = pipeline.with_stylesheet(sheet);
    }
    if let Some(hints) = hints.as_ref() {
        pipeline = pipeline.with_hints(hints);
    }

    let mut report = Report::new();
    let result = pipeline.run_to_string(&source, &mut report).unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });

    for warning in report.warnings() {
        eprintln!("warning: {warning}");
    }

    write_result(output, &result);
}

fn handle_reflow_command(input: &str, output: Option<&str>, options: &ConvertOptions) {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let result = reformat_blocks(&source, options).unwrap_or_else(|e| {
        eprintln!("Reflow error: {e}");
        std::process::exit(1);
    });

    write_result(output, &result);
}

fn handle_list_dialects_command() {
    let registry = DialectRegistry::default();
    for name in registry.list_dialects() {
        match registry.get(&name) {
            Ok(dialect) => println!("{name:<10} {}", dialect.description()),
            Err(_) => println!("{name}"),
        }
    }
}

fn write_result(output: Option<&str>, result: &str) {
    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => {
            print!("{result}");
        }
    }
}
