use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the dialect names from the downmark crate.
// We need to duplicate these here since build scripts can't access src/ modules
const AVAILABLE_DIALECTS: &[&str] = &["asciidoc", "textile"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("downmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting documents to lightweight markup")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input file path")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .value_name("DIALECT")
                .help("Target dialect")
                .value_parser(clap::builder::PossibleValuesParser::new(
                    AVAILABLE_DIALECTS,
                ))
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Output file (defaults to stdout)")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("sentence-mode")
                .long("sentence-mode")
                .help("Start each sentence on its own line")
                .action(ArgAction::SetTrue),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "downmark", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "downmark", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "downmark", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
