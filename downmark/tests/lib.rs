// This file is required to make `cargo test` discover tests in subdirectories.

#[cfg(test)]
mod asciidoc;

#[cfg(test)]
mod reflow;

#[cfg(test)]
mod textile;
