//! AsciiDoc dialect tests
//!
//! Tests for HTML → AsciiDoc conversion.

mod convert;
mod tables;
