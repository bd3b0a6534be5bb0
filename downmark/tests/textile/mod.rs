//! Textile dialect tests
//!
//! Tests for HTML → Textile conversion.

mod export;
