//! Layout template bundles.
//!
//! A bundle is the complete set of string templates controlling the
//! textual rendering of each XML section. Two built-ins are shipped;
//! hosts may also supply a fully custom bundle.

pub mod bundle;

pub use bundle::*;
