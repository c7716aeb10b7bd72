//! XML escaping module.
//!
//! Translates raw text into the two XML-safe forms the layout needs:
//! attribute values and element character data. Illegal characters are
//! remediated first according to a configurable policy, then entities
//! are escaped, then control characters become numeric references.

pub mod policy;
pub mod xml;

pub use policy::*;
pub use xml::*;
