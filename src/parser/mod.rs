//! Parsers for theme declarations and custom-property tables.
//!
//! Both inputs are YAML documents (JSON works too, as a YAML subset).
//! Parsing builds the immutable declaration model; it never resolves
//! aliases or checks keyframe references.
//!
//! # Usage
//!
//! ```ignore
//! use tokenc::parser::{parse_declarations, parse_properties};
//!
//! let tree = parse_declarations(&std::fs::read_to_string("theme.yaml")?)?;
//! let properties = parse_properties(&std::fs::read_to_string("properties.yaml")?)?;
//! ```

mod motion;
mod properties;
mod scalar;
mod theme;

pub use properties::parse_properties;
pub use theme::parse_declarations;
