//! Core domain types for tokenc.
//!
//! - `TokenValue` / `TokenGroup` - declared token trees
//! - `AliasTemplate` - values with `var(--name)` indirections
//! - `CustomPropertyTable` - externally supplied custom properties, with modes
//! - `KeyframeDefinition` / `AnimationBinding` - motion declarations
//! - `ResolvedTokenTable` - the flat output table

mod animation;
mod colour;
mod declaration;
mod keyframe;
mod properties;
mod table;
mod value;

pub use animation::{parse_time, AnimationBinding, CompiledAnimation, Iterations, Timing};
pub use colour::{normalize_colour, ColorFormat, Colour};
pub use declaration::{DeclarationTree, TokenGroup, DEFAULT_KEY};
pub use keyframe::{KeyframeDefinition, KeyframePhase, PhaseOffset, PropertySet, TimelinePhase};
pub use properties::{CustomPropertyTable, PropertySource, PropertyView};
pub use table::{ResolvedTokenTable, TableSection};
pub use value::{AliasTemplate, Segment, TokenValue};
