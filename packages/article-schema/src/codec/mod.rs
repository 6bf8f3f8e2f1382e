//! Attribute codecs.
//!
//! Pure functions that normalize loosely formatted markup values into small
//! canonical sets, and render canonical values back into markup. Nothing in
//! here knows about node types; the catalog wires these into attribute
//! specs.

mod align;
mod border;
mod color;
mod colwidth;
mod font_size;
pub mod style;

pub use align::{normalize_alignment, Alignment};
pub use border::{normalize_border_style, BorderStyle};
pub use color::{normalize_color, CanonicalColor};
pub use colwidth::{parse_colwidth, render_colwidth};
pub use font_size::{map_font_size_level_to_percent, map_percent_to_font_size_level, FontSizeLevel};
