//! Export of a loaded graph for the view layer and external tools.
//!
//! - **JSON**: the full dataset, or a nested pedigree for tree and fan charts
//! - **DOT**: Graphviz rendering of people with parent and spouse edges

pub mod dot;
pub mod json;

pub use dot::{export_dot, export_dot_styled, DotOptions};
pub use json::{export_json, export_pedigree_json, pedigree, write_json, PedigreeNode};
