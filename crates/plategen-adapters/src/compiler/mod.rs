//! Geometry compiler adapters.

mod openscad;

pub use openscad::{DEFAULT_BINARY, OpenScadCompiler};
