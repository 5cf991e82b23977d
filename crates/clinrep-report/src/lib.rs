//! Report assembly and rendering.
//!
//! [`assemble`] orders extracted records into a [`Report`]; a [`Renderer`]
//! turns the report into bytes:
//!
//! - **DOCX**: Office Open XML document with bold `FLAG` markers
//! - **JSON**: the report structure as pretty-printed JSON
//! - **Text**: one line per item, for terminals and logs

mod assemble;
mod render;

pub use assemble::{AssemblyOptions, assemble};
pub use render::{DocxRenderer, JsonRenderer, OutputFormat, Renderer, TextRenderer, renderer_for};

pub use clinrep_model::Report;
