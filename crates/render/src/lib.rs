//! Static substitution pass for statically rendered output.
//!
//! Unlike the live decoration pipeline this runs once per render: the host
//! hands over a finished [`OutputTree`], the [`ShortcodeProcessor`] registers
//! a [`ShortcodeChild`] for every colon-delimited inline code element, and
//! loading those children swaps each element for its glyph. The tree is not
//! revisited afterwards.

mod context;
mod error;
mod processor;
mod tree;

pub use context::{RenderChild, RenderContext};
pub use error::{RenderError, Result};
pub use processor::{PostProcessor, ShortcodeChild, ShortcodeProcessor};
pub use tree::{NodeId, OutputNode, OutputSpec, OutputTree};
