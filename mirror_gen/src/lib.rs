//! Mirror type synthesis.
//!
//! Given fully qualified struct names from a loaded [`Namespace`], the
//! synthesizer walks each type's structural graph and produces a
//! [`DeclarationTree`]: layout-identical mirror declarations, one
//! `make_<name>` conversion function per requested type, and the method
//! stubs generic instantiations need to satisfy their constraints. The
//! renderer turns the tree into Go source text.
//!
//! [`Namespace`]: mirror_loader::Namespace

pub mod context;
pub mod error;
pub mod flatten;
pub mod imports;
pub mod recursion;
pub mod render;
pub mod source;
pub mod stubs;
pub mod synth;
pub mod translate;
pub mod tree;
pub mod worklist;

#[cfg(test)]
mod test_support;

pub use error::SynthesisError;
pub use flatten::flatten;
pub use imports::{ImportAccumulator, ImportGroup};
pub use recursion::is_recursive;
pub use render::{render, RenderOptions};
pub use source::TypeSource;
pub use synth::{synthesize, MirrorSynthesizer};
pub use tree::DeclarationTree;

/// Synthesize the mirrors for `roots` and render them in one step.
pub fn generate(
    source: &dyn TypeSource,
    roots: &[String],
    options: &RenderOptions,
) -> Result<String, SynthesisError> {
    let tree = synthesize(source, roots)?;
    Ok(render(&tree, options))
}
