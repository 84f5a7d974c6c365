use crate::imports::ImportAccumulator;
use crate::worklist::Worklist;
use mirror_types::{InterfaceType, TypeKind};

/// A generic instantiation whose type argument must keep satisfying an
/// interface constraint once it is replaced by its mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obligation {
    /* Constraint with the instantiation's arguments substituted */
    pub constraint: InterfaceType,
    pub argument: TypeKind,
}

/// Mutable state of one synthesis run.
#[derive(Debug, Default)]
pub struct SynthesisContext {
    pub worklist: Worklist,
    pub imports: ImportAccumulator,
    pub obligations: Vec<Obligation>,
}

impl SynthesisContext {
    pub fn new() -> Self {
        Self::default()
    }
}
