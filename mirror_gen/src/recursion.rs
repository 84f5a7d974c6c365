use crate::source::TypeSource;
use mirror_types::{Signature, TypeKind, TypeRef};
use std::collections::HashSet;

/// Whether a named type can reach itself through its structure.
///
/// The walk follows fields, pointees, container elements, signatures,
/// interface members and type arguments, and descends into the declaration
/// of every named type it meets. Reaching another instantiation of the
/// subject's own declaration counts as reaching the subject. Types without
/// a declaration are leaves, and a type that is not named is never
/// recursive.
pub fn is_recursive(source: &dyn TypeSource, ty: &TypeKind) -> bool {
    let TypeKind::Named(subject) = ty else {
        return false;
    };

    let mut detector = RecursionDetector {
        source,
        subject: subject.qualified_name(),
        expanded: HashSet::new(),
    };

    detector.expanded.insert(detector.subject.clone());
    let recursive =
        subject.args.iter().any(|arg| detector.visit(arg)) || detector.expand(subject);

    tracing::trace!(subject = %subject, recursive, "recursion check");

    recursive
}

struct RecursionDetector<'a> {
    source: &'a dyn TypeSource,
    subject: String,
    /* Qualified declaration names, so instantiations are expanded once */
    expanded: HashSet<String>,
}

impl RecursionDetector<'_> {
    fn visit(&mut self, ty: &TypeKind) -> bool {
        match ty {
            TypeKind::Basic(_) | TypeKind::TypeParam(_) => false,
            TypeKind::Named(type_ref) => self.visit_named(type_ref),
            TypeKind::Pointer(elem) | TypeKind::Slice(elem) => self.visit(elem),
            TypeKind::Map(map) => self.visit(&map.key) || self.visit(&map.value),
            TypeKind::Array(array) => self.visit(&array.element),
            TypeKind::Chan(chan) => self.visit(&chan.element),
            TypeKind::Struct(struct_type) => struct_type
                .fields
                .iter()
                .any(|field| self.visit(&field.field_type)),
            TypeKind::Interface(iface) => {
                iface.embedded.iter().any(|e| self.visit(e))
                    || iface.methods.iter().any(|m| self.visit_signature(&m.signature))
            }
            TypeKind::Signature(sig) => self.visit_signature(sig),
        }
    }

    fn visit_signature(&mut self, sig: &Signature) -> bool {
        sig.params
            .iter()
            .chain(sig.results.iter())
            .any(|p| self.visit(&p.param_type))
    }

    fn visit_named(&mut self, type_ref: &TypeRef) -> bool {
        let key = type_ref.qualified_name();
        if key == self.subject {
            return true;
        }

        /* Arguments are walked on every visit: a declaration already expanded
           through one instantiation may be reached again with new arguments */
        if type_ref.args.iter().any(|arg| self.visit(arg)) {
            return true;
        }

        if !self.expanded.insert(key) {
            return false;
        }

        self.expand(type_ref)
    }

    fn expand(&mut self, type_ref: &TypeRef) -> bool {
        let source = self.source;
        match source.declaration(&type_ref.package, &type_ref.name) {
            Some(decl) => self.visit(&decl.underlying),
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "recursion_tests.rs"]
mod recursion_tests;
