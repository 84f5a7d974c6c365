//! Rewrites source type expressions into mirror type expressions.
//!
//! Named types that code outside their package can spell are referenced
//! directly. Everything else is either inlined or, when it must have a name
//! of its own (private structs, recursive types, generic declarations,
//! interfaces exposing private members), outlined: queued on the worklist
//! and referenced by its flattened name.

use crate::context::{Obligation, SynthesisContext};
use crate::error::SynthesisError;
use crate::recursion::is_recursive;
use crate::source::TypeSource;
use crate::tree::{
    FieldDescriptor, FuncParam, FuncType, InterfaceElement, InterfaceShape, StructShape,
    TypeExpr,
};
use mirror_types::{
    is_exported, InterfaceType, Method, Param, Signature, StructType, TypeDecl, TypeKind, TypeRef,
};
use std::collections::HashSet;

pub struct FieldTranslator<'a> {
    source: &'a dyn TypeSource,
    ctx: &'a mut SynthesisContext,
    /* Type being synthesized, for error messages */
    owner: &'a str,
}

impl<'a> FieldTranslator<'a> {
    pub fn new(source: &'a dyn TypeSource, ctx: &'a mut SynthesisContext, owner: &'a str) -> Self {
        Self { source, ctx, owner }
    }

    /// Translate `ty`. `scope` lists the type parameters that may appear.
    pub fn translate(&mut self, ty: &TypeKind, scope: &[String]) -> Result<TypeExpr, SynthesisError> {
        match ty {
            TypeKind::Named(type_ref) => self.translate_named(type_ref, scope),
            TypeKind::Basic(name) => Ok(TypeExpr::ident(name.clone())),
            TypeKind::TypeParam(name) => {
                if scope.contains(name) {
                    Ok(TypeExpr::ident(name.clone()))
                } else {
                    Err(SynthesisError::UnboundTypeParam {
                        type_name: self.owner.to_string(),
                        param: name.clone(),
                    })
                }
            }
            TypeKind::Pointer(elem) => Ok(TypeExpr::pointer(self.translate(elem, scope)?)),
            TypeKind::Slice(elem) => Ok(TypeExpr::Slice(Box::new(self.translate(elem, scope)?))),
            TypeKind::Map(map) => Ok(TypeExpr::Map {
                key: Box::new(self.translate(&map.key, scope)?),
                value: Box::new(self.translate(&map.value, scope)?),
            }),
            TypeKind::Array(array) => Ok(TypeExpr::Array {
                len: array.len,
                element: Box::new(self.translate(&array.element, scope)?),
            }),
            TypeKind::Struct(struct_type) => {
                Ok(TypeExpr::Struct(self.translate_struct(struct_type, scope)?))
            }
            TypeKind::Signature(sig) => Ok(TypeExpr::Func(self.translate_signature(sig, scope)?)),
            TypeKind::Interface(iface) => {
                if method_set(self.source, iface).is_empty() {
                    Ok(TypeExpr::ident("any"))
                } else {
                    Ok(TypeExpr::Interface(self.translate_interface(iface, scope)?))
                }
            }
            TypeKind::Chan(_) => Err(SynthesisError::Unsupported {
                type_name: self.owner.to_string(),
                kind: ty.kind_name().to_string(),
            }),
        }
    }

    /// Fields in declared order; names are kept even when they repeat.
    /// Embedded fields are named after the embedded type, since their
    /// translation may no longer be a type name.
    pub fn translate_struct(
        &mut self,
        struct_type: &StructType,
        scope: &[String],
    ) -> Result<StructShape, SynthesisError> {
        let mut fields = Vec::with_capacity(struct_type.fields.len());

        for (position, field) in struct_type.fields.iter().enumerate() {
            let name = if field.name.is_empty() {
                embedded_name(&field.field_type)
            } else {
                field.name.clone()
            };

            fields.push(FieldDescriptor {
                name,
                field_type: self.translate(&field.field_type, scope)?,
                position,
            });
        }

        Ok(StructShape { fields })
    }

    /// Embedded elements first, then explicit methods.
    pub fn translate_interface(
        &mut self,
        iface: &InterfaceType,
        scope: &[String],
    ) -> Result<InterfaceShape, SynthesisError> {
        let mut elements = Vec::with_capacity(iface.embedded.len() + iface.methods.len());

        for embedded in &iface.embedded {
            elements.push(InterfaceElement::Embedded(self.translate(embedded, scope)?));
        }

        for method in &iface.methods {
            elements.push(InterfaceElement::Method {
                name: method.name.clone(),
                signature: self.translate_signature(&method.signature, scope)?,
            });
        }

        Ok(InterfaceShape { elements })
    }

    pub fn translate_signature(
        &mut self,
        sig: &Signature,
        scope: &[String],
    ) -> Result<FuncType, SynthesisError> {
        if sig.variadic && !matches!(sig.params.last(), Some(Param { param_type: TypeKind::Slice(_), .. })) {
            return Err(SynthesisError::InvalidVariadic {
                type_name: self.owner.to_string(),
            });
        }

        Ok(FuncType {
            params: self.translate_params(&sig.params, scope)?,
            results: self.translate_params(&sig.results, scope)?,
            variadic: sig.variadic,
        })
    }

    fn translate_params(&mut self, params: &[Param], scope: &[String]) -> Result<Vec<FuncParam>, SynthesisError> {
        params
            .iter()
            .map(|param| {
                Ok(FuncParam {
                    name: param.name.clone(),
                    param_type: self.translate(&param.param_type, scope)?,
                })
            })
            .collect()
    }

    fn translate_named(&mut self, type_ref: &TypeRef, scope: &[String]) -> Result<TypeExpr, SynthesisError> {
        let source = self.source;
        let decl = source.declaration(&type_ref.package, &type_ref.name);

        if !type_ref.args.is_empty() || decl.is_some_and(TypeDecl::is_generic) {
            return self.translate_instance(type_ref, decl, scope);
        }

        if type_ref.is_public() {
            self.ctx.imports.record(&type_ref.package);
            return Ok(TypeExpr::qualified(&type_ref.package, &type_ref.name));
        }

        let decl = decl.ok_or_else(|| self.unknown_reference(type_ref))?;
        let named = TypeKind::Named(type_ref.clone());

        match &decl.underlying {
            TypeKind::Struct(_) => self.outline(type_ref),
            TypeKind::Interface(iface) => {
                if method_set(source, iface).is_empty() {
                    Ok(TypeExpr::ident("any"))
                } else if exposes_private_member(iface) || is_recursive(source, &named) {
                    self.outline(type_ref)
                } else {
                    Ok(TypeExpr::Interface(self.translate_interface(iface, &[])?))
                }
            }
            underlying => {
                if is_recursive(source, &named) {
                    self.outline(type_ref)
                } else {
                    self.translate(underlying, &[])
                }
            }
        }
    }

    /* Generic declarations are always referenced by name: publicly when
       possible, otherwise through their outlined mirror */
    fn translate_instance(
        &mut self,
        type_ref: &TypeRef,
        decl: Option<&TypeDecl>,
        scope: &[String],
    ) -> Result<TypeExpr, SynthesisError> {
        let args = type_ref
            .args
            .iter()
            .map(|arg| self.translate(arg, scope))
            .collect::<Result<Vec<_>, _>>()?;

        let base = if type_ref.is_public() {
            self.ctx.imports.record(&type_ref.package);
            TypeExpr::qualified(&type_ref.package, &type_ref.name)
        } else {
            if decl.is_none() {
                return Err(self.unknown_reference(type_ref));
            }
            self.outline(type_ref)?
        };

        if let Some(decl) = decl {
            if decl.type_params.len() != type_ref.args.len() {
                return Err(SynthesisError::TypeArgCount {
                    reference: type_ref.to_string(),
                    expected: decl.type_params.len(),
                    found: type_ref.args.len(),
                });
            }
            self.record_obligations(type_ref, decl);
        }

        Ok(TypeExpr::instance(base, args))
    }

    fn record_obligations(&mut self, type_ref: &TypeRef, decl: &TypeDecl) {
        let params = decl.param_names();

        for (param, arg) in decl.type_params.iter().zip(&type_ref.args) {
            let constraint = param.constraint.substitute(&params, &type_ref.args);
            let Some(iface) = interface_of(self.source, &constraint) else {
                continue;
            };

            if method_set(self.source, &iface).is_empty() {
                continue;
            }

            let obligation = Obligation {
                constraint: iface,
                argument: arg.clone(),
            };
            if !self.ctx.obligations.contains(&obligation) {
                self.ctx.obligations.push(obligation);
            }
        }
    }

    fn outline(&mut self, type_ref: &TypeRef) -> Result<TypeExpr, SynthesisError> {
        Ok(TypeExpr::Ident(self.ctx.worklist.push(type_ref)?))
    }

    fn unknown_reference(&self, type_ref: &TypeRef) -> SynthesisError {
        SynthesisError::UnknownReference {
            type_name: self.owner.to_string(),
            reference: type_ref.to_string(),
        }
    }
}

/// Interface a constraint or embedded element stands for, if any.
pub fn interface_of(source: &dyn TypeSource, ty: &TypeKind) -> Option<InterfaceType> {
    match ty {
        TypeKind::Interface(iface) => Some(iface.clone()),
        TypeKind::Named(type_ref) => {
            let decl = source.declaration(&type_ref.package, &type_ref.name)?;
            match decl.instantiate(&type_ref.args) {
                TypeKind::Interface(iface) => Some(iface),
                _ => None,
            }
        }
        _ => None,
    }
}

/// All methods of an interface with embedded interfaces resolved. The first
/// method of each name wins.
pub fn method_set(source: &dyn TypeSource, iface: &InterfaceType) -> Vec<Method> {
    let mut methods = Vec::new();
    let mut seen_names = HashSet::new();
    let mut expanded = HashSet::new();

    collect_methods(source, iface, &mut methods, &mut seen_names, &mut expanded);

    methods
}

fn collect_methods(
    source: &dyn TypeSource,
    iface: &InterfaceType,
    methods: &mut Vec<Method>,
    seen_names: &mut HashSet<String>,
    expanded: &mut HashSet<String>,
) {
    for embedded in &iface.embedded {
        if let TypeKind::Named(type_ref) = embedded {
            if !expanded.insert(type_ref.to_string()) {
                continue;
            }
        }
        if let Some(inner) = interface_of(source, embedded) {
            collect_methods(source, &inner, methods, seen_names, expanded);
        }
    }

    for method in &iface.methods {
        if seen_names.insert(method.name.clone()) {
            methods.push(method.clone());
        }
    }
}

/* `T` and `*T` embed as a field called `T` */
fn embedded_name(ty: &TypeKind) -> String {
    match ty {
        TypeKind::Named(type_ref) => type_ref.name.clone(),
        TypeKind::Pointer(elem) => embedded_name(elem),
        _ => String::new(),
    }
}

/* Unexported method names are scoped to their package, and private named
   types in a signature cannot be spelled by the importer */
fn exposes_private_member(iface: &InterfaceType) -> bool {
    iface.methods.iter().any(|method| {
        !is_exported(&method.name)
            || method
                .signature
                .params
                .iter()
                .chain(method.signature.results.iter())
                .any(|p| names_private_type(&p.param_type))
    })
}

fn names_private_type(ty: &TypeKind) -> bool {
    match ty {
        TypeKind::Named(type_ref) => !type_ref.is_public(),
        TypeKind::Pointer(elem) => names_private_type(elem),
        _ => false,
    }
}

#[cfg(test)]
#[path = "translate_tests.rs"]
mod translate_tests;
