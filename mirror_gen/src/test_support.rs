/* Builders shared by the engine's unit tests */

use crate::source::TypeSource;
use crate::synth::synthesize;
use crate::tree::DeclarationTree;
use mirror_loader::Namespace;
use mirror_types::{
    InterfaceType, Method, Package, Param, Signature, StructField, StructType, TypeDecl,
    TypeKind, TypeParamDecl, TypeRef,
};

pub const MODULE: &str = "example.com/app";

pub fn namespace(packages: Vec<Package>) -> Namespace {
    let mut ns = Namespace::new(MODULE);
    for package in packages {
        ns.add_package(package).expect("package should register");
    }
    ns
}

/* Namespace with a single package `a` */
pub fn package_a(types: Vec<TypeDecl>) -> Namespace {
    namespace(vec![Package::new("a", types)])
}

pub fn synthesize_all(source: &dyn TypeSource, roots: &[&str]) -> DeclarationTree {
    synthesize(source, &names(roots)).expect("synthesis should succeed")
}

pub fn names(roots: &[&str]) -> Vec<String> {
    roots.iter().map(|r| r.to_string()).collect()
}

pub fn decl(name: &str, underlying: TypeKind) -> TypeDecl {
    TypeDecl::new(name, underlying)
}

pub fn generic_decl(name: &str, params: &[(&str, TypeKind)], underlying: TypeKind) -> TypeDecl {
    TypeDecl::new(name, underlying).with_type_params(
        params
            .iter()
            .map(|(param, constraint)| TypeParamDecl {
                name: param.to_string(),
                constraint: constraint.clone(),
            })
            .collect(),
    )
}

pub fn basic(name: &str) -> TypeKind {
    TypeKind::basic(name)
}

pub fn named(package: &str, name: &str) -> TypeKind {
    TypeKind::named(package, name)
}

pub fn instance(package: &str, name: &str, args: Vec<TypeKind>) -> TypeKind {
    TypeKind::Named(TypeRef::new(package, name).with_args(args))
}

pub fn param(name: &str) -> TypeKind {
    TypeKind::TypeParam(name.to_string())
}

pub fn ptr(elem: TypeKind) -> TypeKind {
    TypeKind::pointer(elem)
}

pub fn field(name: &str, field_type: TypeKind) -> StructField {
    StructField {
        name: name.to_string(),
        field_type,
    }
}

pub fn strukt(fields: Vec<StructField>) -> TypeKind {
    TypeKind::Struct(StructType { fields })
}

pub fn signature(params: Vec<TypeKind>, results: Vec<TypeKind>) -> Signature {
    Signature {
        params: params.into_iter().map(Param::unnamed).collect(),
        results: results.into_iter().map(Param::unnamed).collect(),
        variadic: false,
    }
}

pub fn func(params: Vec<TypeKind>, results: Vec<TypeKind>) -> TypeKind {
    TypeKind::Signature(signature(params, results))
}

pub fn method(name: &str, params: Vec<TypeKind>, results: Vec<TypeKind>) -> Method {
    Method {
        name: name.to_string(),
        signature: signature(params, results),
    }
}

pub fn iface(embedded: Vec<TypeKind>, methods: Vec<Method>) -> TypeKind {
    TypeKind::Interface(InterfaceType { embedded, methods })
}
