//! Output model: the declarations a synthesis run produces.

use crate::imports::ImportGroup;
use mirror_types::TypeRef;
use serde_derive::Serialize;

/* ============================================================================
   Type Expressions
   ============================================================================ */

/// An emitted type expression.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TypeExpr {
    /* Universe name, type parameter or mirror declaration */
    Ident(String),
    /* Exported type of another package; the alias is chosen at render time */
    Qualified { package: String, name: String },
    Instance {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Array {
        len: u64,
        element: Box<TypeExpr>,
    },
    Slice(Box<TypeExpr>),
    Struct(StructShape),
    Func(FuncType),
    Interface(InterfaceShape),
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(name.into())
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(elem: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(elem))
    }

    /// `base[args]`, or just `base` when there are no arguments.
    pub fn instance(base: TypeExpr, args: Vec<TypeExpr>) -> Self {
        if args.is_empty() {
            base
        } else {
            TypeExpr::Instance {
                base: Box::new(base),
                args,
            }
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeExpr,
    pub position: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct StructShape {
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FuncParam {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: TypeExpr,
}

/// Function type. The final parameter of a variadic function keeps its
/// slice type; the renderer prints it as `...elem`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct FuncType {
    pub params: Vec<FuncParam>,
    pub results: Vec<FuncParam>,
    pub variadic: bool,
}

impl FuncType {
    /// Same signature with every parameter and result named `_`.
    pub fn blanked(mut self) -> Self {
        for param in self.params.iter_mut().chain(self.results.iter_mut()) {
            param.name = "_".to_string();
        }
        self
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InterfaceElement {
    Embedded(TypeExpr),
    Method { name: String, signature: FuncType },
}

/// Embedded elements first, then explicit methods, both in source order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct InterfaceShape {
    pub elements: Vec<InterfaceElement>,
}

/* ============================================================================
   Declarations
   ============================================================================ */

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TypeParamExpr {
    pub name: String,
    pub constraint: TypeExpr,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MirrorBody {
    Struct(StructShape),
    Interface(InterfaceShape),
    /* Recursive named type of any other kind, e.g. `type f func(f)` */
    Defined(TypeExpr),
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct MirrorDecl {
    pub name: String,
    pub origin: TypeRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeParamExpr>,
    pub body: MirrorBody,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ImportEntry {
    pub path: String,
    pub alias: String,
    /* Alias must be written out: it differs from the package name */
    pub explicit: bool,
    pub group: ImportGroup,
}

/// `make_<mirror>`: reinterprets a pointer to the original type as a
/// pointer to its mirror.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ConversionFunction {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeParamExpr>,
    pub source: TypeExpr,
    pub target: TypeExpr,
}

/// Method with an empty body, attached to a mirror so it keeps satisfying
/// an interface constraint of a generic instantiation.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ObligationStub {
    pub receiver: String,
    pub pointer_receiver: bool,
    pub method: String,
    pub signature: FuncType,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct DeclarationTree {
    pub imports: Vec<ImportEntry>,
    pub decls: Vec<MirrorDecl>,
    pub conversions: Vec<ConversionFunction>,
    pub stubs: Vec<ObligationStub>,
}

impl DeclarationTree {
    pub fn decl(&self, name: &str) -> Option<&MirrorDecl> {
        self.decls.iter().find(|d| d.name == name)
    }
}
