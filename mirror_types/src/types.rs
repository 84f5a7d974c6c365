use crate::names::{default_package_name, is_exported, is_internal};
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// Reference to a named type: originating package path, local name and the
/// type arguments of a generic instantiation.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash)]
#[serde(rename_all = "kebab-case")]
pub struct TypeRef {
    pub package: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeKind>,
}

impl TypeRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<TypeKind>) -> Self {
        self.args = args;
        self
    }

    /// `<package>.<name>`, without type arguments.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }

    /// The uninstantiated declaration this reference points at.
    pub fn origin(&self) -> TypeRef {
        TypeRef::new(self.package.clone(), self.name.clone())
    }

    /// Exported name in a package that code outside the module may import.
    pub fn is_public(&self) -> bool {
        is_exported(&self.name) && !is_internal(&self.package)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash)]
#[serde(rename_all = "kebab-case")]
pub struct MapType {
    pub key: Box<TypeKind>,
    pub value: Box<TypeKind>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash)]
#[serde(rename_all = "kebab-case")]
pub struct ArrayType {
    pub len: u64,
    pub element: Box<TypeKind>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash)]
#[serde(rename_all = "kebab-case")]
pub struct ChanType {
    #[serde(default)]
    pub dir: ChanDir,
    pub element: Box<TypeKind>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash)]
#[serde(rename_all = "kebab-case")]
pub struct StructField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeKind,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub struct StructType {
    #[serde(default)]
    pub fields: Vec<StructField>,
}

/// Function parameter or result. Unnamed entries carry an empty name.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash)]
#[serde(rename_all = "kebab-case")]
pub struct Param {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: TypeKind,
}

impl Param {
    pub fn unnamed(param_type: TypeKind) -> Self {
        Self {
            name: String::new(),
            param_type,
        }
    }
}

/// Function signature. When `variadic` is set the final parameter has a
/// slice type whose element is the variadic element type.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Signature {
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub results: Vec<Param>,
    #[serde(default)]
    pub variadic: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash)]
#[serde(rename_all = "kebab-case")]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub signature: Signature,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub struct InterfaceType {
    #[serde(default)]
    pub embedded: Vec<TypeKind>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    Basic(String),
    Named(TypeRef),
    TypeParam(String),
    Pointer(Box<TypeKind>),
    Map(MapType),
    Array(ArrayType),
    Slice(Box<TypeKind>),
    Chan(ChanType),
    Struct(StructType),
    Interface(InterfaceType),
    Signature(Signature),
}

impl TypeKind {
    pub fn basic(name: impl Into<String>) -> Self {
        TypeKind::Basic(name.into())
    }

    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeKind::Named(TypeRef::new(package, name))
    }

    pub fn pointer(elem: TypeKind) -> Self {
        TypeKind::Pointer(Box::new(elem))
    }

    pub fn slice(elem: TypeKind) -> Self {
        TypeKind::Slice(Box::new(elem))
    }

    pub fn map(key: TypeKind, value: TypeKind) -> Self {
        TypeKind::Map(MapType {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    pub fn array(len: u64, element: TypeKind) -> Self {
        TypeKind::Array(ArrayType {
            len,
            element: Box::new(element),
        })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeKind::Basic(_) => "basic",
            TypeKind::Named(_) => "named",
            TypeKind::TypeParam(_) => "type-param",
            TypeKind::Pointer(_) => "pointer",
            TypeKind::Map(_) => "map",
            TypeKind::Array(_) => "array",
            TypeKind::Slice(_) => "slice",
            TypeKind::Chan(_) => "chan",
            TypeKind::Struct(_) => "struct",
            TypeKind::Interface(_) => "interface",
            TypeKind::Signature(_) => "signature",
        }
    }

    /// Replaces every type parameter named in `params` by the argument at the
    /// same position. Parameters without a matching argument are left as-is.
    pub fn substitute(&self, params: &[String], args: &[TypeKind]) -> TypeKind {
        if params.is_empty() {
            return self.clone();
        }

        let sub = |t: &TypeKind| Box::new(t.substitute(params, args));

        match self {
            TypeKind::TypeParam(name) => params
                .iter()
                .position(|p| p == name)
                .and_then(|idx| args.get(idx))
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeKind::Basic(_) => self.clone(),
            TypeKind::Named(type_ref) => TypeKind::Named(TypeRef {
                package: type_ref.package.clone(),
                name: type_ref.name.clone(),
                args: type_ref
                    .args
                    .iter()
                    .map(|a| a.substitute(params, args))
                    .collect(),
            }),
            TypeKind::Pointer(elem) => TypeKind::Pointer(sub(elem)),
            TypeKind::Slice(elem) => TypeKind::Slice(sub(elem)),
            TypeKind::Map(map) => TypeKind::Map(MapType {
                key: sub(&map.key),
                value: sub(&map.value),
            }),
            TypeKind::Array(array) => TypeKind::Array(ArrayType {
                len: array.len,
                element: sub(&array.element),
            }),
            TypeKind::Chan(chan) => TypeKind::Chan(ChanType {
                dir: chan.dir,
                element: sub(&chan.element),
            }),
            TypeKind::Struct(struct_type) => TypeKind::Struct(StructType {
                fields: struct_type
                    .fields
                    .iter()
                    .map(|f| StructField {
                        name: f.name.clone(),
                        field_type: f.field_type.substitute(params, args),
                    })
                    .collect(),
            }),
            TypeKind::Interface(iface) => TypeKind::Interface(iface.substitute(params, args)),
            TypeKind::Signature(sig) => TypeKind::Signature(sig.substitute(params, args)),
        }
    }

    /// Whether any type parameter occurs anywhere in this expression.
    pub fn mentions_type_param(&self) -> bool {
        match self {
            TypeKind::TypeParam(_) => true,
            TypeKind::Basic(_) => false,
            TypeKind::Named(type_ref) => type_ref.args.iter().any(TypeKind::mentions_type_param),
            TypeKind::Pointer(elem) | TypeKind::Slice(elem) => elem.mentions_type_param(),
            TypeKind::Map(map) => map.key.mentions_type_param() || map.value.mentions_type_param(),
            TypeKind::Array(array) => array.element.mentions_type_param(),
            TypeKind::Chan(chan) => chan.element.mentions_type_param(),
            TypeKind::Struct(struct_type) => struct_type
                .fields
                .iter()
                .any(|f| f.field_type.mentions_type_param()),
            TypeKind::Interface(iface) => {
                iface.embedded.iter().any(TypeKind::mentions_type_param)
                    || iface.methods.iter().any(|m| m.signature.mentions_type_param())
            }
            TypeKind::Signature(sig) => sig.mentions_type_param(),
        }
    }
}

impl Signature {
    pub fn substitute(&self, params: &[String], args: &[TypeKind]) -> Signature {
        let sub_list = |list: &[Param]| {
            list.iter()
                .map(|p| Param {
                    name: p.name.clone(),
                    param_type: p.param_type.substitute(params, args),
                })
                .collect()
        };

        Signature {
            params: sub_list(&self.params),
            results: sub_list(&self.results),
            variadic: self.variadic,
        }
    }

    pub fn mentions_type_param(&self) -> bool {
        self.params
            .iter()
            .chain(self.results.iter())
            .any(|p| p.param_type.mentions_type_param())
    }
}

impl InterfaceType {
    pub fn substitute(&self, params: &[String], args: &[TypeKind]) -> InterfaceType {
        InterfaceType {
            embedded: self
                .embedded
                .iter()
                .map(|e| e.substitute(params, args))
                .collect(),
            methods: self
                .methods
                .iter()
                .map(|m| Method {
                    name: m.name.clone(),
                    signature: m.signature.substitute(params, args),
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct TypeParamDecl {
    pub name: String,
    pub constraint: TypeKind,
}

/// A named type declared in a package.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct TypeDecl {
    pub name: String,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        with = "serde_yml::with::singleton_map_recursive"
    )]
    pub type_params: Vec<TypeParamDecl>,
    #[serde(with = "serde_yml::with::singleton_map_recursive")]
    pub underlying: TypeKind,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, underlying: TypeKind) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            underlying,
        }
    }

    pub fn with_type_params(mut self, type_params: Vec<TypeParamDecl>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    pub fn param_names(&self) -> Vec<String> {
        self.type_params.iter().map(|p| p.name.clone()).collect()
    }

    /// Underlying type with the declaration's parameters replaced by `args`.
    pub fn instantiate(&self, args: &[TypeKind]) -> TypeKind {
        self.underlying.substitute(&self.param_names(), args)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Package {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl Package {
    pub fn new(path: impl Into<String>, types: Vec<TypeDecl>) -> Self {
        Self {
            path: path.into(),
            name: None,
            types,
        }
    }

    /// Declared package name, or the default derived from the import path.
    pub fn package_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| default_package_name(&self.path))
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }
}
