//! Go-syntax display of source type expressions, used for diagnostics and
//! as the identity key of named instantiations.

use crate::types::{ChanDir, InterfaceType, Param, Signature, TypeKind, TypeRef};
use std::fmt;

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)?;

        if !self.args.is_empty() {
            f.write_str("[")?;
            write_list(f, &self.args)?;
            f.write_str("]")?;
        }

        Ok(())
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Basic(name) | TypeKind::TypeParam(name) => f.write_str(name),
            TypeKind::Named(type_ref) => write!(f, "{}", type_ref),
            TypeKind::Pointer(elem) => write!(f, "*{}", elem),
            TypeKind::Map(map) => write!(f, "map[{}]{}", map.key, map.value),
            TypeKind::Array(array) => write!(f, "[{}]{}", array.len, array.element),
            TypeKind::Slice(elem) => write!(f, "[]{}", elem),
            TypeKind::Chan(chan) => match chan.dir {
                ChanDir::Both => write!(f, "chan {}", chan.element),
                ChanDir::Send => write!(f, "chan<- {}", chan.element),
                ChanDir::Recv => write!(f, "<-chan {}", chan.element),
            },
            TypeKind::Struct(struct_type) => {
                f.write_str("struct{")?;
                for (idx, field) in struct_type.fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{} {}", field.name, field.field_type)?;
                }
                f.write_str("}")
            }
            TypeKind::Interface(iface) => write!(f, "{}", iface),
            TypeKind::Signature(sig) => write!(f, "func{}", sig),
        }
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("interface{")?;
        let mut first = true;
        for embedded in &self.embedded {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}", embedded)?;
        }
        for method in &self.methods {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}{}", method.name, method.signature)?;
        }
        f.write_str("}")
    }
}

/// Renders `(params) results` without the `func` keyword.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (idx, param) in self.params.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            let is_variadic = self.variadic && idx + 1 == self.params.len();
            write_param(f, param, is_variadic)?;
        }
        f.write_str(")")?;

        match self.results.as_slice() {
            [] => Ok(()),
            [single] if single.name.is_empty() => write!(f, " {}", single.param_type),
            results => {
                f.write_str(" (")?;
                for (idx, result) in results.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write_param(f, result, false)?;
                }
                f.write_str(")")
            }
        }
    }
}

fn write_param(f: &mut fmt::Formatter<'_>, param: &Param, variadic: bool) -> fmt::Result {
    if !param.name.is_empty() {
        write!(f, "{} ", param.name)?;
    }

    match (&param.param_type, variadic) {
        (TypeKind::Slice(elem), true) => write!(f, "...{}", elem),
        (other, _) => write!(f, "{}", other),
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, list: &[TypeKind]) -> fmt::Result {
    for (idx, item) in list.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
