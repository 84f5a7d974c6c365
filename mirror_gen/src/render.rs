//! Go source output for a declaration tree, laid out the way gofmt lays it
//! out.

use crate::imports::ImportGroup;
use crate::tree::{
    ConversionFunction, DeclarationTree, FuncParam, FuncType, InterfaceElement, InterfaceShape,
    MirrorBody, MirrorDecl, ObligationStub, StructShape, TypeExpr, TypeParamExpr,
};
use mirror_types::default_package_name;
use std::collections::HashMap;
use std::fmt::Write;

pub const GENERATED_HEADER: &str = "// Code generated by mirror-gen. DO NOT EDIT.";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /* Package clause of the generated file */
    pub package: String,

    /* Arguments for a `//go:generate` line; None omits the line */
    pub generate_line: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            package: "mirror".to_string(),
            generate_line: None,
        }
    }
}

pub fn render(tree: &DeclarationTree, options: &RenderOptions) -> String {
    Renderer::new(tree).file(options)
}

struct Renderer<'a> {
    tree: &'a DeclarationTree,
    aliases: HashMap<&'a str, &'a str>,
}

impl<'a> Renderer<'a> {
    fn new(tree: &'a DeclarationTree) -> Self {
        let aliases = tree
            .imports
            .iter()
            .map(|entry| (entry.path.as_str(), entry.alias.as_str()))
            .collect();

        Self { tree, aliases }
    }

    fn file(&self, options: &RenderOptions) -> String {
        let mut out = String::new();

        out.push_str(GENERATED_HEADER);
        out.push_str("\n\n");

        if let Some(line) = &options.generate_line {
            writeln!(out, "//go:generate {}\n", line).unwrap();
        }

        writeln!(out, "package {}", options.package).unwrap();

        if !self.tree.imports.is_empty() {
            out.push('\n');
            out.push_str(&self.imports());
        }

        for decl in &self.tree.decls {
            out.push('\n');
            out.push_str(&self.decl(decl));
        }

        for conversion in &self.tree.conversions {
            out.push('\n');
            out.push_str(&self.conversion(conversion));
        }

        for stub in &self.tree.stubs {
            out.push('\n');
            out.push_str(&self.stub(stub));
        }

        out
    }

    /* ==== Imports ==== */

    fn imports(&self) -> String {
        let import_spec = |alias: &str, path: &str, explicit: bool| {
            if explicit {
                format!("{} \"{}\"", alias, path)
            } else {
                format!("\"{}\"", path)
            }
        };

        if let [only] = self.tree.imports.as_slice() {
            return format!("import {}\n", import_spec(&only.alias, &only.path, only.explicit));
        }

        let mut out = String::from("import (\n");
        let mut previous_group: Option<ImportGroup> = None;

        for entry in &self.tree.imports {
            if previous_group.is_some_and(|group| group != entry.group) {
                out.push('\n');
            }
            previous_group = Some(entry.group);

            writeln!(out, "\t{}", import_spec(&entry.alias, &entry.path, entry.explicit)).unwrap();
        }

        out.push_str(")\n");
        out
    }

    /* ==== Declarations ==== */

    fn decl(&self, decl: &MirrorDecl) -> String {
        let body = match &decl.body {
            MirrorBody::Struct(shape) => self.struct_type(shape, 0),
            MirrorBody::Interface(shape) => self.interface_type(shape, 0),
            MirrorBody::Defined(expr) => self.type_expr(expr, 0),
        };

        format!(
            "type {}{} {}\n",
            decl.name,
            self.type_params(&decl.type_params),
            body
        )
    }

    fn conversion(&self, conversion: &ConversionFunction) -> String {
        let target = self.type_expr(&conversion.target, 0);

        format!(
            "func {}{}(x {}) {} {{\n\treturn ({})({}.Pointer(x))\n}}\n",
            conversion.name,
            self.type_params(&conversion.type_params),
            self.type_expr(&conversion.source, 0),
            target,
            target,
            self.alias("unsafe"),
        )
    }

    fn stub(&self, stub: &ObligationStub) -> String {
        let receiver = if stub.pointer_receiver {
            format!("*{}", stub.receiver)
        } else {
            stub.receiver.clone()
        };

        let body = if stub.signature.results.is_empty() {
            "{}"
        } else {
            "{\n\treturn\n}"
        };

        format!(
            "func ({}) {}{} {}\n",
            receiver,
            stub.method,
            self.signature(&stub.signature, 0),
            body
        )
    }

    fn type_params(&self, params: &[TypeParamExpr]) -> String {
        if params.is_empty() {
            return String::new();
        }

        let list: Vec<String> = params
            .iter()
            .map(|param| format!("{} {}", param.name, self.type_expr(&param.constraint, 0)))
            .collect();

        format!("[{}]", list.join(", "))
    }

    /* ==== Type expressions ====
       `indent` is the depth of the line the expression starts on; nested
       struct and interface bodies are indented one level deeper. */

    fn type_expr(&self, expr: &TypeExpr, indent: usize) -> String {
        match expr {
            TypeExpr::Ident(name) => name.clone(),
            TypeExpr::Qualified { package, name } => format!("{}.{}", self.alias(package), name),
            TypeExpr::Instance { base, args } => {
                let args: Vec<String> = args.iter().map(|a| self.type_expr(a, indent)).collect();
                format!("{}[{}]", self.type_expr(base, indent), args.join(", "))
            }
            TypeExpr::Pointer(elem) => format!("*{}", self.type_expr(elem, indent)),
            TypeExpr::Map { key, value } => format!(
                "map[{}]{}",
                self.type_expr(key, indent),
                self.type_expr(value, indent)
            ),
            TypeExpr::Array { len, element } => {
                format!("[{}]{}", len, self.type_expr(element, indent))
            }
            TypeExpr::Slice(elem) => format!("[]{}", self.type_expr(elem, indent)),
            TypeExpr::Struct(shape) => self.struct_type(shape, indent),
            TypeExpr::Func(func) => format!("func{}", self.signature(func, indent)),
            TypeExpr::Interface(shape) => self.interface_type(shape, indent),
        }
    }

    fn alias(&self, path: &str) -> String {
        match self.aliases.get(path) {
            Some(alias) => alias.to_string(),
            None => default_package_name(path),
        }
    }

    /* Field names are padded to a common width within a section. A section
       ends after a field spanning several lines and around embedded fields. */
    fn struct_type(&self, shape: &StructShape, indent: usize) -> String {
        if shape.fields.is_empty() {
            return "struct{}".to_string();
        }

        let inner = tabs(indent + 1);
        let rendered: Vec<(&str, String)> = shape
            .fields
            .iter()
            .map(|field| (field.name.as_str(), self.type_expr(&field.field_type, indent + 1)))
            .collect();

        let mut out = String::from("struct {\n");
        let mut section_start = 0;

        while section_start < rendered.len() {
            let section_end = section_end(&rendered, section_start);
            let section = &rendered[section_start..section_end];
            let width = section
                .iter()
                .map(|(name, _)| name.chars().count())
                .max()
                .unwrap_or(0);

            for (name, field_type) in section {
                if name.is_empty() {
                    writeln!(out, "{}{}", inner, field_type).unwrap();
                } else {
                    let padding = " ".repeat(width - name.chars().count() + 1);
                    writeln!(out, "{}{}{}{}", inner, name, padding, field_type).unwrap();
                }
            }

            section_start = section_end;
        }

        out.push_str(&tabs(indent));
        out.push('}');
        out
    }

    fn interface_type(&self, shape: &InterfaceShape, indent: usize) -> String {
        if shape.elements.is_empty() {
            return "interface{}".to_string();
        }

        let inner = tabs(indent + 1);
        let mut out = String::from("interface {\n");

        for element in &shape.elements {
            match element {
                InterfaceElement::Embedded(expr) => {
                    writeln!(out, "{}{}", inner, self.type_expr(expr, indent + 1)).unwrap();
                }
                InterfaceElement::Method { name, signature } => {
                    writeln!(out, "{}{}{}", inner, name, self.signature(signature, indent + 1)).unwrap();
                }
            }
        }

        out.push_str(&tabs(indent));
        out.push('}');
        out
    }

    /* `(params) results` */
    fn signature(&self, func: &FuncType, indent: usize) -> String {
        let last = func.params.len().saturating_sub(1);
        let params: Vec<String> = func
            .params
            .iter()
            .enumerate()
            .map(|(idx, param)| self.param(param, func.variadic && idx == last, indent))
            .collect();

        let results = match func.results.as_slice() {
            [] => String::new(),
            [single] if single.name.is_empty() => {
                format!(" {}", self.type_expr(&single.param_type, indent))
            }
            results => {
                let list: Vec<String> = results
                    .iter()
                    .map(|result| self.param(result, false, indent))
                    .collect();
                format!(" ({})", list.join(", "))
            }
        };

        format!("({}){}", params.join(", "), results)
    }

    fn param(&self, param: &FuncParam, variadic: bool, indent: usize) -> String {
        let param_type = match (&param.param_type, variadic) {
            (TypeExpr::Slice(elem), true) => format!("...{}", self.type_expr(elem, indent)),
            (other, _) => self.type_expr(other, indent),
        };

        if param.name.is_empty() {
            param_type
        } else {
            format!("{} {}", param.name, param_type)
        }
    }
}

/* Exclusive end of the alignment section starting at `start` */
fn section_end(fields: &[(&str, String)], start: usize) -> usize {
    if fields[start].0.is_empty() {
        return start + 1;
    }

    let mut end = start;
    while end < fields.len() {
        let (name, field_type) = &fields[end];
        if name.is_empty() {
            break;
        }
        end += 1;
        if field_type.contains('\n') {
            break;
        }
    }

    end
}

fn tabs(depth: usize) -> String {
    "\t".repeat(depth)
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
