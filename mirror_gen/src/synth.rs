use crate::context::SynthesisContext;
use crate::error::SynthesisError;
use crate::flatten::flatten_ref;
use crate::source::TypeSource;
use crate::stubs::StubAttacher;
use crate::translate::FieldTranslator;
use crate::tree::{
    ConversionFunction, DeclarationTree, MirrorBody, MirrorDecl, TypeExpr, TypeParamExpr,
};
use mirror_types::{TypeKind, TypeRef};

const UNSAFE_PACKAGE: &str = "unsafe";

/// Synthesize mirrors for the requested struct types.
pub fn synthesize(
    source: &dyn TypeSource,
    roots: &[String],
) -> Result<DeclarationTree, SynthesisError> {
    MirrorSynthesizer::new(source).synthesize(roots)
}

/// Drives one synthesis run: seed the worklist with the roots, drain it in
/// FIFO order, emit conversion functions, then attach obligation stubs and
/// drain again until nothing new is discovered.
pub struct MirrorSynthesizer<'a> {
    source: &'a dyn TypeSource,
    ctx: SynthesisContext,
    decls: Vec<MirrorDecl>,
    stubs: StubAttacher,
}

impl<'a> MirrorSynthesizer<'a> {
    pub fn new(source: &'a dyn TypeSource) -> Self {
        Self {
            source,
            ctx: SynthesisContext::new(),
            decls: Vec::new(),
            stubs: StubAttacher::new(),
        }
    }

    pub fn synthesize(mut self, roots: &[String]) -> Result<DeclarationTree, SynthesisError> {
        let roots = self.seed(roots)?;

        self.drain()?;

        let conversions: Vec<ConversionFunction> =
            roots.iter().map(|root| self.conversion(root)).collect();

        while !self.ctx.obligations.is_empty() {
            let obligations = std::mem::take(&mut self.ctx.obligations);
            for obligation in &obligations {
                self.stubs.attach(self.source, &mut self.ctx, obligation)?;
            }
            self.drain()?;
        }

        tracing::debug!(
            decls = self.decls.len(),
            conversions = conversions.len(),
            imports = self.ctx.imports.len(),
            "synthesis complete"
        );

        Ok(DeclarationTree {
            imports: self.ctx.imports.finish(self.source),
            decls: self.decls,
            conversions,
            stubs: self.stubs.into_stubs(),
        })
    }

    /* Resolve the requested names; repeated names collapse into one root */
    fn seed(&mut self, names: &[String]) -> Result<Vec<TypeRef>, SynthesisError> {
        if names.is_empty() {
            return Err(SynthesisError::NoTypes);
        }

        let mut roots: Vec<TypeRef> = Vec::with_capacity(names.len());
        for name in names {
            let root = self.source.resolve_root(name)?;
            if !roots.contains(&root) {
                roots.push(root);
            }
        }

        for root in &roots {
            self.ctx.worklist.push(root)?;
        }

        Ok(roots)
    }

    fn drain(&mut self) -> Result<(), SynthesisError> {
        while let Some((flat, type_ref)) = self.ctx.worklist.pop() {
            let decl = self.synthesize_decl(&flat, type_ref)?;
            self.ctx.worklist.mark_visited(&flat);

            tracing::debug!(name = %decl.name, origin = %decl.origin, "synthesized mirror");

            self.decls.push(decl);
        }

        Ok(())
    }

    fn synthesize_decl(&mut self, flat: &str, type_ref: TypeRef) -> Result<MirrorDecl, SynthesisError> {
        let source = self.source;
        let owner = type_ref.qualified_name();
        let decl = source
            .declaration(&type_ref.package, &type_ref.name)
            .ok_or_else(|| SynthesisError::UnknownReference {
                type_name: owner.clone(),
                reference: owner.clone(),
            })?;

        let scope = decl.param_names();
        let mut translator = FieldTranslator::new(source, &mut self.ctx, &owner);

        let type_params = decl
            .type_params
            .iter()
            .map(|param| {
                Ok(TypeParamExpr {
                    name: param.name.clone(),
                    constraint: translator.translate(&param.constraint, &scope)?,
                })
            })
            .collect::<Result<Vec<_>, SynthesisError>>()?;

        let body = match &decl.underlying {
            TypeKind::Struct(struct_type) => {
                MirrorBody::Struct(translator.translate_struct(struct_type, &scope)?)
            }
            TypeKind::Interface(iface) => {
                MirrorBody::Interface(translator.translate_interface(iface, &scope)?)
            }
            other => MirrorBody::Defined(translator.translate(other, &scope)?),
        };

        Ok(MirrorDecl {
            name: flat.to_string(),
            origin: type_ref,
            type_params,
            body,
        })
    }

    /* make_<mirror>(x *pkg.T) *mirror; generic roots keep their parameters */
    fn conversion(&mut self, root: &TypeRef) -> ConversionFunction {
        let flat = flatten_ref(root);
        let type_params = self
            .decls
            .iter()
            .find(|decl| decl.name == flat)
            .map(|decl| decl.type_params.clone())
            .unwrap_or_default();

        let args: Vec<TypeExpr> = type_params
            .iter()
            .map(|param| TypeExpr::ident(param.name.clone()))
            .collect();

        self.ctx.imports.record(&root.package);
        self.ctx.imports.record(UNSAFE_PACKAGE);

        ConversionFunction {
            name: format!("make_{}", flat),
            source: TypeExpr::pointer(TypeExpr::instance(
                TypeExpr::qualified(&root.package, &root.name),
                args.clone(),
            )),
            target: TypeExpr::pointer(TypeExpr::instance(TypeExpr::ident(flat), args)),
            type_params,
        }
    }
}

#[cfg(test)]
#[path = "synth_tests.rs"]
mod synth_tests;
