use crate::context::{Obligation, SynthesisContext};
use crate::error::SynthesisError;
use crate::source::TypeSource;
use crate::translate::{method_set, FieldTranslator};
use crate::tree::ObligationStub;
use indexmap::IndexSet;
use mirror_types::TypeKind;

/// Builds empty-bodied methods so that mirrors used as type arguments keep
/// satisfying the interface constraints of the instantiations they appear in.
#[derive(Debug, Default)]
pub struct StubAttacher {
    /* (receiver, method) pairs already stubbed */
    attached: IndexSet<(String, String)>,
    stubs: Vec<ObligationStub>,
}

impl StubAttacher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(
        &mut self,
        source: &dyn TypeSource,
        ctx: &mut SynthesisContext,
        obligation: &Obligation,
    ) -> Result<(), SynthesisError> {
        let (type_ref, pointer_receiver) = match &obligation.argument {
            TypeKind::Named(type_ref) => (type_ref, false),
            TypeKind::Pointer(elem) => match elem.as_ref() {
                TypeKind::Named(type_ref) => (type_ref, true),
                _ => return Ok(()),
            },
            _ => return Ok(()),
        };

        /* Public types keep their own methods; generic mirrors would need
           receiver type parameters */
        if type_ref.is_public() || !type_ref.args.is_empty() {
            return Ok(());
        }

        let Some(receiver) = ctx.worklist.known_name(type_ref) else {
            return Ok(());
        };

        /* Interface mirrors declare the methods themselves and cannot be receivers */
        if source
            .declaration(&type_ref.package, &type_ref.name)
            .is_some_and(|decl| matches!(decl.underlying, TypeKind::Interface(_)))
        {
            return Ok(());
        }

        for method in method_set(source, &obligation.constraint) {
            if method.signature.mentions_type_param() {
                tracing::debug!(
                    receiver = %receiver,
                    method = %method.name,
                    "skipping stub with type parameters"
                );
                continue;
            }

            if !self.attached.insert((receiver.clone(), method.name.clone())) {
                continue;
            }

            let signature = FieldTranslator::new(source, ctx, &receiver)
                .translate_signature(&method.signature, &[])?
                .blanked();

            tracing::debug!(receiver = %receiver, method = %method.name, "attached stub");

            self.stubs.push(ObligationStub {
                receiver: receiver.clone(),
                pointer_receiver,
                method: method.name,
                signature,
            });
        }

        Ok(())
    }

    pub fn into_stubs(self) -> Vec<ObligationStub> {
        self.stubs
    }
}
