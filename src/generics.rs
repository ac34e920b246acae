//! Generic substitution of inherited members.
//!
//! When a type derives from a closed generic instantiation (`StudentMember : BaseMember<int>`)
//! the members it inherits are reported in terms of the concrete arguments: an inherited
//! `T Get(T key)` reads `int Get(int key)`.
//!
//! A [`Substitution`] maps the formal type parameters of one base level to the type expressions
//! the derived level supplies for them. It rewrites [`TypeSig`] trees, never display text, so
//! a parameter named `T` can only ever match a reference to the type parameter `T` and not an
//! unrelated type that happens to share its name. Method-level generic parameters are left
//! alone.
//!
//! Substitutions chain naturally: the base reference of the next level is itself rewritten with
//! the current level's substitution before the next map is built, see [`Substitution::advance`].
//!
//! # Examples
//!
//! ```rust
//! use declscope::generics::Substitution;
//! use declscope::metadata::{GenericParamDefBuilder, TypeDefBuilder, TypeSig};
//!
//! let base = TypeDefBuilder::class("SchoolSys", "BaseMember`1")
//!     .generic_param(GenericParamDefBuilder::new("T"))
//!     .build("SchoolSys");
//! let reference = TypeSig::generic("SchoolSys.BaseMember`1", vec![TypeSig::int32()]);
//!
//! let substitution = Substitution::from_base(&base.generic_params, &reference);
//! let list = TypeSig::generic("System.Collections.Generic.List`1", vec![TypeSig::type_param("T", 0)]);
//! assert_eq!(
//!     substitution.apply(&list).map(|sig| sig.full_name()).as_deref(),
//!     Some("System.Collections.Generic.List`1<System.Int32>")
//! );
//! ```

use crate::{
    declarations::{
        members::MethodDescriptor, EventDescriptor, FieldDescriptor, MemberDescriptor,
        ParameterDescriptor, PropertyDescriptor, TypeDescriptor,
    },
    metadata::{GenericOwner, GenericParamRc, TypeSig},
    Error, Result,
};

/// Formal-parameter to argument map of one inheritance level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: Vec<(String, TypeSig)>,
}

impl Substitution {
    /// The empty substitution, which leaves every type unchanged
    #[must_use]
    pub fn identity() -> Self {
        Substitution::default()
    }

    /// Bind the formal parameters of a base type to the arguments of the reference to it
    ///
    /// Formal parameters without a matching argument stay unbound; references to them are
    /// reported as unresolved and kept.
    ///
    /// ## Arguments
    /// * 'formal'    - The generic parameters declared by the base type
    /// * 'reference' - The base type reference as written on the derived type
    #[must_use]
    pub fn from_base(formal: &[GenericParamRc], reference: &TypeSig) -> Self {
        Substitution {
            bindings: formal
                .iter()
                .zip(reference.generic_args())
                .map(|(param, arg)| (param.name.clone(), arg.clone()))
                .collect(),
        }
    }

    /// Build the substitution of the next base level
    ///
    /// The reference to the next base is first rewritten with `self`, so arguments supplied
    /// further down the hierarchy flow up through intermediate generic levels.
    ///
    /// ## Arguments
    /// * 'formal'    - The generic parameters declared by the next base type
    /// * 'reference' - The next base reference, as written on the current level
    #[must_use]
    pub fn advance(&self, formal: &[GenericParamRc], reference: &TypeSig) -> Self {
        match self.apply(reference) {
            Some(rewritten) => Self::from_base(formal, &rewritten),
            None => Self::from_base(formal, reference),
        }
    }

    /// Returns true if nothing is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Look up the argument bound to a formal parameter
    ///
    /// ## Arguments
    /// * 'name' - The formal parameter name
    ///
    /// # Errors
    /// Returns [`Error::UnresolvedGenericArgument`] if the name is not bound.
    pub fn lookup(&self, name: &str) -> Result<&TypeSig> {
        self.bindings
            .iter()
            .find(|(formal, _)| formal == name)
            .map(|(_, arg)| arg)
            .ok_or_else(|| Error::UnresolvedGenericArgument(name.to_string()))
    }

    /// Rewrite a type expression
    ///
    /// Returns `None` when the expression does not change, so callers only rebuild what was
    /// actually rewritten.
    ///
    /// ## Arguments
    /// * 'sig' - The type expression
    #[must_use]
    pub fn apply(&self, sig: &TypeSig) -> Option<TypeSig> {
        if self.is_empty() {
            return None;
        }
        let rewritten = self.rewrite(sig);
        (rewritten != *sig).then_some(rewritten)
    }

    fn rewrite(&self, sig: &TypeSig) -> TypeSig {
        match sig {
            TypeSig::GenericParam {
                name,
                owner: GenericOwner::Type,
                ..
            } => match self.lookup(name) {
                Ok(arg) => arg.clone(),
                Err(error) => {
                    log::debug!("{}; keeping the formal parameter", error);
                    sig.clone()
                }
            },
            TypeSig::GenericInst { base, args } => TypeSig::GenericInst {
                base: base.clone(),
                args: args.iter().map(|arg| self.rewrite(arg)).collect(),
            },
            TypeSig::Array { element, rank } => TypeSig::Array {
                element: Box::new(self.rewrite(element)),
                rank: *rank,
            },
            TypeSig::ByRef(element) => TypeSig::ByRef(Box::new(self.rewrite(element))),
            TypeSig::Pointer(element) => TypeSig::Pointer(Box::new(self.rewrite(element))),
            TypeSig::Named(_) | TypeSig::GenericParam { .. } => sig.clone(),
        }
    }

    /// Rewrite a type descriptor, returning the replacement if it changed
    fn apply_descriptor(&self, descriptor: &TypeDescriptor) -> Option<TypeSig> {
        descriptor.sig.as_ref().and_then(|sig| self.apply(sig))
    }

    /// Rewrite every type an inherited member refers to
    ///
    /// Only rewritten parts are rebuilt; a member that mentions none of the bound parameters is
    /// left untouched, signature key included.
    ///
    /// ## Arguments
    /// * 'member' - The rendered member of a base level
    ///
    /// Returns true if anything was rewritten.
    pub fn substitute(&self, member: &mut MemberDescriptor) -> bool {
        if self.is_empty() {
            return false;
        }
        match member {
            MemberDescriptor::Field(field) => self.substitute_field(field),
            MemberDescriptor::Property(property) => self.substitute_property(property),
            MemberDescriptor::Event(event) => self.substitute_event(event),
            MemberDescriptor::Method(method) => self.substitute_method(method),
        }
    }

    fn substitute_field(&self, field: &mut FieldDescriptor) -> bool {
        match self.apply_descriptor(&field.type_descriptor) {
            Some(sig) => {
                field.retype(&sig);
                true
            }
            None => false,
        }
    }

    fn substitute_parameters(&self, parameters: &mut [ParameterDescriptor]) -> bool {
        let mut changed = false;
        for parameter in parameters {
            if let Some(sig) = self.apply_descriptor(&parameter.type_descriptor) {
                parameter.retype(&sig);
                changed = true;
            }
        }
        changed
    }

    fn substitute_method(&self, method: &mut MethodDescriptor) -> bool {
        let mut changed = self.substitute_parameters(&mut method.parameters);
        if let Some(sig) = self.apply_descriptor(&method.return_type) {
            method.return_type = TypeDescriptor::from_sig(&sig);
            changed = true;
        }
        if changed {
            method.finish();
        }
        changed
    }

    fn substitute_property(&self, property: &mut PropertyDescriptor) -> bool {
        let mut changed = self.substitute_parameters(&mut property.parameters);
        if let Some(sig) = self.apply_descriptor(&property.type_descriptor) {
            property.type_descriptor = TypeDescriptor::from_sig(&sig);
            changed = true;
        }
        for accessor in [&mut property.getter, &mut property.setter]
            .into_iter()
            .flatten()
        {
            self.substitute_method(accessor);
        }
        if changed {
            property.finish();
        }
        changed
    }

    fn substitute_event(&self, event: &mut EventDescriptor) -> bool {
        self.substitute_method(&mut event.adder);
        self.substitute_method(&mut event.remover);
        match self.apply_descriptor(&event.type_descriptor) {
            Some(sig) => {
                event.retype(&sig);
                true
            }
            None => false,
        }
    }
}
