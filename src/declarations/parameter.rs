//! Parameter rendering.
//!
//! A parameter declaration reads `[modifier ]Type name[ = default]`. The modifier is chosen by
//! the first matching rule: `in` (a reference marked `[In]`, even when also `[Out]`), `out`,
//! `ref` (any other managed reference), `params` (marked with `System.ParamArrayAttribute`),
//! otherwise none.

use strum::Display;

use crate::{
    declarations::{
        accessor::join_parts,
        attribute::{render_attributes, AttributeDescriptor},
        typeinfo::TypeDescriptor,
    },
    metadata::{
        builder::PARAM_ARRAY_ATTRIBUTE, AttributeTarget, MetadataProvider, ParamDef, TypeSig,
    },
};

/// How a parameter is passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ParameterModifier {
    /// By value
    #[default]
    #[strum(to_string = "")]
    None,
    /// `in`
    In,
    /// `out`
    Out,
    /// `ref`
    #[strum(to_string = "ref")]
    ByRef,
    /// `params`
    #[strum(to_string = "params")]
    Variadic,
}

impl ParameterModifier {
    /// Returns true for modifiers passing a managed reference
    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            ParameterModifier::In | ParameterModifier::Out | ParameterModifier::ByRef
        )
    }
}

/// A rendered parameter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterDescriptor {
    /// The parameter name
    pub name: String,
    /// The parameter type, with any managed reference stripped
    pub type_descriptor: TypeDescriptor,
    /// How the parameter is passed
    pub modifier: ParameterModifier,
    /// True if the parameter has a default value
    pub is_optional: bool,
    /// The default value as text, unquoted (empty when not optional)
    pub default_value: String,
    /// The default value as a source literal (`"Hi"`, `'x'`, `null`)
    pub default_literal: String,
    /// Attributes applied to the parameter
    pub attributes: Vec<AttributeDescriptor>,
    /// The inline declaration
    pub declaration: String,
}

impl ParameterDescriptor {
    /// Build the descriptor of a raw parameter
    ///
    /// ## Arguments
    /// * 'param'    - The parameter definition
    /// * 'provider' - The metadata provider (for the parameter's attributes)
    pub fn new(param: &ParamDef, provider: &dyn MetadataProvider) -> Self {
        let raw_attributes = provider.custom_attributes(AttributeTarget::Param(param));
        let is_variadic = raw_attributes
            .iter()
            .any(|attribute| attribute.attribute_type.full_name() == PARAM_ARRAY_ATTRIBUTE);

        let by_ref = param.param_type.is_by_ref();
        let modifier = if by_ref && param.is_in() {
            ParameterModifier::In
        } else if param.is_out() {
            ParameterModifier::Out
        } else if by_ref {
            ParameterModifier::ByRef
        } else if is_variadic {
            ParameterModifier::Variadic
        } else {
            ParameterModifier::None
        };

        let is_optional = param.is_optional();
        let (default_value, default_literal) = match (&param.default, is_optional) {
            (Some(value), true) => (value.to_string(), value.to_literal()),
            _ => (String::new(), String::new()),
        };

        let mut descriptor = ParameterDescriptor {
            name: param.name.clone(),
            type_descriptor: TypeDescriptor::from_sig(param.param_type.dereferenced()),
            modifier,
            is_optional,
            default_value,
            default_literal,
            attributes: render_attributes(&raw_attributes),
            declaration: String::new(),
        };
        descriptor.finish();
        descriptor
    }

    /// The signature-key fragment of this parameter: its type identity, with `&` for references
    #[must_use]
    pub fn type_key(&self) -> String {
        let identity = self
            .type_descriptor
            .sig
            .as_ref()
            .map_or_else(|| self.type_descriptor.identity_key.clone(), TypeSig::signature_key);
        if self.modifier.is_reference() {
            format!("{}&", identity)
        } else {
            identity
        }
    }

    /// Replace the parameter type and rebuild the declaration
    ///
    /// ## Arguments
    /// * 'sig' - The new (dereferenced) parameter type
    pub fn retype(&mut self, sig: &TypeSig) {
        self.type_descriptor = TypeDescriptor::from_sig(sig);
        self.finish();
    }

    /// Recompute the declaration from the descriptor's fields
    pub fn finish(&mut self) {
        let modifier = self.modifier.to_string();
        let mut declaration = join_parts(&[
            modifier.as_str(),
            self.type_descriptor.display_name.as_str(),
            self.name.as_str(),
        ]);
        if self.is_optional && !self.default_literal.is_empty() {
            declaration.push_str(" = ");
            declaration.push_str(&self.default_literal);
        }
        self.declaration = declaration;
    }
}

/// Join rendered parameters into a parameter list (without parentheses)
///
/// ## Arguments
/// * 'parameters'   - The rendered parameters
/// * 'is_extension' - Prefix the first parameter with `this `
pub fn parameter_list(parameters: &[ParameterDescriptor], is_extension: bool) -> String {
    let list = parameters
        .iter()
        .map(|parameter| parameter.declaration.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    if is_extension && !list.is_empty() {
        format!("this {}", list)
    } else {
        list
    }
}
