use crate::{
    declarations::{
        accessor::{join_parts, Accessor, Modifiers},
        attribute::render_attributes,
        members::{
            operators::{self, Conversion},
            MemberInfo, RenderContext,
        },
        parameter::{parameter_list, ParameterDescriptor},
        typeinfo::{generic_list, where_clauses, GenericParamDescriptor, TypeDescriptor},
    },
    metadata::{
        builder::EXTENSION_ATTRIBUTE, AttributeTarget, MethodDef, MethodModifiers,
        MethodVtableFlags, TypeSig,
    },
    names::{strip_arity, strip_generic_suffix},
    Result,
};

/// A rendered method, constructor or operator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodDescriptor {
    /// Shared member data
    pub info: MemberInfo,
    /// The metadata name (`op_Addition`, `.ctor`, `GetName`)
    pub raw_name: String,
    /// The return type
    pub return_type: TypeDescriptor,
    /// The parameters, in declaration order
    pub parameters: Vec<ParameterDescriptor>,
    /// The method's own generic parameters
    pub generic_parameters: Vec<GenericParamDescriptor>,
    /// Declared virtual (including abstract and override)
    pub is_virtual: bool,
    /// `abstract`
    pub is_abstract: bool,
    /// `override`
    pub is_override: bool,
    /// An instance constructor
    pub is_constructor: bool,
    /// A user-defined operator, conversions included
    pub is_operator: bool,
    /// `implicit`/`explicit` conversion operator
    pub is_conversion_operator: bool,
    /// An extension method (first parameter rendered with `this`)
    pub is_extension: bool,
    /// Identity for de-duplication: metadata name, generic arity and parameter types
    pub signature_key: String,
    /// The declaration (`public virtual string GetName<T>(int id) where T : class`)
    pub declaration: String,
}

impl MethodDescriptor {
    /// Render a method
    ///
    /// With `standalone` set the method is rendered as a member of its own and is excluded when
    /// it is a compiler-generated method, a type initializer, a property/event accessor, or
    /// below the visibility threshold. Accessor methods are rendered with `standalone` unset,
    /// which skips every exclusion rule.
    ///
    /// ## Arguments
    /// * 'method'     - The method definition
    /// * 'ctx'        - The render context
    /// * 'standalone' - Apply the member exclusion rules
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedMember`] for an operator without parameters.
    pub fn render(method: &MethodDef, ctx: &RenderContext<'_>, standalone: bool) -> Result<Self> {
        let accessor = Accessor::from_member_access(method.access_code());
        let mut info = MemberInfo::new(&method.name, accessor, ctx);

        if standalone
            && (method.name.starts_with('<')
                || method.is_type_initializer()
                || method.is_accessor()
                || !ctx.config.admits(accessor))
        {
            log::trace!("excluding method {}", method.name);
            return Ok(MethodDescriptor {
                info: info.exclude(),
                raw_name: method.name.clone(),
                ..MethodDescriptor::default()
            });
        }

        let flags = method.modifiers();
        let is_static = method.is_static();
        let is_operator = is_static
            && flags.contains(MethodModifiers::SPECIAL_NAME)
            && method.name.starts_with(operators::OPERATOR_PREFIX);
        let conversion = operators::conversion(&method.name).filter(|_| is_operator);

        if is_operator && method.params.is_empty() {
            return Err(malformed_error!(
                "operator '{}' declares no parameters",
                method.name
            ));
        }

        let modifiers = if is_operator {
            match conversion {
                Some(Conversion::Implicit) => {
                    Modifiers::STATIC | Modifiers::IMPLICIT | Modifiers::OPERATOR
                }
                Some(Conversion::Explicit) => {
                    Modifiers::STATIC | Modifiers::EXPLICIT | Modifiers::OPERATOR
                }
                None => Modifiers::STATIC | Modifiers::OPERATOR,
            }
        } else {
            method_modifiers(method)
        };
        info.set_modifiers(modifiers);
        info.is_static = is_static;

        let raw_attributes = ctx
            .provider
            .custom_attributes(AttributeTarget::Method(method));
        let is_extension = raw_attributes
            .iter()
            .any(|attribute| attribute.attribute_type.full_name() == EXTENSION_ATTRIBUTE);
        info.attributes = render_attributes(&raw_attributes);

        let mut descriptor = MethodDescriptor {
            info,
            raw_name: method.name.clone(),
            return_type: TypeDescriptor::from_sig(&method.return_type),
            parameters: method
                .params
                .iter()
                .map(|param| ParameterDescriptor::new(param, ctx.provider))
                .collect(),
            generic_parameters: method
                .generic_params
                .iter()
                .map(|param| GenericParamDescriptor::from_def(param))
                .collect(),
            is_virtual: flags.contains(MethodModifiers::VIRTUAL),
            is_abstract: modifiers.contains(Modifiers::ABSTRACT),
            is_override: modifiers.contains(Modifiers::OVERRIDE),
            is_constructor: method.is_constructor(),
            is_operator,
            is_conversion_operator: conversion.is_some(),
            is_extension,
            signature_key: String::new(),
            declaration: String::new(),
        };
        descriptor.finish();
        Ok(descriptor)
    }

    /// Replace the return type and rebuild the derived text
    ///
    /// ## Arguments
    /// * 'sig' - The new return type
    pub fn retype_return(&mut self, sig: &TypeSig) {
        self.return_type = TypeDescriptor::from_sig(sig);
        self.finish();
    }

    /// Recompute name, signature key and declaration from the descriptor's fields
    pub fn finish(&mut self) {
        let conversion =
            operators::conversion(&self.raw_name).filter(|_| self.is_conversion_operator);

        self.info.name = if let Some(conversion) = conversion {
            format!("{}__{}", conversion, self.return_type.display_name)
        } else if self.is_operator {
            operators::strip_prefix(&self.raw_name).to_string()
        } else if self.is_constructor {
            strip_arity(strip_generic_suffix(&self.info.declaring_type.display_name))
        } else {
            self.raw_name.clone()
        };

        self.signature_key = self.compute_signature_key();
        self.declaration = self.compute_declaration();
    }

    fn compute_signature_key(&self) -> String {
        let mut key = self.raw_name.clone();
        if !self.generic_parameters.is_empty() {
            key.push_str(&format!("``{}", self.generic_parameters.len()));
        }

        let params: Vec<String> = self
            .parameters
            .iter()
            .map(ParameterDescriptor::type_key)
            .collect();
        key.push('(');
        key.push_str(&params.join(","));
        key.push(')');

        // Conversions overload on the return type
        if self.is_conversion_operator {
            key.push_str(&format!(
                "~{}",
                self.return_type
                    .sig
                    .as_ref()
                    .map_or_else(|| self.return_type.identity_key.clone(), TypeSig::signature_key)
            ));
        }
        key
    }

    fn compute_declaration(&self) -> String {
        let prefix = self.info.prefix();
        let params = parameter_list(&self.parameters, self.is_extension);

        if self.is_conversion_operator {
            let signature = format!("{}({})", self.return_type.display_name, params);
            join_parts(&[prefix.as_str(), signature.as_str()])
        } else if self.is_operator {
            // The return type sits between `static` and `operator`
            let signature = format!(
                "operator {}({})",
                operators::symbol(&self.raw_name),
                params
            );
            join_parts(&[
                self.info.accessor.keyword(),
                "static",
                self.return_type.display_name.as_str(),
                signature.as_str(),
            ])
        } else if self.is_constructor {
            let signature = format!("{}({})", self.info.name, params);
            join_parts(&[prefix.as_str(), signature.as_str()])
        } else {
            let signature = format!(
                "{}{}({}){}",
                self.info.name,
                generic_list(&self.generic_parameters),
                params,
                where_clauses(&self.generic_parameters)
            );
            join_parts(&[
                prefix.as_str(),
                self.return_type.display_name.as_str(),
                signature.as_str(),
            ])
        }
    }
}

/// The modifier of an ordinary method: `static`, `abstract`, `[sealed ]override` or `virtual`,
/// first match wins
fn method_modifiers(method: &MethodDef) -> Modifiers {
    let flags = method.modifiers();
    let vtable = method.vtable();

    if flags.contains(MethodModifiers::STATIC) {
        Modifiers::STATIC
    } else if flags.contains(MethodModifiers::ABSTRACT) {
        Modifiers::ABSTRACT
    } else if flags.contains(MethodModifiers::VIRTUAL) && !vtable.contains(MethodVtableFlags::NEW_SLOT)
    {
        if flags.contains(MethodModifiers::FINAL) {
            Modifiers::SEALED | Modifiers::OVERRIDE
        } else {
            Modifiers::OVERRIDE
        }
    } else if flags.contains(MethodModifiers::VIRTUAL) && !flags.contains(MethodModifiers::FINAL) {
        Modifiers::VIRTUAL
    } else {
        Modifiers::empty()
    }
}
