use crate::{
    declarations::{
        accessor::join_parts,
        attribute::render_attributes,
        members::{dominant, method::MethodDescriptor, MemberInfo, RenderContext},
        parameter::{parameter_list, ParameterDescriptor},
        typeinfo::TypeDescriptor,
    },
    metadata::{AttributeTarget, PropertyDef, TypeSig},
    Result,
};

/// A rendered property or indexer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyDescriptor {
    /// Shared member data; accessor and modifiers come from the dominant accessor method
    pub info: MemberInfo,
    /// The property type
    pub type_descriptor: TypeDescriptor,
    /// Index parameters (empty unless this is an indexer)
    pub parameters: Vec<ParameterDescriptor>,
    /// A `get` accessor exists
    pub has_getter: bool,
    /// A `set` accessor exists
    pub has_setter: bool,
    /// The rendered `get` accessor
    pub getter: Option<MethodDescriptor>,
    /// The rendered `set` accessor
    pub setter: Option<MethodDescriptor>,
    /// The accessor clause (`get; protected set;`)
    pub accessor_declaration: String,
    /// Name, plus index parameter types for indexers
    pub signature_key: String,
    /// The declaration (`public string Name { get; protected set; }`)
    pub declaration: String,
}

impl PropertyDescriptor {
    /// Render a property
    ///
    /// The property's accessor is the higher of its accessors' ones; an accessor with a lower
    /// accessor is named explicitly in the accessor clause. The property is excluded when that
    /// aggregate accessor is below the visibility threshold.
    ///
    /// ## Arguments
    /// * 'property' - The property definition
    /// * 'ctx'      - The render context
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedMember`] for a property without any accessor.
    pub fn render(property: &PropertyDef, ctx: &RenderContext<'_>) -> Result<Self> {
        let getter = property
            .getter
            .as_ref()
            .map(|method| MethodDescriptor::render(method, ctx, false))
            .transpose()?;
        let setter = property
            .setter
            .as_ref()
            .map(|method| MethodDescriptor::render(method, ctx, false))
            .transpose()?;

        let Some(main) = dominant(getter.as_ref(), setter.as_ref()) else {
            return Err(malformed_error!(
                "property '{}' has neither a getter nor a setter",
                property.name
            ));
        };

        let mut info = MemberInfo::new(&property.name, main.info.accessor, ctx);
        if property.name.starts_with('<') || !ctx.config.admits(info.accessor) {
            log::trace!("excluding property {}", property.name);
            return Ok(PropertyDescriptor {
                info: info.exclude(),
                ..PropertyDescriptor::default()
            });
        }

        info.set_modifiers(main.info.modifiers);
        info.is_static = main.info.is_static;
        info.attributes = render_attributes(
            &ctx.provider
                .custom_attributes(AttributeTarget::Property(property)),
        );

        let mut descriptor = PropertyDescriptor {
            info,
            type_descriptor: TypeDescriptor::from_sig(&property.property_type),
            parameters: property
                .params
                .iter()
                .map(|param| ParameterDescriptor::new(param, ctx.provider))
                .collect(),
            has_getter: getter.is_some(),
            has_setter: setter.is_some(),
            getter,
            setter,
            accessor_declaration: String::new(),
            signature_key: String::new(),
            declaration: String::new(),
        };
        descriptor.finish();
        Ok(descriptor)
    }

    /// Returns true for indexers (`this[...]`)
    #[must_use]
    pub fn is_indexer(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Replace the property type and rebuild the declaration
    ///
    /// ## Arguments
    /// * 'sig' - The new property type
    pub fn retype(&mut self, sig: &TypeSig) {
        self.type_descriptor = TypeDescriptor::from_sig(sig);
        self.finish();
    }

    /// Recompute accessor clause, signature key and declaration from the descriptor's fields
    pub fn finish(&mut self) {
        let accessor = self.info.accessor;
        let clause = |keyword: &str, method: &Option<MethodDescriptor>| {
            method.as_ref().map(|method| {
                if method.info.accessor < accessor {
                    format!("{} {};", method.info.accessor.keyword(), keyword)
                } else {
                    format!("{};", keyword)
                }
            })
        };
        self.accessor_declaration = [clause("get", &self.getter), clause("set", &self.setter)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        let name = if self.is_indexer() {
            let types: Vec<String> = self
                .parameters
                .iter()
                .map(ParameterDescriptor::type_key)
                .collect();
            self.signature_key = format!("{}[{}]", self.info.name, types.join(","));
            format!("this[{}]", parameter_list(&self.parameters, false))
        } else {
            self.signature_key = self.info.name.clone();
            self.info.name.clone()
        };

        let prefix = self.info.prefix();
        let body = format!("{{ {} }}", self.accessor_declaration);
        self.declaration = join_parts(&[
            prefix.as_str(),
            self.type_descriptor.display_name.as_str(),
            name.as_str(),
            body.as_str(),
        ]);
    }
}
