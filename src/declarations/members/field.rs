use crate::{
    declarations::{
        accessor::{join_parts, Accessor, Modifiers},
        attribute::render_attributes,
        members::{MemberInfo, RenderContext},
        typeinfo::TypeDescriptor,
    },
    metadata::{AttributeTarget, FieldDef, TypeSig},
};

/// Name of the instance field backing an enum's value
const ENUM_VALUE_FIELD: &str = "value__";

/// A rendered field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldDescriptor {
    /// Shared member data
    pub info: MemberInfo,
    /// The field type
    pub type_descriptor: TypeDescriptor,
    /// The constant value as text, unquoted (empty for non-constant fields)
    pub value: String,
    /// The constant value as a source literal (`"S-"`, `'A'`, `null`)
    pub literal: String,
    /// `const`
    pub is_constant: bool,
    /// `readonly`
    pub is_readonly: bool,
    /// The declaration (`public const string Prefix = "S-"`)
    pub declaration: String,
}

impl FieldDescriptor {
    /// Render a field
    ///
    /// Enum backing fields (`value__`) and compiler-generated fields (`<Name>k__BackingField`)
    /// are excluded, as is any field below the visibility threshold.
    ///
    /// ## Arguments
    /// * 'field' - The field definition
    /// * 'ctx'   - The render context
    pub fn render(field: &FieldDef, ctx: &RenderContext<'_>) -> Self {
        let accessor = Accessor::from_member_access(field.access_code());
        let mut info = MemberInfo::new(&field.name, accessor, ctx);

        if field.name == ENUM_VALUE_FIELD
            || field.name.starts_with('<')
            || !ctx.config.admits(accessor)
        {
            log::trace!("excluding field {}", field.name);
            return FieldDescriptor {
                info: info.exclude(),
                ..FieldDescriptor::default()
            };
        }

        let is_constant = field.is_literal();
        let is_readonly = field.is_init_only();
        let mut modifiers = Modifiers::empty();
        if is_constant {
            modifiers |= Modifiers::CONST;
        } else {
            if field.is_static() {
                modifiers |= Modifiers::STATIC;
            }
            if is_readonly {
                modifiers |= Modifiers::READONLY;
            }
        }
        info.set_modifiers(modifiers);
        info.is_static = field.is_static();
        info.attributes =
            render_attributes(&ctx.provider.custom_attributes(AttributeTarget::Field(field)));

        let (value, literal) = match (&field.constant, is_constant) {
            (Some(constant), true) => (constant.to_string(), constant.to_literal()),
            _ => (String::new(), String::new()),
        };

        let mut descriptor = FieldDescriptor {
            info,
            type_descriptor: TypeDescriptor::from_sig(&field.field_type),
            value,
            literal,
            is_constant,
            is_readonly,
            declaration: String::new(),
        };
        descriptor.finish();
        descriptor
    }

    /// Replace the field type and rebuild the declaration
    ///
    /// ## Arguments
    /// * 'sig' - The new field type
    pub fn retype(&mut self, sig: &TypeSig) {
        self.type_descriptor = TypeDescriptor::from_sig(sig);
        self.finish();
    }

    /// Recompute the declaration from the descriptor's fields
    pub fn finish(&mut self) {
        let prefix = self.info.prefix();
        let mut declaration = join_parts(&[
            prefix.as_str(),
            self.type_descriptor.display_name.as_str(),
            self.info.name.as_str(),
        ]);
        if self.is_constant && !self.literal.is_empty() {
            declaration.push_str(" = ");
            declaration.push_str(&self.literal);
        }
        self.declaration = declaration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::TraversalConfig,
        metadata::{ConstantValue, CustomAttributeBuilder, FieldDefBuilder, MetadataStore},
    };

    fn render(field: FieldDefBuilder, config: TraversalConfig) -> FieldDescriptor {
        let store = MetadataStore::new();
        let owner = TypeDescriptor::from_sig(&TypeSig::path("Dummy.DummyClass"));
        let ctx = RenderContext::new(&store, config, &owner);
        FieldDescriptor::render(&field.build(), &ctx)
    }

    #[test]
    fn instance_field() {
        let field = render(
            FieldDefBuilder::new("name", TypeSig::string()).public(),
            TraversalConfig::default(),
        );
        assert!(!field.info.excluded);
        assert!(!field.info.is_static);
        assert_eq!(field.info.accessor, Accessor::Public);
        assert_eq!(field.declaration, "public string name");
    }

    #[test]
    fn static_readonly_field() {
        let field = render(
            FieldDefBuilder::new("Instances", TypeSig::int32())
                .protected()
                .static_()
                .readonly(),
            TraversalConfig::default(),
        );
        assert!(field.info.is_static);
        assert!(field.is_readonly);
        assert_eq!(field.info.modifier, "static readonly");
        assert_eq!(field.declaration, "protected static readonly int Instances");
    }

    #[test]
    fn constant_fields_show_their_value() {
        let text = render(
            FieldDefBuilder::new("Prefix", TypeSig::string())
                .public()
                .constant(ConstantValue::String("S-".into())),
            TraversalConfig::default(),
        );
        assert!(text.is_constant);
        assert!(text.info.is_static);
        assert_eq!(text.value, "S-");
        assert_eq!(text.declaration, "public const string Prefix = \"S-\"");

        let flag = render(
            FieldDefBuilder::new("Enabled", TypeSig::boolean())
                .public()
                .constant(ConstantValue::Boolean(true)),
            TraversalConfig::default(),
        );
        assert_eq!(flag.declaration, "public const bool Enabled = true");

        let letter = render(
            FieldDefBuilder::new("Grade", TypeSig::system("Char"))
                .public()
                .constant(ConstantValue::Char('A')),
            TraversalConfig::default(),
        );
        assert_eq!(letter.declaration, "public const char Grade = 'A'");
    }

    #[test]
    fn string_constant_spelled_null_stays_quoted() {
        let word = render(
            FieldDefBuilder::new("Word", TypeSig::string())
                .public()
                .constant(ConstantValue::String("null".into())),
            TraversalConfig::default(),
        );
        assert_eq!(word.value, "null");
        assert_eq!(word.declaration, "public const string Word = \"null\"");

        let nothing = render(
            FieldDefBuilder::new("Nothing", TypeSig::string())
                .public()
                .constant(ConstantValue::Null),
            TraversalConfig::default(),
        );
        assert_eq!(nothing.declaration, "public const string Nothing = null");

        let empty = render(
            FieldDefBuilder::new("Empty", TypeSig::string())
                .public()
                .constant(ConstantValue::String(String::new())),
            TraversalConfig::default(),
        );
        assert_eq!(empty.declaration, "public const string Empty = \"\"");
    }

    #[test]
    fn compiler_fields_are_excluded() {
        let backing = render(
            FieldDefBuilder::new("<Name>k__BackingField", TypeSig::string()),
            TraversalConfig::default(),
        );
        assert!(backing.info.excluded);
        assert!(backing.declaration.is_empty());

        let value = render(
            FieldDefBuilder::new("value__", TypeSig::int32())
                .public()
                .runtime_special(),
            TraversalConfig::default(),
        );
        assert!(value.info.excluded);
    }

    #[test]
    fn threshold_excludes_private_fields() {
        let field = render(
            FieldDefBuilder::new("secret", TypeSig::string()).private(),
            TraversalConfig::protected_and_public(),
        );
        assert!(field.info.excluded);
    }

    #[test]
    fn attributes_are_kept() {
        let field = render(
            FieldDefBuilder::new("legacy", TypeSig::int32())
                .public()
                .attribute(CustomAttributeBuilder::new("System.ObsoleteAttribute")),
            TraversalConfig::default(),
        );
        assert_eq!(field.info.attributes[0].declaration, "[System.ObsoleteAttribute]");
    }
}
