//! Custom attribute rendering.
//!
//! Each attribute usage becomes an [`AttributeDescriptor`] with its constructor and named
//! arguments paired with their names and types, and a bracketed declaration such as
//! `[System.ObsoleteAttribute("Use Display", false)]`.
//!
//! Argument values are kept unquoted in [`AttributeArgumentDescriptor::value`] and as source
//! literals in [`AttributeArgumentDescriptor::literal`]. Quoting follows the value itself, so a
//! null passed for a string parameter stays `null`.

use crate::{
    declarations::typeinfo::TypeDescriptor,
    metadata::{AttributeArgument, AttributeValue, ConstantValue, CustomAttribute, CustomAttributeRc},
};

/// One constructor or named argument of an attribute usage
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeArgumentDescriptor {
    /// Constructor parameter name, or the assigned field/property name
    pub name: String,
    /// The argument's type
    pub type_descriptor: TypeDescriptor,
    /// The value as text, unquoted
    pub value: String,
    /// The value as it appears in a declaration (`"text"`, `','`, `null`, `typeof(T)`)
    pub literal: String,
}

impl AttributeArgumentDescriptor {
    fn from_argument(name: &str, argument: &AttributeArgument) -> Self {
        AttributeArgumentDescriptor {
            name: name.to_string(),
            type_descriptor: TypeDescriptor::from_sig(&argument.arg_type),
            value: value_text(&argument.value, ConstantValue::to_string),
            literal: value_text(&argument.value, ConstantValue::to_literal),
        }
    }
}

/// A rendered custom attribute usage
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeDescriptor {
    /// The attribute class
    pub type_descriptor: TypeDescriptor,
    /// Positional arguments, paired with the constructor's parameter names
    pub constructor_args: Vec<AttributeArgumentDescriptor>,
    /// Field and property assignments
    pub named_args: Vec<AttributeArgumentDescriptor>,
    /// The argument list without brackets (`"Use Display", false, Message = "x"`)
    pub parameter_declaration: String,
    /// The bracketed declaration
    pub declaration: String,
}

/// Render every attribute of an entity
///
/// ## Arguments
/// * 'attributes' - The raw attribute usages, in provider order
pub fn render_attributes(attributes: &[CustomAttributeRc]) -> Vec<AttributeDescriptor> {
    attributes
        .iter()
        .map(|attribute| render_attribute(attribute))
        .collect()
}

/// Render one attribute usage
///
/// ## Arguments
/// * 'attribute' - The raw attribute usage
pub fn render_attribute(attribute: &CustomAttribute) -> AttributeDescriptor {
    let type_descriptor = TypeDescriptor::from_sig(&attribute.attribute_type);

    let constructor_args: Vec<AttributeArgumentDescriptor> = attribute
        .fixed_args
        .iter()
        .enumerate()
        .map(|(index, argument)| {
            let name = attribute
                .constructor_params
                .get(index)
                .map_or("", String::as_str);
            AttributeArgumentDescriptor::from_argument(name, argument)
        })
        .collect();

    let named_args: Vec<AttributeArgumentDescriptor> = attribute
        .named_args
        .iter()
        .map(|named| AttributeArgumentDescriptor::from_argument(&named.name, &named.argument))
        .collect();

    let parameter_declaration = constructor_args
        .iter()
        .map(|arg| arg.literal.clone())
        .chain(
            named_args
                .iter()
                .map(|arg| format!("{} = {}", arg.name, arg.literal)),
        )
        .collect::<Vec<_>>()
        .join(", ");

    let declaration = if constructor_args.is_empty() && named_args.is_empty() {
        format!("[{}]", type_descriptor.full_display_name)
    } else {
        format!(
            "[{}({})]",
            type_descriptor.full_display_name, parameter_declaration
        )
    };

    AttributeDescriptor {
        type_descriptor,
        constructor_args,
        named_args,
        parameter_declaration,
        declaration,
    }
}

/// Text of an attribute value; `constant` formats the top-level constant, array elements
/// always use their source literal
fn value_text(value: &AttributeValue, constant: fn(&ConstantValue) -> String) -> String {
    match value {
        AttributeValue::Constant(value) => constant(value),
        AttributeValue::Type(sig) => {
            format!("typeof({})", TypeDescriptor::from_sig(sig).display_name)
        }
        AttributeValue::Enum { enum_type, value } => format!(
            "({}){}",
            TypeDescriptor::from_sig(enum_type).display_name,
            value
        ),
        AttributeValue::Array(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| value_text(item, ConstantValue::to_literal))
                .collect();
            format!("new[] {{ {} }}", items.join(", "))
        }
    }
}
