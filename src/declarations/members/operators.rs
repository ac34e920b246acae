//! Operator method names.
//!
//! User-defined operators are compiled into static special-name methods called `op_<Name>`.
//! This table maps them back to the symbols used in source.

/// Prefix of every operator method name
pub const OPERATOR_PREFIX: &str = "op_";

const SYMBOLS: &[(&str, &str)] = &[
    ("op_Addition", "+"),
    ("op_Subtraction", "-"),
    ("op_Multiply", "*"),
    ("op_Division", "/"),
    ("op_Modulus", "%"),
    ("op_BitwiseAnd", "&"),
    ("op_BitwiseOr", "|"),
    ("op_ExclusiveOr", "^"),
    ("op_LeftShift", "<<"),
    ("op_RightShift", ">>"),
    ("op_UnsignedRightShift", ">>>"),
    ("op_Equality", "=="),
    ("op_Inequality", "!="),
    ("op_LessThan", "<"),
    ("op_GreaterThan", ">"),
    ("op_LessThanOrEqual", "<="),
    ("op_GreaterThanOrEqual", ">="),
    ("op_UnaryNegation", "-"),
    ("op_UnaryPlus", "+"),
    ("op_LogicalNot", "!"),
    ("op_OnesComplement", "~"),
    ("op_Increment", "++"),
    ("op_Decrement", "--"),
    ("op_True", "true"),
    ("op_False", "false"),
];

/// Kind of conversion operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Conversion {
    /// `op_Implicit`
    Implicit,
    /// `op_Explicit`
    Explicit,
}

/// Returns the conversion kind of an operator method name
///
/// ## Arguments
/// * 'name' - The metadata name
pub fn conversion(name: &str) -> Option<Conversion> {
    match name {
        "op_Implicit" => Some(Conversion::Implicit),
        "op_Explicit" => Some(Conversion::Explicit),
        _ => None,
    }
}

/// Returns the source symbol of an operator method name, falling back to the stripped name
///
/// ## Arguments
/// * 'name' - The metadata name (`op_Addition`)
pub fn symbol(name: &str) -> &str {
    SYMBOLS
        .iter()
        .find(|(method, _)| *method == name)
        .map_or_else(|| strip_prefix(name), |(_, symbol)| *symbol)
}

/// Removes the `op_` prefix
pub fn strip_prefix(name: &str) -> &str {
    name.strip_prefix(OPERATOR_PREFIX).unwrap_or(name)
}
