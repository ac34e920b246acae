//! Structured type expressions handed out by the metadata provider.
//!
//! Every place where the provider model refers to a type (a field's type, a method's return
//! type, a base type, a generic constraint, ...) uses a [`TypeSig`] tree instead of a flat
//! string. The tree keeps generic instantiations as a container plus an argument list, so
//! generic substitution can rewrite exactly the nodes that denote a formal parameter.
//!
//! The provider's raw textual form, which the name resolver consumes, is produced on demand
//! by [`TypeSig::full_name`]:
//!
//! | Tree                                         | `full_name()`                                   |
//! |----------------------------------------------|-------------------------------------------------|
//! | `Named(System.Int32)`                        | `System.Int32`                                  |
//! | `Named(SchoolSys.HiddenMember/Inner)`        | `SchoolSys.HiddenMember/Inner`                  |
//! | `GenericInst(List`1, [String])`              | ``System.Collections.Generic.List`1<System.String>`` |
//! | `Array(Int32, rank 1)` / `rank 2`            | `System.Int32[]` / `System.Int32[,]`            |
//! | `ByRef(T)`                                   | `T&`                                            |

use std::fmt;

/// The namespace of the runtime's core types
pub const SYSTEM_NAMESPACE: &str = "System";

/// A reference to a named type definition: namespace, enclosing types and simple name.
///
/// All names are kept exactly as stored in metadata, including arity markers (`` `1 ``).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypeName {
    /// Namespace of the outermost enclosing type (empty for the global namespace)
    pub namespace: String,
    /// Enclosing type names, outermost first (empty for top-level types)
    pub enclosing: Vec<String>,
    /// Simple name of the type, including its arity marker
    pub name: String,
}

impl TypeName {
    /// Create a reference to a top-level type
    ///
    /// ## Arguments
    /// * 'namespace' - The namespace of the type (may be empty)
    /// * 'name'      - The metadata name of the type (e.g. ``List`1``)
    pub fn new(namespace: &str, name: &str) -> Self {
        TypeName {
            namespace: namespace.to_string(),
            enclosing: Vec::new(),
            name: name.to_string(),
        }
    }

    /// Create a reference to a nested type
    ///
    /// ## Arguments
    /// * 'namespace' - The namespace of the outermost enclosing type
    /// * 'enclosing' - Enclosing type names, outermost first
    /// * 'name'      - The metadata name of the nested type
    pub fn nested(namespace: &str, enclosing: &[&str], name: &str) -> Self {
        TypeName {
            namespace: namespace.to_string(),
            enclosing: enclosing.iter().map(|s| (*s).to_string()).collect(),
            name: name.to_string(),
        }
    }

    /// Parse a metadata type path (``NS.Outer`1/Inner``) into a `TypeName`
    ///
    /// Nested types are separated by `/`; the namespace is everything before the last `.`
    /// of the first segment.
    ///
    /// ## Arguments
    /// * 'path' - The fully qualified, arity-suffixed path
    pub fn parse(path: &str) -> Self {
        let mut segments = path.split('/');
        let outermost = segments.next().unwrap_or_default();
        let (namespace, first) = match outermost.rfind('.') {
            Some(dot) => (&outermost[..dot], &outermost[dot + 1..]),
            None => ("", outermost),
        };

        let mut names: Vec<String> = std::iter::once(first.to_string())
            .chain(segments.map(str::to_string))
            .collect();
        let name = names.pop().unwrap_or_default();

        TypeName {
            namespace: namespace.to_string(),
            enclosing: names,
            name,
        }
    }

    /// Returns the full metadata name (``Namespace.Outer`1/Inner``)
    #[must_use]
    pub fn full_name(&self) -> String {
        let mut full = String::new();
        if !self.namespace.is_empty() {
            full.push_str(&self.namespace);
            full.push('.');
        }
        for outer in &self.enclosing {
            full.push_str(outer);
            full.push('/');
        }
        full.push_str(&self.name);
        full
    }

    /// Returns true if this type is nested inside another type
    #[must_use]
    pub fn is_nested(&self) -> bool {
        !self.enclosing.is_empty()
    }

    /// Returns true if this names `System.<name>`
    #[must_use]
    pub fn is_system(&self, name: &str) -> bool {
        !self.is_nested() && self.namespace == SYSTEM_NAMESPACE && self.name == name
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

/// Who declares a generic parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericOwner {
    /// Declared by a type (`class Base<T>`)
    Type,
    /// Declared by a method (`void Send<K>()`)
    Method,
}

/// A structured type expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSig {
    /// A named, non-instantiated type
    Named(TypeName),
    /// A generic type instantiated with arguments (`List<string>`, `Base<T>`)
    GenericInst {
        /// The generic type definition being instantiated
        base: TypeName,
        /// The type arguments, in declaration order
        args: Vec<TypeSig>,
    },
    /// A reference to a generic parameter (`T`)
    GenericParam {
        /// The declared name of the parameter
        name: String,
        /// Position in the owner's generic parameter list
        index: u32,
        /// Whether a type or a method declares the parameter
        owner: GenericOwner,
    },
    /// An array of an element type
    Array {
        /// The element type
        element: Box<TypeSig>,
        /// The number of dimensions
        rank: u32,
    },
    /// A managed reference (`ref`/`out`/`in` parameter types)
    ByRef(Box<TypeSig>),
    /// An unmanaged pointer
    Pointer(Box<TypeSig>),
}

impl TypeSig {
    /// A named top-level type
    pub fn named(namespace: &str, name: &str) -> Self {
        TypeSig::Named(TypeName::new(namespace, name))
    }

    /// A named type parsed from its metadata path (``NS.Outer/Inner``)
    pub fn path(path: &str) -> Self {
        TypeSig::Named(TypeName::parse(path))
    }

    /// A core runtime type (`System.<name>`)
    pub fn system(name: &str) -> Self {
        TypeSig::named(SYSTEM_NAMESPACE, name)
    }

    /// `System.Void`
    #[must_use]
    pub fn void() -> Self {
        TypeSig::system("Void")
    }

    /// `System.Object`
    #[must_use]
    pub fn object() -> Self {
        TypeSig::system("Object")
    }

    /// `System.String`
    #[must_use]
    pub fn string() -> Self {
        TypeSig::system("String")
    }

    /// `System.Boolean`
    #[must_use]
    pub fn boolean() -> Self {
        TypeSig::system("Boolean")
    }

    /// `System.Int32`
    #[must_use]
    pub fn int32() -> Self {
        TypeSig::system("Int32")
    }

    /// A generic instantiation of the type at `path`
    pub fn generic(path: &str, args: Vec<TypeSig>) -> Self {
        TypeSig::GenericInst {
            base: TypeName::parse(path),
            args,
        }
    }

    /// A reference to the `index`-th generic parameter of the enclosing type
    pub fn type_param(name: &str, index: u32) -> Self {
        TypeSig::GenericParam {
            name: name.to_string(),
            index,
            owner: GenericOwner::Type,
        }
    }

    /// A reference to the `index`-th generic parameter of the enclosing method
    pub fn method_param(name: &str, index: u32) -> Self {
        TypeSig::GenericParam {
            name: name.to_string(),
            index,
            owner: GenericOwner::Method,
        }
    }

    /// A single-dimensional array of `element`
    #[must_use]
    pub fn array(element: TypeSig) -> Self {
        TypeSig::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    /// A managed reference to `element`
    #[must_use]
    pub fn by_ref(element: TypeSig) -> Self {
        TypeSig::ByRef(Box::new(element))
    }

    /// An unmanaged pointer to `element`
    #[must_use]
    pub fn pointer(element: TypeSig) -> Self {
        TypeSig::Pointer(Box::new(element))
    }

    /// Returns the provider's raw, arity-suffixed textual form of this type
    #[must_use]
    pub fn full_name(&self) -> String {
        match self {
            TypeSig::Named(name) => name.full_name(),
            TypeSig::GenericInst { base, args } => {
                let args: Vec<String> = args.iter().map(TypeSig::full_name).collect();
                format!("{}<{}>", base.full_name(), args.join(","))
            }
            TypeSig::GenericParam { name, .. } => name.clone(),
            TypeSig::Array { element, rank } => {
                let commas = ",".repeat(rank.saturating_sub(1) as usize);
                format!("{}[{}]", element.full_name(), commas)
            }
            TypeSig::ByRef(element) => format!("{}&", element.full_name()),
            TypeSig::Pointer(element) => format!("{}*", element.full_name()),
        }
    }

    /// Returns the identity used in member signature keys
    ///
    /// Same as [`TypeSig::full_name`], except that method generic parameters are positional
    /// (`!!0`), so `Send<J>(J)` and `Send<K>(K)` compare equal.
    #[must_use]
    pub fn signature_key(&self) -> String {
        match self {
            TypeSig::Named(name) => name.full_name(),
            TypeSig::GenericInst { base, args } => {
                let args: Vec<String> = args.iter().map(TypeSig::signature_key).collect();
                format!("{}<{}>", base.full_name(), args.join(","))
            }
            TypeSig::GenericParam {
                index,
                owner: GenericOwner::Method,
                ..
            } => format!("!!{}", index),
            TypeSig::GenericParam { name, .. } => name.clone(),
            TypeSig::Array { element, rank } => {
                let commas = ",".repeat(rank.saturating_sub(1) as usize);
                format!("{}[{}]", element.signature_key(), commas)
            }
            TypeSig::ByRef(element) => format!("{}&", element.signature_key()),
            TypeSig::Pointer(element) => format!("{}*", element.signature_key()),
        }
    }

    /// Returns the namespace this type lives in (the element's namespace for arrays and
    /// references, empty for generic parameters)
    #[must_use]
    pub fn namespace(&self) -> &str {
        match self {
            TypeSig::Named(name) | TypeSig::GenericInst { base: name, .. } => &name.namespace,
            TypeSig::GenericParam { .. } => "",
            TypeSig::Array { element, .. } | TypeSig::ByRef(element) | TypeSig::Pointer(element) => {
                element.namespace()
            }
        }
    }

    /// Returns the definition this type expression names, if it names one directly
    #[must_use]
    pub fn type_name(&self) -> Option<&TypeName> {
        match self {
            TypeSig::Named(name) | TypeSig::GenericInst { base: name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the type arguments of a generic instantiation (empty otherwise)
    #[must_use]
    pub fn generic_args(&self) -> &[TypeSig] {
        match self {
            TypeSig::GenericInst { args, .. } => args,
            _ => &[],
        }
    }

    /// Returns true for a managed reference
    #[must_use]
    pub fn is_by_ref(&self) -> bool {
        matches!(self, TypeSig::ByRef(_))
    }

    /// Strips one level of managed reference (`int&` -> `int`)
    #[must_use]
    pub fn dereferenced(&self) -> &TypeSig {
        match self {
            TypeSig::ByRef(element) => element,
            other => other,
        }
    }

    /// Returns true if this is `System.<name>` (non-generic, not nested)
    #[must_use]
    pub fn is_system(&self, name: &str) -> bool {
        matches!(self, TypeSig::Named(type_name) if type_name.is_system(name))
    }
}

impl fmt::Display for TypeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested_path() {
        let name = TypeName::parse("SchoolSys.HiddenMember/HiddenPublicMember/SuperHiddenMember");
        assert_eq!(name.namespace, "SchoolSys");
        assert_eq!(name.enclosing, vec!["HiddenMember", "HiddenPublicMember"]);
        assert_eq!(name.name, "SuperHiddenMember");
        assert!(name.is_nested());
        assert_eq!(
            name.full_name(),
            "SchoolSys.HiddenMember/HiddenPublicMember/SuperHiddenMember"
        );
    }

    #[test]
    fn parse_global_namespace() {
        let name = TypeName::parse("Program");
        assert_eq!(name.namespace, "");
        assert_eq!(name.full_name(), "Program");
    }

    #[test]
    fn full_names_follow_metadata_format() {
        let list = TypeSig::generic(
            "System.Collections.Generic.List`1",
            vec![TypeSig::string()],
        );
        assert_eq!(
            list.full_name(),
            "System.Collections.Generic.List`1<System.String>"
        );

        let dictionary = TypeSig::generic(
            "System.Collections.Generic.Dictionary`2",
            vec![TypeSig::string(), TypeSig::type_param("T", 0)],
        );
        assert_eq!(
            dictionary.full_name(),
            "System.Collections.Generic.Dictionary`2<System.String,T>"
        );

        let grid = TypeSig::Array {
            element: Box::new(TypeSig::array(TypeSig::object())),
            rank: 2,
        };
        assert_eq!(grid.full_name(), "System.Object[][,]");
        assert_eq!(TypeSig::by_ref(TypeSig::int32()).full_name(), "System.Int32&");
        assert_eq!(TypeSig::pointer(TypeSig::void()).full_name(), "System.Void*");
    }

    #[test]
    fn signature_key_is_positional_for_method_params() {
        let first = TypeSig::generic(
            "System.Collections.Generic.List`1",
            vec![TypeSig::method_param("J", 0)],
        );
        let second = TypeSig::generic(
            "System.Collections.Generic.List`1",
            vec![TypeSig::method_param("K", 0)],
        );
        assert_eq!(first.signature_key(), second.signature_key());
        assert_eq!(first.signature_key(), "System.Collections.Generic.List`1<!!0>");
        assert_eq!(TypeSig::type_param("T", 0).signature_key(), "T");
    }

    #[test]
    fn namespace_and_type_name() {
        let array = TypeSig::array(TypeSig::path("SchoolSys.ISchedule"));
        assert_eq!(array.namespace(), "SchoolSys");
        assert!(array.type_name().is_none());

        let param = TypeSig::method_param("K", 1);
        assert_eq!(param.namespace(), "");
        assert_eq!(param.full_name(), "K");
    }

    #[test]
    fn dereferenced_strips_one_level() {
        let by_ref = TypeSig::by_ref(TypeSig::string());
        assert!(by_ref.is_by_ref());
        assert_eq!(by_ref.dereferenced(), &TypeSig::string());
        assert_eq!(TypeSig::string().dereferenced(), &TypeSig::string());
    }

    #[test]
    fn system_type_checks() {
        assert!(TypeSig::object().is_system("Object"));
        assert!(!TypeSig::path("Dummy.Object").is_system("Object"));
        assert!(!TypeSig::generic("System.Nullable`1", vec![TypeSig::int32()]).is_system("Nullable`1"));
    }
}
