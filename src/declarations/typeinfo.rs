//! Type descriptors: the normalized view of a type or type reference.
//!
//! A [`TypeDescriptor`] pairs the provider's identity key with the display names produced by
//! [`crate::names::resolve`] and the generic parameters of the type. It also keeps the
//! [`TypeSig`] it was built from, so generic substitution can rewrite the expression tree and
//! rebuild the descriptor instead of editing display text.

use strum::Display;

use crate::{
    metadata::{GenericParamDef, MetadataProvider, TypeDef, TypeSig},
    names::{localize, resolve, strip_generic_suffix, unlocalize},
};

/// Normalized description of a type or type reference
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeDescriptor {
    /// The provider's raw, arity-suffixed name
    pub identity_key: String,
    /// Display name (`List<string>`)
    pub display_name: String,
    /// Namespace-qualified display name
    pub full_display_name: String,
    /// The namespace
    pub namespace: String,
    /// Generic parameters (formal for definitions, inferred arguments for instantiations)
    pub generic_parameters: Vec<GenericParamDescriptor>,
    /// The type expression this descriptor was built from; `None` for the empty descriptor
    pub sig: Option<TypeSig>,
}

impl TypeDescriptor {
    /// The empty descriptor, used where a base type is suppressed
    #[must_use]
    pub fn empty() -> Self {
        TypeDescriptor::default()
    }

    /// Returns true for the empty descriptor
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identity_key.is_empty()
    }

    /// Build the descriptor of a type reference
    ///
    /// Generic arguments of an instantiation are inferred from the localized argument list.
    ///
    /// ## Arguments
    /// * 'sig' - The type expression
    #[must_use]
    pub fn from_sig(sig: &TypeSig) -> Self {
        let raw = sig.full_name();
        let resolved = resolve(&raw, sig.namespace(), &[]);

        let generic_parameters = sig
            .generic_args()
            .iter()
            .map(|arg| GenericParamDescriptor::inferred(&arg.full_name()))
            .collect();

        TypeDescriptor {
            identity_key: resolved.identity_key,
            display_name: resolved.display_name,
            full_display_name: resolved.full_display_name,
            namespace: resolved.namespace,
            generic_parameters,
            sig: Some(sig.clone()),
        }
    }

    /// Build the descriptor of a type definition, using its own formal generic parameters
    ///
    /// ## Arguments
    /// * 'def'      - The type definition
    /// * 'provider' - The metadata provider
    pub fn from_def(def: &TypeDef, provider: &dyn MetadataProvider) -> Self {
        let formal = provider.generic_parameters(def);
        if formal.is_empty() {
            return Self::from_sig(&def.sig());
        }

        let names: Vec<String> = formal.iter().map(|param| param.name.clone()).collect();
        let resolved = resolve(&def.full_name(), &def.namespace, &names);

        TypeDescriptor {
            identity_key: resolved.identity_key,
            display_name: resolved.display_name,
            full_display_name: resolved.full_display_name,
            namespace: resolved.namespace,
            generic_parameters: formal
                .iter()
                .map(|param| GenericParamDescriptor::from_def(param))
                .collect(),
            sig: Some(def.sig()),
        }
    }

    /// The name as written in the type's own declaration: the display name, with variance
    /// annotations on the generic parameters (`IProducer<out T>`)
    #[must_use]
    pub fn declared_name(&self) -> String {
        if self
            .generic_parameters
            .iter()
            .all(|param| param.variance == Variance::Invariant)
        {
            return self.display_name.clone();
        }
        format!(
            "{}{}",
            strip_generic_suffix(&self.display_name),
            generic_list(&self.generic_parameters)
        )
    }
}

/// Variance of an interface or delegate type parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Variance {
    /// No variance annotation
    #[default]
    #[strum(to_string = "")]
    Invariant,
    /// `out T`
    #[strum(to_string = "out")]
    Covariant,
    /// `in T`
    #[strum(to_string = "in")]
    Contravariant,
}

/// A generic parameter with its constraints
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenericParamDescriptor {
    /// The arity-suffixed form (``Dictionary`2`` for `Dictionary<K, V>`)
    pub unlocalized_name: String,
    /// The display name; never keyword-aliased for declared parameters
    pub display_name: String,
    /// Type constraints
    pub constraints: Vec<TypeDescriptor>,
    /// `class` constraint
    pub is_reference_type: bool,
    /// `struct` constraint
    pub is_value_type: bool,
    /// `new()` constraint
    pub has_default_constructor: bool,
    /// Declared variance
    pub variance: Variance,
}

impl GenericParamDescriptor {
    /// Build the descriptor of a declared generic parameter
    ///
    /// The implicit `System.ValueType` constraint of a `struct`-constrained parameter is
    /// dropped, and so is the implied `new()`.
    ///
    /// ## Arguments
    /// * 'param' - The generic parameter definition
    #[must_use]
    pub fn from_def(param: &GenericParamDef) -> Self {
        let is_value_type = param.has_value_type_constraint();
        let constraints = param
            .constraints
            .iter()
            .filter(|constraint| !(is_value_type && constraint.is_system("ValueType")))
            .map(TypeDescriptor::from_sig)
            .collect();

        GenericParamDescriptor {
            unlocalized_name: unlocalize(&param.name),
            display_name: param.name.clone(),
            constraints,
            is_reference_type: param.has_reference_type_constraint(),
            is_value_type,
            has_default_constructor: !is_value_type && param.has_default_constructor_constraint(),
            variance: if param.is_covariant() {
                Variance::Covariant
            } else if param.is_contravariant() {
                Variance::Contravariant
            } else {
                Variance::Invariant
            },
        }
    }

    /// Build the descriptor of an argument parsed out of an instantiated name
    ///
    /// ## Arguments
    /// * 'raw_arg' - The raw argument name (``System.String``, ``List`1<T>``)
    #[must_use]
    pub fn inferred(raw_arg: &str) -> Self {
        let display_name = localize(raw_arg);
        GenericParamDescriptor {
            unlocalized_name: unlocalize(&display_name),
            display_name,
            ..GenericParamDescriptor::default()
        }
    }

    /// Returns true if the parameter declares any constraint
    #[must_use]
    pub fn has_constraints(&self) -> bool {
        !self.constraints.is_empty()
            || self.is_reference_type
            || self.is_value_type
            || self.has_default_constructor
    }

    /// The constraint list of a `where` clause (`class, IMember, new()`)
    #[must_use]
    pub fn constraint_list(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.is_reference_type {
            parts.push("class");
        }
        if self.is_value_type {
            parts.push("struct");
        }
        parts.extend(self.constraints.iter().map(|c| c.display_name.as_str()));
        if self.has_default_constructor {
            parts.push("new()");
        }
        parts.join(", ")
    }

    /// The name as written in a parameter list, with its variance (`out T`)
    #[must_use]
    pub fn declared_name(&self) -> String {
        match self.variance {
            Variance::Invariant => self.display_name.clone(),
            variance => format!("{} {}", variance, self.display_name),
        }
    }

    /// The `where` clause of this parameter, if it declares constraints
    #[must_use]
    pub fn where_clause(&self) -> Option<String> {
        self.has_constraints()
            .then(|| format!("where {} : {}", self.display_name, self.constraint_list()))
    }
}

/// Render a generic parameter list (`<T, K>`), empty when there are no parameters
pub fn generic_list(params: &[GenericParamDescriptor]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let names: Vec<String> = params.iter().map(GenericParamDescriptor::declared_name).collect();
    format!("<{}>", names.join(", "))
}

/// Render all `where` clauses of a parameter list, each preceded by a space
pub fn where_clauses(params: &[GenericParamDescriptor]) -> String {
    params
        .iter()
        .filter_map(GenericParamDescriptor::where_clause)
        .map(|clause| format!(" {}", clause))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{GenericParamDefBuilder, MetadataStore, TypeDefBuilder};

    #[test]
    fn reference_descriptor() {
        let sig = TypeSig::generic(
            "System.Collections.Generic.Dictionary`2",
            vec![TypeSig::string(), TypeSig::array(TypeSig::int32())],
        );
        let descriptor = TypeDescriptor::from_sig(&sig);

        assert_eq!(
            descriptor.identity_key,
            "System.Collections.Generic.Dictionary`2<System.String,System.Int32[]>"
        );
        assert_eq!(descriptor.display_name, "Dictionary<string, int[]>");
        assert_eq!(
            descriptor.full_display_name,
            "System.Collections.Generic.Dictionary<string, int[]>"
        );
        assert_eq!(descriptor.namespace, "System.Collections.Generic");
        let inferred: Vec<&str> = descriptor
            .generic_parameters
            .iter()
            .map(|p| p.display_name.as_str())
            .collect();
        assert_eq!(inferred, vec!["string", "int[]"]);
    }

    #[test]
    fn definition_descriptor_uses_formal_parameters() {
        let store = MetadataStore::new();
        let def = TypeDefBuilder::class("SchoolSys", "GuestMember`1")
            .public()
            .generic_param(
                GenericParamDefBuilder::new("T").constraint(TypeSig::path("SchoolSys.IMember")),
            )
            .build("SchoolSys");

        let descriptor = TypeDescriptor::from_def(&def, &store);
        assert_eq!(descriptor.identity_key, "SchoolSys.GuestMember`1");
        assert_eq!(descriptor.display_name, "GuestMember<T>");
        assert_eq!(descriptor.full_display_name, "SchoolSys.GuestMember<T>");

        let param = &descriptor.generic_parameters[0];
        assert_eq!(param.display_name, "T");
        assert_eq!(param.constraints[0].display_name, "IMember");
        assert_eq!(param.where_clause().as_deref(), Some("where T : IMember"));
    }

    #[test]
    fn struct_constraint_hides_implicit_parts() {
        let def = TypeDefBuilder::class("SchoolSys", "DataTree`1")
            .generic_param(GenericParamDefBuilder::new("TKey").struct_constraint())
            .build("SchoolSys");
        let param = GenericParamDescriptor::from_def(&def.generic_params[0]);

        assert!(param.constraints.is_empty());
        assert_eq!(param.constraint_list(), "struct");
    }

    #[test]
    fn special_constraints_order() {
        let def = TypeDefBuilder::class("Dummy", "Factory`1")
            .generic_param(
                GenericParamDefBuilder::new("T")
                    .class_constraint()
                    .constraint(TypeSig::path("System.IDisposable"))
                    .new_constraint(),
            )
            .build("Dummy");
        let param = GenericParamDescriptor::from_def(&def.generic_params[0]);
        assert_eq!(param.constraint_list(), "class, IDisposable, new()");
    }

    #[test]
    fn generic_list_and_clauses() {
        let params = vec![
            GenericParamDescriptor {
                display_name: "J".into(),
                unlocalized_name: "J".into(),
                ..Default::default()
            },
            GenericParamDescriptor {
                display_name: "K".into(),
                unlocalized_name: "K".into(),
                is_value_type: true,
                ..Default::default()
            },
        ];
        assert_eq!(generic_list(&params), "<J, K>");
        assert_eq!(where_clauses(&params), " where K : struct");
        assert_eq!(generic_list(&[]), "");
    }

    #[test]
    fn variance_is_declared() {
        let def = TypeDefBuilder::interface("Dummy", "IConverter`2")
            .public()
            .generic_param(GenericParamDefBuilder::new("TIn").contravariant())
            .generic_param(GenericParamDefBuilder::new("TOut").covariant())
            .build("Dummy");
        let descriptor = TypeDescriptor::from_def(&def, &MetadataStore::new());

        assert_eq!(descriptor.generic_parameters[0].variance, Variance::Contravariant);
        assert_eq!(descriptor.generic_parameters[1].variance, Variance::Covariant);
        assert_eq!(descriptor.display_name, "IConverter<TIn, TOut>");
        assert_eq!(descriptor.declared_name(), "IConverter<in TIn, out TOut>");
        assert_eq!(generic_list(&descriptor.generic_parameters), "<in TIn, out TOut>");

        let plain = TypeDescriptor::from_sig(&TypeSig::string());
        assert_eq!(plain.declared_name(), "string");
    }

    #[test]
    fn empty_descriptor() {
        assert!(TypeDescriptor::empty().is_empty());
        assert!(!TypeDescriptor::from_sig(&TypeSig::object()).is_empty());
    }
}
