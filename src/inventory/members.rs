//! Member collection across the inheritance chain.
//!
//! [`collect_members`] fills one partition of an inventory (instance fields, static methods,
//! operators, ...). At every level of the [`InheritanceWalk`] it renders the raw members of the
//! requested kind and keeps a member only if
//!
//! - it was not excluded by its renderer,
//! - its static-ness and role (constructor, operator, ordinary) match the partition,
//! - it is not `private` to a base level,
//! - no more-derived level already contributed a member with the same signature key.
//!
//! Inherited members are rewritten with the level's [`crate::generics::Substitution`] before
//! the key comparison, so `Foo(int)` on a derived type hides the `Foo(T)` it overrides on a
//! `Base<int>`.
//!
//! Constructors and operators are never inherited: only the requested type is inspected for
//! them.

use std::collections::HashSet;

use strum::Display;

use crate::{
    config::TraversalConfig,
    declarations::{render_member, Accessor, MemberDescriptor, RenderContext},
    inventory::walker::{InheritanceWalk, Level},
    metadata::{MemberKind, MetadataProvider, TypeDefRc},
};

/// Role a method plays in its type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MemberRole {
    /// Any member that is neither a constructor nor an operator
    Ordinary,
    /// An instance constructor
    Constructor,
    /// A user-defined operator or conversion
    Operator,
}

/// One partition of a type inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberQuery {
    /// The member kind to enumerate
    pub kind: MemberKind,
    /// Static or instance members
    pub is_static: bool,
    /// The required role
    pub role: MemberRole,
}

impl MemberQuery {
    /// Instance or static members of an ordinary kind
    ///
    /// ## Arguments
    /// * 'kind'      - The member kind
    /// * 'is_static' - Select static members
    #[must_use]
    pub fn ordinary(kind: MemberKind, is_static: bool) -> Self {
        MemberQuery {
            kind,
            is_static,
            role: MemberRole::Ordinary,
        }
    }

    /// Instance constructors
    #[must_use]
    pub fn constructors() -> Self {
        MemberQuery {
            kind: MemberKind::Constructor,
            is_static: false,
            role: MemberRole::Constructor,
        }
    }

    /// Operators and conversions
    #[must_use]
    pub fn operators() -> Self {
        MemberQuery {
            kind: MemberKind::Method,
            is_static: true,
            role: MemberRole::Operator,
        }
    }

    /// Returns true if base levels are inspected as well
    #[must_use]
    pub fn is_inherited(&self) -> bool {
        self.role == MemberRole::Ordinary
    }

    /// Returns true if a rendered member belongs to this partition
    ///
    /// ## Arguments
    /// * 'member' - The rendered member
    #[must_use]
    pub fn matches(&self, member: &MemberDescriptor) -> bool {
        if member.is_static() != self.is_static {
            return false;
        }
        let role = match member.as_method() {
            Some(method) if method.is_constructor => MemberRole::Constructor,
            Some(method) if method.is_operator => MemberRole::Operator,
            _ => MemberRole::Ordinary,
        };
        role == self.role
    }
}

/// Collect one partition of the members visible on `ty`
///
/// Members are returned in walk order: the requested type's members first, in provider order,
/// followed by the surviving members of each base level.
///
/// ## Arguments
/// * 'provider' - The metadata provider
/// * 'ty'       - The requested type
/// * 'query'    - The partition to collect
/// * 'config'   - The traversal configuration
pub fn collect_members(
    provider: &dyn MetadataProvider,
    ty: &TypeDefRc,
    query: MemberQuery,
    config: TraversalConfig,
) -> Vec<MemberDescriptor> {
    let mut collected = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for level in InheritanceWalk::new(provider, ty.clone(), config) {
        let survivors = collect_level(provider, &level, query, config, &seen);
        seen.extend(survivors.iter().map(|member| member.signature_key().to_string()));
        collected.extend(survivors);

        if !query.is_inherited() {
            break;
        }
    }

    collected
}

/// Render, filter and de-duplicate the members of one level
fn collect_level(
    provider: &dyn MetadataProvider,
    level: &Level,
    query: MemberQuery,
    config: TraversalConfig,
    seen: &HashSet<String>,
) -> Vec<MemberDescriptor> {
    let ctx = RenderContext::new(provider, config, &level.descriptor);
    let mut survivors = Vec::new();

    for raw in provider.members(&level.def, query.kind) {
        let mut member = match render_member(&raw, &ctx) {
            Ok(member) => member,
            Err(error) => {
                log::warn!(
                    "skipping {} {} of {}: {}",
                    query.kind,
                    raw.name(),
                    level.descriptor.full_display_name,
                    error
                );
                continue;
            }
        };

        if member.is_excluded() || !query.matches(&member) {
            continue;
        }
        if !level.is_derived() && member.accessor() == Accessor::Private {
            log::trace!(
                "dropping private {} inherited from {}",
                member.name(),
                level.descriptor.full_display_name
            );
            continue;
        }

        level.substitution.substitute(&mut member);
        if seen.contains(member.signature_key()) {
            log::trace!(
                "{} is redeclared below {}",
                member.signature_key(),
                level.descriptor.full_display_name
            );
            continue;
        }
        survivors.push(member);
    }

    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            AssemblyBuilder, GenericParamDefBuilder, MetadataStore, MethodDefBuilder,
            TypeDefBuilder, TypeSig,
        },
        test::factories::school_store,
    };

    fn names(members: &[MemberDescriptor]) -> Vec<&str> {
        members.iter().map(MemberDescriptor::name).collect()
    }

    #[test]
    fn overridden_members_appear_once() {
        let store = school_store();
        let student = store.find_type("SchoolSys.StudentMember").unwrap();
        let properties = collect_members(
            &store,
            &student,
            MemberQuery::ordinary(MemberKind::Property, false),
            TraversalConfig::default(),
        );

        assert_eq!(names(&properties), vec!["Id"]);
        assert_eq!(
            properties[0].info().declaring_type.display_name,
            "StudentMember"
        );
        assert_eq!(
            properties[0].declaration(),
            "public override string Id { get; }"
        );
    }

    #[test]
    fn inherited_methods_follow_own_ones() {
        let store = school_store();
        let student = store.find_type("SchoolSys.StudentMember").unwrap();
        let methods = collect_members(
            &store,
            &student,
            MemberQuery::ordinary(MemberKind::Method, false),
            TraversalConfig::default(),
        );
        assert_eq!(
            names(&methods),
            vec!["SignIn", "SignOut", "GetSchedule", "Talk", "SendMessage"]
        );
    }

    #[test]
    fn private_base_members_are_hidden() {
        let store = school_store();
        let student = store.find_type("SchoolSys.StudentMember").unwrap();
        let fields = collect_members(
            &store,
            &student,
            MemberQuery::ordinary(MemberKind::Field, false),
            TraversalConfig::default(),
        );
        // `id` is StudentMember's own private field; BaseMember's private fields are dropped
        assert_eq!(names(&fields), vec!["id"]);
    }

    #[test]
    fn constructors_are_not_inherited() {
        let store = school_store();
        let staff = store.find_type("SchoolSys.StaffMember").unwrap();
        let constructors = collect_members(
            &store,
            &staff,
            MemberQuery::constructors(),
            TraversalConfig::default(),
        );
        assert_eq!(constructors.len(), 1);
        assert_eq!(
            constructors[0].declaration(),
            "public StaffMember(StudentMember history, string id)"
        );
    }

    #[test]
    fn substituted_overrides_deduplicate() {
        let store = MetadataStore::new().with_assembly(
            AssemblyBuilder::new("Generic")
                .add_type(
                    TypeDefBuilder::class("Generic", "Base`1")
                        .public()
                        .generic_param(GenericParamDefBuilder::new("T"))
                        .method(
                            MethodDefBuilder::new("Foo")
                                .public()
                                .virtual_()
                                .returns(TypeSig::type_param("T", 0))
                                .param("value", TypeSig::type_param("T", 0)),
                        )
                        .method(
                            MethodDefBuilder::new("Bar")
                                .public()
                                .param("value", TypeSig::type_param("T", 0)),
                        ),
                )
                .add_type(
                    TypeDefBuilder::class("Generic", "Derived")
                        .public()
                        .extends(TypeSig::generic("Generic.Base`1", vec![TypeSig::int32()]))
                        .method(
                            MethodDefBuilder::new("Foo")
                                .public()
                                .override_()
                                .returns(TypeSig::int32())
                                .param("value", TypeSig::int32()),
                        ),
                )
                .build(),
        );

        let derived = store.find_type("Generic.Derived").unwrap();
        let methods = collect_members(
            &store,
            &derived,
            MemberQuery::ordinary(MemberKind::Method, false),
            TraversalConfig::default(),
        );

        assert_eq!(names(&methods), vec!["Foo", "Bar"]);
        assert_eq!(methods[0].declaration(), "public override int Foo(int value)");
        assert_eq!(methods[1].declaration(), "public void Bar(int value)");
        assert_eq!(
            methods[1].info().declaring_type.display_name,
            "Base<int>"
        );
    }

    #[test]
    fn static_partition() {
        let store = MetadataStore::new().with_assembly(
            AssemblyBuilder::new("Static")
                .add_type(
                    TypeDefBuilder::class("Static", "Tools")
                        .public()
                        .method(MethodDefBuilder::new("Create").public().static_())
                        .method(MethodDefBuilder::new("Run").public())
                        .method(
                            MethodDefBuilder::operator("op_Equality")
                                .returns(TypeSig::boolean())
                                .param("left", TypeSig::path("Static.Tools"))
                                .param("right", TypeSig::path("Static.Tools")),
                        ),
                )
                .build(),
        );
        let tools = store.find_type("Static.Tools").unwrap();
        let collect = |query| collect_members(&store, &tools, query, TraversalConfig::default());

        assert_eq!(
            names(&collect(MemberQuery::ordinary(MemberKind::Method, true))),
            vec!["Create"]
        );
        assert_eq!(
            names(&collect(MemberQuery::ordinary(MemberKind::Method, false))),
            vec!["Run"]
        );
        assert_eq!(names(&collect(MemberQuery::operators())), vec!["Equality"]);
    }

    #[test]
    fn malformed_members_are_skipped() {
        let store = MetadataStore::new().with_assembly(
            AssemblyBuilder::new("Broken")
                .add_type(
                    TypeDefBuilder::class("Broken", "Ops")
                        .public()
                        .method(MethodDefBuilder::operator("op_UnaryPlus"))
                        .method(
                            MethodDefBuilder::operator("op_UnaryNegation")
                                .returns(TypeSig::path("Broken.Ops"))
                                .param("value", TypeSig::path("Broken.Ops")),
                        ),
                )
                .build(),
        );
        let ops = store.find_type("Broken.Ops").unwrap();
        let operators = collect_members(
            &store,
            &ops,
            MemberQuery::operators(),
            TraversalConfig::default(),
        );
        assert_eq!(names(&operators), vec!["UnaryNegation"]);
    }
}
