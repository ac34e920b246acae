use crate::metadata::{
    AssemblyBuilder, CustomAttributeBuilder, EventDefBuilder, FieldDefBuilder,
    GenericParamDefBuilder, MetadataStore, MethodAccessFlags, MethodDefBuilder,
    PropertyDefBuilder, TypeDefBuilder, TypeSig,
};

fn member() -> TypeSig {
    TypeSig::path("SchoolSys.IMember")
}

fn schedule() -> TypeSig {
    TypeSig::generic("System.Collections.Generic.List`1", vec![TypeSig::string()])
}

fn handler() -> TypeSig {
    TypeSig::path("System.EventHandler")
}

fn interface() -> TypeDefBuilder {
    TypeDefBuilder::interface("SchoolSys", "IMember")
        .public()
        .property(
            PropertyDefBuilder::new("Id", TypeSig::string())
                .getter(MethodAccessFlags::PUBLIC)
                .abstract_(),
        )
        .method(
            MethodDefBuilder::new("SignIn")
                .public()
                .abstract_()
                .returns(TypeSig::boolean()),
        )
        .method(MethodDefBuilder::new("SignOut").public().abstract_())
        .method(
            MethodDefBuilder::new("GetSchedule")
                .public()
                .abstract_()
                .returns(schedule()),
        )
}

fn base_member() -> TypeDefBuilder {
    TypeDefBuilder::class("SchoolSys", "BaseMember")
        .public()
        .abstract_()
        .implements(member())
        .attribute(CustomAttributeBuilder::new("System.SerializableAttribute"))
        .field(FieldDefBuilder::new("OnMesseged", handler()))
        .field(FieldDefBuilder::new("OnMessege", handler()))
        .property(
            PropertyDefBuilder::new("Id", TypeSig::string())
                .getter(MethodAccessFlags::PUBLIC)
                .abstract_(),
        )
        .event(EventDefBuilder::new("OnMesseged", handler()).public())
        .event(EventDefBuilder::new("OnMessege", handler()).public())
        .method(MethodDefBuilder::constructor().protected())
        .method(
            MethodDefBuilder::new("SignIn")
                .public()
                .virtual_()
                .returns(TypeSig::boolean()),
        )
        .method(MethodDefBuilder::new("SignOut").public().virtual_())
        .method(
            MethodDefBuilder::new("GetSchedule")
                .public()
                .virtual_()
                .returns(schedule()),
        )
        .method(
            MethodDefBuilder::new("Talk")
                .public()
                .param("message", TypeSig::string()),
        )
        .method(
            MethodDefBuilder::new("SendMessage")
                .public()
                .generic_param(GenericParamDefBuilder::new("T"))
                .generic_param(GenericParamDefBuilder::new("K").struct_constraint())
                .param("message", TypeSig::method_param("T", 0))
                .param("data", TypeSig::method_param("K", 1)),
        )
}

fn student_member() -> TypeDefBuilder {
    TypeDefBuilder::class("SchoolSys", "StudentMember")
        .public()
        .sealed()
        .extends(TypeSig::path("SchoolSys.BaseMember"))
        .field(FieldDefBuilder::new("id", TypeSig::string()))
        .property(
            PropertyDefBuilder::new("Id", TypeSig::string())
                .getter(MethodAccessFlags::PUBLIC)
                .override_(),
        )
        .method(
            MethodDefBuilder::constructor()
                .public()
                .param("id", TypeSig::string()),
        )
}

fn staff_member() -> TypeDefBuilder {
    TypeDefBuilder::class("SchoolSys", "StaffMember")
        .public()
        .extends(TypeSig::path("SchoolSys.BaseMember"))
        .implements(member())
        .implements(TypeSig::path("SchoolSys.IAuditable"))
        .field(FieldDefBuilder::new("id", TypeSig::string()).protected())
        .field(
            FieldDefBuilder::new("studentHistory", TypeSig::path("SchoolSys.StudentMember"))
                .protected(),
        )
        .property(
            PropertyDefBuilder::new("Id", TypeSig::string())
                .getter(MethodAccessFlags::PUBLIC)
                .override_(),
        )
        .method(
            MethodDefBuilder::constructor()
                .public()
                .param("history", TypeSig::path("SchoolSys.StudentMember"))
                .param("id", TypeSig::string()),
        )
}

fn guest_member() -> TypeDefBuilder {
    TypeDefBuilder::class("SchoolSys.Guests", "GuestMember`1")
        .public()
        .sealed()
        .implements(member())
        .generic_param(GenericParamDefBuilder::new("T").constraint(member()))
        .field(FieldDefBuilder::new("member", TypeSig::type_param("T", 0)))
        .property(PropertyDefBuilder::new("Id", TypeSig::string()).getter(MethodAccessFlags::PUBLIC))
        .method(
            MethodDefBuilder::constructor()
                .public()
                .param("member", TypeSig::type_param("T", 0)),
        )
        .method(
            MethodDefBuilder::new("SignIn")
                .public()
                .returns(TypeSig::boolean()),
        )
        .method(MethodDefBuilder::new("SignOut").public())
        .method(
            MethodDefBuilder::new("GetSchedule")
                .public()
                .returns(schedule()),
        )
}

/// The `SchoolSys` assembly: an interface, an abstract base with two derived classes, a
/// generic guest type, internal and nested types and a compiler-generated helper.
pub fn school_store() -> MetadataStore {
    MetadataStore::new().with_assembly(
        AssemblyBuilder::new("SchoolSys")
            .add_type(interface())
            .add_type(TypeDefBuilder::interface("SchoolSys", "IAuditable").internal())
            .add_type(base_member())
            .add_type(
                TypeDefBuilder::class("SchoolSys", "HiddenBaseMember")
                    .nested_in(&["BaseMember"])
                    .private(),
            )
            .add_type(student_member())
            .add_type(staff_member())
            .add_type(guest_member())
            .add_type(TypeDefBuilder::class("SchoolSys", "HiddenMember").internal())
            .add_type(
                TypeDefBuilder::class("SchoolSys", "HiddenPublicMember")
                    .nested_in(&["HiddenMember"])
                    .public(),
            )
            .add_type(
                TypeDefBuilder::class("SchoolSys", "SuperHiddenMember")
                    .nested_in(&["HiddenMember"])
                    .private(),
            )
            .add_type(
                TypeDefBuilder::class("", "<PrivateImplementationDetails>")
                    .internal()
                    .sealed(),
            )
            .add_type(
                TypeDefBuilder::value_type("", "__StaticArrayInitTypeSize=12")
                    .nested_in(&["<PrivateImplementationDetails>"])
                    .private(),
            )
            .build(),
    )
}
