//! Assemblies shared by the integration tests.
//!
//! `Dummy.Library1` is a grab bag of member shapes (constants, attributes, parameter modifiers,
//! hidden and overridden members). `SchoolSys` is a small class hierarchy with generic bases.

#![allow(dead_code)]

use declscope::metadata::AttributeValue;
use declscope::prelude::*;

pub fn list_of(element: TypeSig) -> TypeSig {
    TypeSig::generic("System.Collections.Generic.List`1", vec![element])
}

pub fn dictionary_of(key: TypeSig, value: TypeSig) -> TypeSig {
    TypeSig::generic("System.Collections.Generic.Dictionary`2", vec![key, value])
}

fn dummy_attribute(first: &str, second: &str) -> CustomAttributeBuilder {
    CustomAttributeBuilder::new("Dummy.DummyAttribute")
        .arg("hash1", ConstantValue::String(first.to_string()))
        .arg("hash2", ConstantValue::String(second.to_string()))
}

fn obsolete() -> CustomAttributeBuilder {
    CustomAttributeBuilder::new("System.ObsoleteAttribute")
}

fn dummy_struct() -> TypeDefBuilder {
    let this = TypeSig::path("Dummy.DummyStruct");
    let idummy = TypeSig::path("Dummy.IDummy");

    TypeDefBuilder::class("Dummy", "DummyStruct")
        .public()
        .abstract_()
        .implements(idummy.clone())
        .implements(TypeSig::generic("Dummy.IDummer`1", vec![list_of(this.clone())]))
        .implements(TypeSig::generic("System.IEquatable`1", vec![this.clone()]))
        .field(FieldDefBuilder::new("Variable1", TypeSig::string()).public())
        .field(
            FieldDefBuilder::new("ab", TypeSig::int32())
                .public()
                .constant(ConstantValue::I4(10)),
        )
        .field(FieldDefBuilder::new("strings", list_of(TypeSig::string())).public())
        .field(
            FieldDefBuilder::new("grid", TypeSig::array(TypeSig::array(TypeSig::object())))
                .public()
                .attribute(obsolete()),
        )
        .field(FieldDefBuilder::new("<Variable3>k__BackingField", TypeSig::string()))
        .property(PropertyDefBuilder::new("Variable2", TypeSig::string()).getter(MethodAccessFlags::PUBLIC))
        .property(
            PropertyDefBuilder::new("Variable3", TypeSig::string())
                .getter(MethodAccessFlags::PUBLIC)
                .setter(MethodAccessFlags::PUBLIC),
        )
        .property(PropertyDefBuilder::new("Variable4", TypeSig::string()).setter(MethodAccessFlags::PUBLIC))
        .method(MethodDefBuilder::constructor().protected())
        .method(
            MethodDefBuilder::new("ToString")
                .public()
                .override_()
                .returns(TypeSig::string()),
        )
        .method(
            MethodDefBuilder::new("GetHashCode")
                .public()
                .returns(TypeSig::int32()),
        )
        .method(MethodDefBuilder::new("Yoyo").public().virtual_())
        .method(MethodDefBuilder::new("Ayo").public())
        .method(MethodDefBuilder::new("Temporary").protected().abstract_())
        .method(
            MethodDefBuilder::new("Equals")
                .public()
                .virtual_()
                .returns(TypeSig::boolean())
                .param("other", this.clone()),
        )
        .method(
            MethodDefBuilder::new("Create")
                .public()
                .static_()
                .attribute(
                    dummy_attribute("Henlo", "Goobey")
                        .field("val", ConstantValue::String("Hello".to_string()))
                        .property("HasValue", ConstantValue::Boolean(true)),
                )
                .param_with(
                    ParamDefBuilder::new(
                        "s",
                        TypeSig::generic("Dummy.DummyClass`1", vec![this.clone()]),
                    )
                    .by_ref(),
                )
                .param_with(ParamDefBuilder::new("b", this.clone()).out()),
        )
        .method(
            MethodDefBuilder::new("Display")
                .public()
                .static_()
                .attribute(obsolete())
                .param_with(
                    ParamDefBuilder::new("id", TypeSig::int32())
                        .optional(ConstantValue::I4(1))
                        .attribute(dummy_attribute("10", "20")),
                )
                .param_with(ParamDefBuilder::new("objs", TypeSig::array(TypeSig::object())).params()),
        )
        .method(
            MethodDefBuilder::new("Consume")
                .public()
                .static_()
                .param(
                    "lists",
                    list_of(list_of(dictionary_of(idummy.clone(), this.clone()))),
                )
                .param("dictionary", dictionary_of(TypeSig::string(), idummy)),
        )
        .method(
            MethodDefBuilder::new("Create")
                .public()
                .static_()
                .returns(this),
        )
}

fn dummy_class() -> TypeDefBuilder {
    let t = TypeSig::type_param("T", 0);

    TypeDefBuilder::class("Dummy", "DummyClass`1")
        .public()
        .extends(TypeSig::path("Dummy.DummyStruct"))
        .generic_param(GenericParamDefBuilder::new("T"))
        .field(FieldDefBuilder::new("variable1", TypeSig::string()).public())
        .field(FieldDefBuilder::new("variable2", TypeSig::object()))
        .field(FieldDefBuilder::new("variable3", TypeSig::int32()).protected())
        .field(FieldDefBuilder::new("variable4", TypeSig::system("Byte")).internal())
        .field(FieldDefBuilder::new("variable5", TypeSig::array(TypeSig::system("SByte"))))
        .field(
            FieldDefBuilder::new(
                "Unknown",
                TypeSig::generic("Dummy.DummyClass`1", vec![TypeSig::int32()]),
            )
            .public()
            .static_()
            .readonly(),
        )
        .property(PropertyDefBuilder::new("Variable2", TypeSig::string()).getter(MethodAccessFlags::PUBLIC))
        .method(
            MethodDefBuilder::constructor()
                .public()
                .param("parameter1", TypeSig::system("Double"))
                .param("parameter2", t),
        )
        .method(
            MethodDefBuilder::new("Temp2")
                .public()
                .returns(TypeSig::string())
                .param(
                    "a",
                    TypeSig::generic("Dummy.DummyClass`1", vec![TypeSig::path("Dummy.IDummy")]),
                )
                .param("b", TypeSig::path("Dummy.DummyStruct")),
        )
        .method(
            MethodDefBuilder::new("Temporary")
                .protected()
                .override_()
                .sealed(),
        )
        .method(MethodDefBuilder::new("Yoyoyo").public())
        .method(MethodDefBuilder::new("Yoyo").public())
}

fn dummy_attribute_class() -> TypeDefBuilder {
    TypeDefBuilder::class("Dummy", "DummyAttribute")
        .public()
        .extends(TypeSig::system("Attribute"))
        .attribute(
            CustomAttributeBuilder::new("System.AttributeUsageAttribute").arg_with(
                "validOn",
                TypeSig::system("AttributeTargets"),
                AttributeValue::Enum {
                    enum_type: TypeSig::system("AttributeTargets"),
                    value: ConstantValue::I4(32767),
                },
            ),
        )
        .field(FieldDefBuilder::new("val", TypeSig::string()).public())
        .field(FieldDefBuilder::new("guuid", TypeSig::string()).public())
        .field(FieldDefBuilder::new("val2", TypeSig::string()).public())
        .property(
            PropertyDefBuilder::new("HasValue", TypeSig::boolean())
                .getter(MethodAccessFlags::PUBLIC)
                .setter(MethodAccessFlags::PUBLIC),
        )
        .property(PropertyDefBuilder::new("DummyVal", TypeSig::string()).getter(MethodAccessFlags::PUBLIC))
        .property(
            PropertyDefBuilder::new("Guuid", TypeSig::string())
                .getter(MethodAccessFlags::PUBLIC)
                .setter(MethodAccessFlags::PUBLIC),
        )
        .method(
            MethodDefBuilder::constructor()
                .public()
                .param("hash1", TypeSig::string())
                .param("hash2", TypeSig::string()),
        )
        .method(MethodDefBuilder::new("TempMethod").public())
}

/// `Dummy.Library1`
pub fn dummy_library() -> MetadataStore {
    MetadataStore::new().with_assembly(
        AssemblyBuilder::new("Dummy.Library1")
            .add_type(TypeDefBuilder::interface("Dummy", "IDummy").public())
            .add_type(
                TypeDefBuilder::interface("Dummy", "IDummer`1")
                    .public()
                    .generic_param(GenericParamDefBuilder::new("T")),
            )
            .add_type(dummy_struct())
            .add_type(dummy_class())
            .add_type(dummy_attribute_class())
            .build(),
    )
}

fn school_base() -> TypeDefBuilder {
    let t = TypeSig::type_param("T", 0);

    TypeDefBuilder::class("SchoolSys", "Roster`1")
        .public()
        .abstract_()
        .generic_param(GenericParamDefBuilder::new("T"))
        .field(FieldDefBuilder::new("members", list_of(t.clone())))
        .field(FieldDefBuilder::new("Capacity", TypeSig::int32()).protected())
        .property(
            PropertyDefBuilder::new("Head", t.clone())
                .getter(MethodAccessFlags::PUBLIC)
                .setter(MethodAccessFlags::FAMILY),
        )
        .property(
            PropertyDefBuilder::indexer(t.clone())
                .getter(MethodAccessFlags::PUBLIC)
                .index("index", TypeSig::int32()),
        )
        .event(
            EventDefBuilder::new("Changed", TypeSig::generic("System.Action`1", vec![t.clone()]))
                .public(),
        )
        .method(
            MethodDefBuilder::new("Enroll")
                .public()
                .virtual_()
                .returns(t.clone())
                .param("member", t.clone()),
        )
        .method(
            MethodDefBuilder::new("Find")
                .public()
                .returns(list_of(t.clone()))
                .param_with(
                    ParamDefBuilder::new("name", TypeSig::string())
                        .optional(ConstantValue::String("any".to_string())),
                ),
        )
        .method(
            MethodDefBuilder::new("Send")
                .public()
                .generic_param(GenericParamDefBuilder::new("J"))
                .generic_param(GenericParamDefBuilder::new("K").struct_constraint())
                .param("message", TypeSig::method_param("J", 0))
                .param("data", TypeSig::method_param("K", 1)),
        )
        .method(MethodDefBuilder::new("Reset").internal())
        .method(MethodDefBuilder::new("Audit").private())
}

/// `SchoolSys`
pub fn school_library() -> MetadataStore {
    let student = TypeSig::path("SchoolSys.Student");

    MetadataStore::new().with_assembly(
        AssemblyBuilder::new("SchoolSys")
            .add_type(
                TypeDefBuilder::interface("SchoolSys", "IMember")
                    .public()
                    .property(
                        PropertyDefBuilder::new("Id", TypeSig::string())
                            .getter(MethodAccessFlags::PUBLIC)
                            .abstract_(),
                    ),
            )
            .add_type(
                TypeDefBuilder::class("SchoolSys", "Student")
                    .public()
                    .implements(TypeSig::path("SchoolSys.IMember"))
                    .property(
                        PropertyDefBuilder::new("Id", TypeSig::string())
                            .getter(MethodAccessFlags::PUBLIC),
                    ),
            )
            .add_type(school_base())
            .add_type(
                TypeDefBuilder::class("SchoolSys", "Middle`1")
                    .public()
                    .abstract_()
                    .generic_param(GenericParamDefBuilder::new("T"))
                    .extends(TypeSig::generic(
                        "SchoolSys.Roster`1",
                        vec![TypeSig::type_param("T", 0)],
                    ))
                    .method(
                        MethodDefBuilder::new("Send")
                            .public()
                            .generic_param(GenericParamDefBuilder::new("J"))
                            .generic_param(GenericParamDefBuilder::new("K").struct_constraint())
                            .param("message", TypeSig::method_param("J", 0))
                            .param("data", TypeSig::method_param("K", 1)),
                    ),
            )
            .add_type(
                TypeDefBuilder::class("SchoolSys", "ClassRoster")
                    .public()
                    .sealed()
                    .extends(TypeSig::generic("SchoolSys.Middle`1", vec![student.clone()]))
                    .method(MethodDefBuilder::constructor().public())
                    .method(
                        MethodDefBuilder::new("Enroll")
                            .public()
                            .override_()
                            .returns(student.clone())
                            .param("member", student),
                    ),
            )
            .add_type(
                TypeDefBuilder::class("SchoolSys.Guests", "Guest`1")
                    .public()
                    .implements(TypeSig::path("SchoolSys.IMember"))
                    .generic_param(
                        GenericParamDefBuilder::new("T").constraint(TypeSig::path("SchoolSys.IMember")),
                    )
                    .property(
                        PropertyDefBuilder::new("Id", TypeSig::string())
                            .getter(MethodAccessFlags::PUBLIC),
                    ),
            )
            .add_type(TypeDefBuilder::class("SchoolSys", "Registrar").internal())
            .add_type(
                TypeDefBuilder::class("SchoolSys", "Entry")
                    .nested_in(&["Registrar"])
                    .public(),
            )
            .add_type(TypeDefBuilder::class("SchoolSys", "<>c__DisplayClass1_0").private())
            .add_type(
                TypeDefBuilder::class("SchoolSys", "Closure")
                    .nested_in(&["<>c__DisplayClass1_0"])
                    .public(),
            )
            .build(),
    )
}
