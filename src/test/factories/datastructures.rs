use crate::metadata::{
    AssemblyBuilder, ConstantValue, FieldDefBuilder, GenericParamDefBuilder, MetadataStore,
    MethodAccessFlags, MethodDefBuilder, PropertyDefBuilder, TypeDefBuilder, TypeSig,
};

fn tree_of(element: TypeSig) -> TypeSig {
    TypeSig::generic("DataStructures.DataTree`1", vec![element])
}

fn data_tree() -> TypeDefBuilder {
    let t = TypeSig::type_param("T", 0);
    TypeDefBuilder::class("DataStructures", "DataTree`1")
        .public()
        .generic_param(GenericParamDefBuilder::new("T").struct_constraint())
        .field(FieldDefBuilder::new("value", t.clone()))
        .property(
            PropertyDefBuilder::new("Value", t.clone())
                .getter(MethodAccessFlags::PUBLIC)
                .setter(MethodAccessFlags::PUBLIC),
        )
        .property(
            PropertyDefBuilder::indexer(tree_of(t.clone()))
                .getter(MethodAccessFlags::PUBLIC)
                .index("index", TypeSig::int32()),
        )
        .method(MethodDefBuilder::constructor().public().param("value", t.clone()))
        .method(MethodDefBuilder::new("Add").public().param("child", tree_of(t)))
}

fn gather_hash() -> TypeDefBuilder {
    let t = TypeSig::type_param("T", 0);
    TypeDefBuilder::delegate("DataStructures", "GatherHash`1")
        .nested_in(&["DataTree`1"])
        .public()
        .generic_param(GenericParamDefBuilder::new("T").struct_constraint())
        .method(
            MethodDefBuilder::constructor()
                .public()
                .param("object", TypeSig::object())
                .param("method", TypeSig::system("IntPtr")),
        )
        .method(
            MethodDefBuilder::new("Invoke")
                .public()
                .virtual_()
                .returns(tree_of(t.clone()))
                .param("original", t.clone())
                .param("control", t.clone())
                .param("reference", tree_of(t)),
        )
}

fn tree_extensions() -> TypeDefBuilder {
    TypeDefBuilder::class("DataStructures", "TreeExtensions")
        .public()
        .static_()
        .method(
            MethodDefBuilder::new("Depth")
                .public()
                .extension()
                .generic_param(GenericParamDefBuilder::new("T").struct_constraint())
                .returns(TypeSig::int32())
                .param("tree", tree_of(TypeSig::method_param("T", 0))),
        )
}

fn point() -> TypeDefBuilder {
    let point = TypeSig::path("DataStructures.Point");
    TypeDefBuilder::value_type("DataStructures", "Point")
        .public()
        .field(FieldDefBuilder::new("X", TypeSig::int32()).public())
        .field(FieldDefBuilder::new("Y", TypeSig::int32()).public())
        .field(
            FieldDefBuilder::new("Origin", point.clone())
                .public()
                .static_()
                .readonly(),
        )
        .method(
            MethodDefBuilder::operator("op_Addition")
                .returns(point.clone())
                .param("left", point.clone())
                .param("right", point.clone()),
        )
        .method(
            MethodDefBuilder::operator("op_Implicit")
                .returns(TypeSig::string())
                .param("value", point),
        )
}

/// The `DataStructures` assembly: a generic tree with a nested delegate, an enum, a static
/// extension class and a struct with operators.
pub fn data_store() -> MetadataStore {
    MetadataStore::new().with_assembly(
        AssemblyBuilder::new("DataStructures")
            .add_type(data_tree())
            .add_type(gather_hash())
            .add_type(
                TypeDefBuilder::enumeration("DataStructures", "Color", TypeSig::int32())
                    .public()
                    .enum_value("Red", ConstantValue::I4(0))
                    .enum_value("Blue", ConstantValue::I4(2)),
            )
            .add_type(tree_extensions())
            .add_type(point())
            .build(),
    )
}
