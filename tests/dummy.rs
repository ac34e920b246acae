//! Inventories of the `Dummy.Library1` types: member shapes, modifiers, attributes and
//! parameter rendering as seen through the public API.

mod common;

use common::dummy_library;
use declscope::{prelude::*, Result};

fn declarations<'a, I>(items: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    items.into_iter().collect()
}

#[test]
fn dummy_class_declaration() -> Result<()> {
    let store = dummy_library();
    let inventory = build_inventory(&store, "Dummy.DummyClass`1", &TraversalConfig::default())?;

    assert_eq!(inventory.assembly_name, "Dummy.Library1");
    assert_eq!(inventory.object_kind, ObjectKind::Class);
    assert_eq!(inventory.type_descriptor.display_name, "DummyClass<T>");
    assert_eq!(inventory.type_descriptor.full_display_name, "Dummy.DummyClass<T>");
    assert_eq!(inventory.declaration, "public class DummyClass<T>");
    assert_eq!(inventory.full_declaration, "public class DummyClass<T> : DummyStruct");
    Ok(())
}

#[test]
fn fields_across_the_hierarchy() -> Result<()> {
    let store = dummy_library();
    let inventory = build_inventory(&store, "Dummy.DummyClass`1", &TraversalConfig::default())?;

    assert_eq!(
        declarations(inventory.fields.iter().map(|f| f.declaration.as_str())),
        vec![
            "public string Variable1",
            "public object[][] grid",
            "public List<string> strings",
            "public string variable1",
            "private object variable2",
            "protected int variable3",
            "internal byte variable4",
            "private sbyte[] variable5",
        ]
    );
    assert_eq!(
        declarations(inventory.static_fields.iter().map(|f| f.declaration.as_str())),
        vec![
            "public static readonly DummyClass<int> Unknown",
            "public const int ab = 10",
        ]
    );

    let grid = &inventory.fields[1];
    assert_eq!(grid.info.declaring_type.display_name, "DummyStruct");
    assert_eq!(grid.info.attributes[0].declaration, "[System.ObsoleteAttribute]");
    Ok(())
}

#[test]
fn hidden_and_overridden_methods() -> Result<()> {
    let store = dummy_library();
    let inventory = build_inventory(&store, "Dummy.DummyClass`1", &TraversalConfig::default())?;

    let names: Vec<&str> = inventory.methods.iter().map(|m| m.info.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Ayo", "Equals", "GetHashCode", "Temp2", "Temporary", "ToString", "Yoyo", "Yoyoyo"]
    );

    let find = |name: &str| {
        inventory
            .methods
            .iter()
            .find(|method| method.info.name == name)
            .unwrap()
    };

    let temporary = find("Temporary");
    assert_eq!(temporary.declaration, "protected sealed override void Temporary()");
    assert_eq!(temporary.info.declaring_type.display_name, "DummyClass<T>");

    let yoyo = find("Yoyo");
    assert_eq!(yoyo.declaration, "public void Yoyo()");
    assert_eq!(yoyo.info.declaring_type.display_name, "DummyClass<T>");

    assert_eq!(find("Equals").declaration, "public virtual bool Equals(DummyStruct other)");
    assert_eq!(find("ToString").declaration, "public override string ToString()");
    assert_eq!(
        find("Temp2").declaration,
        "public string Temp2(DummyClass<IDummy> a, DummyStruct b)"
    );
    Ok(())
}

#[test]
fn static_methods_and_parameter_modifiers() -> Result<()> {
    let store = dummy_library();
    let inventory = build_inventory(&store, "Dummy.DummyStruct", &TraversalConfig::default())?;

    assert_eq!(
        declarations(inventory.static_methods.iter().map(|m| m.declaration.as_str())),
        vec![
            "public static void Consume(List<List<Dictionary<IDummy, DummyStruct>>> lists, Dictionary<string, IDummy> dictionary)",
            "public static void Create(ref DummyClass<DummyStruct> s, out DummyStruct b)",
            "public static DummyStruct Create()",
            "public static void Display(int id = 1, params object[] objs)",
        ]
    );

    let create = &inventory.static_methods[1];
    assert_eq!(
        create.info.attributes[0].declaration,
        "[Dummy.DummyAttribute(\"Henlo\", \"Goobey\", val = \"Hello\", HasValue = true)]"
    );
    assert_eq!(create.parameters[0].modifier, ParameterModifier::ByRef);
    assert_eq!(create.parameters[1].modifier, ParameterModifier::Out);

    let display = &inventory.static_methods[3];
    let id = &display.parameters[0];
    assert!(id.is_optional);
    assert_eq!(id.default_value, "1");
    assert_eq!(id.attributes[0].declaration, "[Dummy.DummyAttribute(\"10\", \"20\")]");
    assert_eq!(display.parameters[1].modifier, ParameterModifier::Variadic);
    Ok(())
}

#[test]
fn overloads_are_distinct() -> Result<()> {
    let store = dummy_library();
    let inventory = build_inventory(&store, "Dummy.DummyStruct", &TraversalConfig::default())?;

    let creates: Vec<&MethodDescriptor> = inventory
        .static_methods
        .iter()
        .filter(|method| method.info.name == "Create")
        .collect();
    assert_eq!(creates.len(), 2);
    assert_ne!(creates[0].signature_key, creates[1].signature_key);
    Ok(())
}

#[test]
fn abstract_class_with_interfaces() -> Result<()> {
    let store = dummy_library();
    let inventory = build_inventory(&store, "Dummy.DummyStruct", &TraversalConfig::public_only())?;

    assert_eq!(inventory.modifier, "abstract");
    assert!(inventory.base_type.is_empty());
    assert_eq!(
        inventory.full_declaration,
        "public abstract class DummyStruct : IDummy, IDummer<List<DummyStruct>>, IEquatable<DummyStruct>"
    );
    assert!(inventory.constructors.is_empty());
    assert!(!inventory.fields.iter().any(|f| f.info.name.starts_with('<')));
    Ok(())
}

#[test]
fn properties_with_partial_accessors() -> Result<()> {
    let store = dummy_library();
    let inventory = build_inventory(&store, "Dummy.DummyClass`1", &TraversalConfig::default())?;

    assert_eq!(
        declarations(inventory.properties.iter().map(|p| p.declaration.as_str())),
        vec![
            "public string Variable2 { get; }",
            "public string Variable3 { get; set; }",
            "public string Variable4 { set; }",
        ]
    );
    assert_eq!(
        inventory.properties[0].info.declaring_type.display_name,
        "DummyClass<T>"
    );
    assert!(!inventory.properties[2].has_getter);
    Ok(())
}

#[test]
fn constructor_uses_the_plain_type_name() -> Result<()> {
    let store = dummy_library();
    let inventory = build_inventory(&store, "Dummy.DummyClass-1", &TraversalConfig::default())?;

    assert_eq!(inventory.constructors.len(), 1);
    assert_eq!(
        inventory.constructors[0].declaration,
        "public DummyClass(double parameter1, T parameter2)"
    );
    Ok(())
}

#[test]
fn visibility_threshold_filters_every_partition() -> Result<()> {
    let store = dummy_library();

    let protected = build_inventory(
        &store,
        "Dummy.DummyClass`1",
        &TraversalConfig::protected_and_public(),
    )?;
    let names: Vec<&str> = protected.fields.iter().map(|f| f.info.name.as_str()).collect();
    assert_eq!(names, vec!["Variable1", "grid", "strings", "variable1", "variable3"]);
    assert!(protected.methods.iter().any(|m| m.info.name == "Temporary"));

    let public = build_inventory(&store, "Dummy.DummyClass`1", &TraversalConfig::public_only())?;
    assert!(public.fields.iter().all(|f| f.info.accessor == Accessor::Public));
    assert!(public.methods.iter().all(|m| m.info.accessor == Accessor::Public));
    assert!(!public.methods.iter().any(|m| m.info.name == "Temporary"));
    Ok(())
}

#[test]
fn attribute_class() -> Result<()> {
    let store = dummy_library();
    let inventory = build_inventory(&store, "Dummy.DummyAttribute", &TraversalConfig::default())?;

    assert_eq!(inventory.base_type.display_name, "Attribute");
    assert_eq!(inventory.full_declaration, "public class DummyAttribute : Attribute");
    assert_eq!(
        inventory.attributes[0].declaration,
        "[System.AttributeUsageAttribute((AttributeTargets)32767)]"
    );
    assert_eq!(
        declarations(inventory.properties.iter().map(|p| p.declaration.as_str())),
        vec![
            "public string DummyVal { get; }",
            "public string Guuid { get; set; }",
            "public bool HasValue { get; set; }",
        ]
    );
    assert_eq!(
        inventory.constructors[0].declaration,
        "public DummyAttribute(string hash1, string hash2)"
    );
    Ok(())
}

#[test]
fn unknown_type_is_not_found() {
    let store = dummy_library();
    let result = build_inventory(&store, "Dummy.Dummy4", &TraversalConfig::default());
    assert!(matches!(result, Err(Error::NotFound(_))));
}
