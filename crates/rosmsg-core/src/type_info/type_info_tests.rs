#![allow(non_snake_case)]

use super::*;
use std::collections::HashSet;

fn built_in(name: &str) -> TypeReference {
    TypeReference::built_in(name)
}

fn leaf(package: &str, name: &str, fields: &[(&str, &str)]) -> Arc<MessageTypeInfo> {
    let definition = fields
        .iter()
        .map(|(t, n)| format!("{} {}", t, n))
        .collect::<Vec<_>>()
        .join("\n");
    let mut descriptor = MessageDescriptor::new(definition);
    for (t, n) in fields {
        descriptor.add_field(built_in(t), *n);
    }
    Arc::new(MessageTypeInfo::new(
        TypeReference::message(package, name),
        descriptor,
        Vec::new(),
    ))
}

fn header() -> Arc<MessageTypeInfo> {
    leaf(
        "std_msgs",
        "Header",
        &[("uint32", "seq"), ("time", "stamp"), ("string", "frame_id")],
    )
}

fn point() -> Arc<MessageTypeInfo> {
    leaf(
        "geometry_msgs",
        "Point",
        &[("float64", "x"), ("float64", "y"), ("float64", "z")],
    )
}

fn quaternion() -> Arc<MessageTypeInfo> {
    leaf(
        "geometry_msgs",
        "Quaternion",
        &[
            ("float64", "x"),
            ("float64", "y"),
            ("float64", "z"),
            ("float64", "w"),
        ],
    )
}

fn pose() -> Arc<MessageTypeInfo> {
    let descriptor = MessageDescriptor::new("Point position\nQuaternion orientation")
        .with_field(TypeReference::message("geometry_msgs", "Point"), "position")
        .with_field(
            TypeReference::message("geometry_msgs", "Quaternion"),
            "orientation",
        );
    Arc::new(MessageTypeInfo::new(
        TypeReference::message("geometry_msgs", "Pose"),
        descriptor,
        vec![point(), quaternion()],
    ))
}

fn pose_stamped() -> MessageTypeInfo {
    let descriptor = MessageDescriptor::new("Header header\nPose pose")
        .with_field(TypeReference::message("std_msgs", "Header"), "header")
        .with_field(TypeReference::message("geometry_msgs", "Pose"), "pose");
    MessageTypeInfo::new(
        TypeReference::message("geometry_msgs", "PoseStamped"),
        descriptor,
        vec![header(), pose()],
    )
}

#[test]
fn MessageTypeInfo___single_built_in_field___matches_known_sum() {
    let string = leaf("std_msgs", "String", &[("string", "data")]);

    assert_eq!(string.md5_sum().unwrap(), "992ce8a1687cec8c8bd883ec73ca41d1");
}

#[test]
fn MessageTypeInfo___header___matches_known_sum() {
    assert_eq!(header().md5_sum().unwrap(), "2176decaecbce78abc3b96ef049fabed");
}

#[test]
fn MessageTypeInfo___nested_types___use_dependency_sums() {
    assert_eq!(point().md5_sum().unwrap(), "4a842b65f413084dc2b10fb484ea7f17");
    assert_eq!(
        quaternion().md5_sum().unwrap(),
        "a779879fadf0160734f906b8c19c7004"
    );
    assert_eq!(pose().md5_sum().unwrap(), "e45d45a5a1ce597b249e23fb30fc871f");
    assert_eq!(
        pose_stamped().md5_sum().unwrap(),
        "d3812c3cbc69362b77dc0b19b345f8f5"
    );
}

#[test]
fn MessageTypeInfo___empty_message___hashes_empty_text() {
    let empty = leaf("std_msgs", "Empty", &[]);

    assert_eq!(empty.md5_sum().unwrap(), "d41d8cd98f00b204e9800998ecf8427e");
}

#[test]
fn MessageTypeInfo___constants___precede_fields_in_hash_text() {
    let mut descriptor = MessageDescriptor::new("byte DEBUG=1\nbyte INFO=2\nHeader header\nbyte level");
    descriptor.add_field(TypeReference::message("std_msgs", "Header"), "header");
    descriptor
        .add_constant(built_in("byte"), "DEBUG", "1")
        .unwrap();
    descriptor.add_field(built_in("byte"), "level");
    descriptor.add_constant(built_in("byte"), "INFO", "2").unwrap();
    let log = MessageTypeInfo::new(
        TypeReference::message("rosgraph_msgs", "Log"),
        descriptor,
        vec![header()],
    );

    assert_eq!(log.md5_sum().unwrap(), "9db0becd70ff553af5048bd7fbfe3a73");
}

#[test]
fn MessageTypeInfo___array_field___includes_suffix_in_hash_text() {
    let plain = leaf("test_msgs", "Plain", &[("uint8", "data")]);
    let array = Arc::new(MessageTypeInfo::new(
        TypeReference::message("test_msgs", "Array"),
        MessageDescriptor::new("uint8[] data").with_field(built_in("uint8").into_array(None), "data"),
        Vec::new(),
    ));
    let fixed = Arc::new(MessageTypeInfo::new(
        TypeReference::message("test_msgs", "Fixed"),
        MessageDescriptor::new("uint8[4] data")
            .with_field(built_in("uint8").into_array(Some(4)), "data"),
        Vec::new(),
    ));

    let sums: HashSet<&str> = [
        plain.md5_sum().unwrap(),
        array.md5_sum().unwrap(),
        fixed.md5_sum().unwrap(),
    ]
    .into_iter()
    .collect();

    assert_eq!(sums.len(), 3);
}

#[test]
fn MessageTypeInfo___message_array_field___hashes_like_scalar_field() {
    let scalar = MessageTypeInfo::new(
        TypeReference::message("test_msgs", "One"),
        MessageDescriptor::new("geometry_msgs/Point p")
            .with_field(TypeReference::message("geometry_msgs", "Point"), "p"),
        vec![point()],
    );
    let array = MessageTypeInfo::new(
        TypeReference::message("test_msgs", "Many"),
        MessageDescriptor::new("geometry_msgs/Point[] p").with_field(
            TypeReference::message("geometry_msgs", "Point").into_array(None),
            "p",
        ),
        vec![point()],
    );

    assert_eq!(scalar.md5_sum().unwrap(), array.md5_sum().unwrap());
}

#[test]
fn MessageTypeInfo___missing_dependency___is_unresolved() {
    let broken = MessageTypeInfo::new(
        TypeReference::message("nav_msgs", "Path"),
        MessageDescriptor::new("geometry_msgs/PoseStamped[] poses").with_field(
            TypeReference::message("geometry_msgs", "PoseStamped").into_array(None),
            "poses",
        ),
        Vec::new(),
    );

    let err = broken.md5_sum().unwrap_err();

    assert_eq!(
        err,
        TypeError::UnresolvedDependency {
            type_name: "nav_msgs/Path".into(),
            field: "poses".into(),
            dependency: "geometry_msgs/PoseStamped".into(),
        }
    );
}

#[test]
fn MessageTypeInfo___non_ascii_constant_value___is_rejected() {
    let mut descriptor = MessageDescriptor::new("string GREETING=grüß");
    descriptor
        .add_constant(built_in("string"), "GREETING", "grüß")
        .unwrap();
    let info = MessageTypeInfo::new(
        TypeReference::message("test_msgs", "Greeting"),
        descriptor,
        Vec::new(),
    );

    assert!(matches!(
        info.md5_sum(),
        Err(TypeError::NonAsciiInput { .. })
    ));
}

#[test]
fn MessageTypeInfo___md5_sum___is_memoized() {
    let info = pose_stamped();

    let first = info.md5_sum().unwrap();
    let second = info.md5_sum().unwrap();

    assert!(std::ptr::eq(first, second));
}

#[test]
fn MessageTypeInfo___leaf_definition___is_own_text() {
    let string = leaf("std_msgs", "String", &[("string", "data")]);

    assert_eq!(string.message_definition(), "string data");
}

#[test]
fn MessageTypeInfo___definition___appends_dependencies_in_pre_order() {
    let info = pose_stamped();

    let expected = format!(
        "Header header\nPose pose\n{sep}\nMSG: std_msgs/Header\nuint32 seq\ntime stamp\nstring frame_id\n\
         {sep}\nMSG: geometry_msgs/Pose\nPoint position\nQuaternion orientation\n\
         {sep}\nMSG: geometry_msgs/Point\nfloat64 x\nfloat64 y\nfloat64 z\n\
         {sep}\nMSG: geometry_msgs/Quaternion\nfloat64 x\nfloat64 y\nfloat64 z\nfloat64 w",
        sep = DEFINITION_SEPARATOR
    );

    assert_eq!(info.message_definition(), expected);
}

#[test]
fn MessageTypeInfo___diamond_dependency___is_emitted_once() {
    let a = Arc::new(MessageTypeInfo::new(
        TypeReference::message("d", "A"),
        MessageDescriptor::new("Point p")
            .with_field(TypeReference::message("geometry_msgs", "Point"), "p"),
        vec![point()],
    ));
    let b = Arc::new(MessageTypeInfo::new(
        TypeReference::message("d", "B"),
        MessageDescriptor::new("Point p")
            .with_field(TypeReference::message("geometry_msgs", "Point"), "p"),
        vec![point()],
    ));
    let top = MessageTypeInfo::new(
        TypeReference::message("d", "Top"),
        MessageDescriptor::new("A a\nB b")
            .with_field(TypeReference::message("d", "A"), "a")
            .with_field(TypeReference::message("d", "B"), "b"),
        vec![a, b],
    );

    let definition = top.message_definition();

    assert_eq!(definition.matches("MSG: geometry_msgs/Point").count(), 1);
    let order: Vec<&str> = definition
        .lines()
        .filter_map(|line| line.strip_prefix("MSG: "))
        .collect();
    assert_eq!(order, ["d/A", "geometry_msgs/Point", "d/B"]);
}

#[test]
fn MessageTypeInfo___equal_structure___compares_equal() {
    let first = pose_stamped();
    let second = pose_stamped();

    assert_eq!(first, second);
    assert_ne!(first, *pose());
}

#[test]
fn MessageTypeInfo___unresolvable_types___compare_by_structure() {
    let unresolved = |field: &str| {
        MessageTypeInfo::new(
            TypeReference::message("nav_msgs", "Path"),
            MessageDescriptor::new(format!("geometry_msgs/PoseStamped {field}"))
                .with_field(TypeReference::message("geometry_msgs", "PoseStamped"), field),
            Vec::new(),
        )
    };

    assert!(unresolved("pose").md5_sum().is_err());
    assert_eq!(unresolved("pose"), unresolved("pose"));
    assert_ne!(unresolved("pose"), unresolved("goal"));
}

#[test]
fn MessageTypeInfo___dependency_content___changes_sum_of_identical_shape() {
    let holder = |dependency: Arc<MessageTypeInfo>| {
        MessageTypeInfo::new(
            TypeReference::message("pkg", "A"),
            MessageDescriptor::new("dep/X x").with_field(TypeReference::message("dep", "X"), "x"),
            vec![dependency],
        )
    };

    let with_float = holder(leaf("dep", "X", &[("float64", "v")]));
    let with_int = holder(leaf("dep", "X", &[("int32", "v")]));

    assert_eq!(with_float.descriptor(), with_int.descriptor());
    assert_ne!(with_float.md5_sum().unwrap(), with_int.md5_sum().unwrap());
}

#[test]
fn MessageTypeInfo___unrelated_sibling_types___leave_sum_unchanged() {
    fn resolver_with(siblings: &[(&str, &str)]) -> crate::MessageTypeResolver {
        let mut resolver = crate::MessageTypeResolver::new();
        for info in [point(), quaternion(), pose()] {
            resolver
                .add(info.type_ref().clone(), info.descriptor().clone())
                .unwrap();
        }
        for (name, field_type) in siblings {
            resolver
                .add(
                    TypeReference::message("geometry_msgs", *name),
                    MessageDescriptor::new(format!("{field_type} value"))
                        .with_field(built_in(field_type), "value"),
                )
                .unwrap();
        }
        resolver
    }
    let pose_identity = TypeIdentity::new("geometry_msgs", "Pose");

    let alone = resolver_with(&[]).resolve(&pose_identity).unwrap();
    let with_sibling = resolver_with(&[("Accel", "float64")])
        .resolve(&pose_identity)
        .unwrap();
    let with_changed_sibling = resolver_with(&[("Accel", "int8")])
        .resolve(&pose_identity)
        .unwrap();

    assert_eq!(alone.md5_sum().unwrap(), "e45d45a5a1ce597b249e23fb30fc871f");
    assert_eq!(with_sibling.md5_sum().unwrap(), alone.md5_sum().unwrap());
    assert_eq!(with_changed_sibling.md5_sum().unwrap(), alone.md5_sum().unwrap());
}

#[test]
fn MessageTypeInfo___display___is_qualified_name() {
    assert_eq!(pose().to_string(), "geometry_msgs/Pose");
}
