use rtree_nodes::{BoundingBox, CompactFactory, Context, Entry, Factory, Node, NodeError, Point};
use rtree_nodes_int_test::test_util::decimal_codec;

#[test]
fn test_compact_factory_requires_both_functions() {
    let err = CompactFactory::<i64>::builder().build().unwrap_err();
    assert!(err.is_configuration());

    let err = CompactFactory::<i64>::builder()
        .serializer(|v: &i64| Ok(v.to_string().into_bytes()))
        .build()
        .unwrap_err();
    assert!(matches!(err, NodeError::Configuration(ref msg) if msg.contains("deserializer")));

    let err = CompactFactory::<i64>::builder()
        .deserializer(|bytes: &[u8]| Ok(std::str::from_utf8(bytes)?.parse::<i64>()?))
        .build()
        .unwrap_err();
    assert!(matches!(err, NodeError::Configuration(ref msg) if msg.contains("serializer")));
}

#[test]
fn test_compact_factory_exposes_its_functions() {
    let factory = CompactFactory::new(decimal_codec());
    let encode = factory.serializer().clone();
    let decode = factory.deserializer().clone();

    let bytes = encode(&-42).unwrap();
    assert_eq!(bytes, b"-42");
    assert_eq!(decode(bytes.as_slice()).unwrap(), -42);
    assert!(decode(&b"forty-two"[..]).is_err());
}

#[test]
fn test_invalid_context_is_rejected() {
    assert!(Context::builder()
        .max_children(2)
        .build()
        .unwrap_err()
        .is_configuration());
    assert!(Context::builder()
        .min_children(6)
        .max_children(6)
        .build()
        .unwrap_err()
        .is_configuration());
    assert!(Context::new(0, 10).unwrap_err().is_configuration());
}

#[test]
fn test_context_flows_into_nodes() {
    let context = Context::builder()
        .min_children(2)
        .max_children(16)
        .build()
        .unwrap();
    let factory = CompactFactory::new(decimal_codec());
    let leaf = factory
        .create_leaf(vec![Entry::new(1, Point::new(1.0, 2.0))], &context)
        .unwrap();
    assert_eq!(leaf.context(), &context);
    assert_eq!(leaf.mbr(), BoundingBox::new(1.0, 2.0, 1.0, 2.0));

    let parent = factory.create_non_leaf(vec![Node::Leaf(leaf)], &context);
    assert_eq!(parent.context().max_children(), 16);
    assert_eq!(parent.context().min_children(), 2);
}
