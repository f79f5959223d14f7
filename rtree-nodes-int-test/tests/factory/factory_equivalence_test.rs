use rtree_nodes::{BoundingBox, Factory, Node, NodeError, NodeResult};
use rtree_nodes_int_test::test_util::{
    cleanup, create_bincode_test_context, create_compact_test_context,
    create_default_test_context, random_entries, run_test, TestContext,
};

fn leaf_round_trip(ctx: TestContext) -> NodeResult<()> {
    let entries = random_entries(ctx.context().max_children(), 1);
    let leaf = ctx.factory().create_leaf(entries.clone(), ctx.context())?;

    assert_eq!(leaf.count(), entries.len());
    assert_eq!(leaf.to_vec()?, entries);
    assert_eq!(
        leaf.mbr(),
        BoundingBox::union_all(entries.iter().map(|e| *e.geometry()))
    );
    for (i, expected) in entries.iter().enumerate() {
        assert_eq!(&leaf.entry(i)?, expected);
        assert_eq!(&leaf.geometry(i)?, expected.geometry());
    }
    Ok(())
}

fn empty_leaf(ctx: TestContext) -> NodeResult<()> {
    let leaf = ctx.factory().create_leaf(Vec::new(), ctx.context())?;
    assert!(leaf.is_empty());
    assert!(leaf.mbr().is_empty());
    assert_eq!(leaf.entries().count(), 0);
    assert!(matches!(
        leaf.entry(0),
        Err(NodeError::OutOfBounds { index: 0, count: 0 })
    ));
    Ok(())
}

fn non_leaf_is_conventional(ctx: TestContext) -> NodeResult<()> {
    let entries = random_entries(12, 2);
    let (left, right) = entries.split_at(6);
    let first = ctx.factory().create_leaf(left.to_vec(), ctx.context())?;
    let second = ctx.factory().create_leaf(right.to_vec(), ctx.context())?;
    let expected = first.mbr().union(&second.mbr());

    let parent = ctx
        .factory()
        .create_non_leaf(vec![Node::Leaf(first), Node::Leaf(second)], ctx.context());
    assert_eq!(parent.count(), 2);
    assert_eq!(parent.mbr(), expected);
    assert_eq!(parent.context(), ctx.context());
    assert!(parent.children().iter().all(Node::is_leaf));

    let node: Node<_, _> = parent.into();
    assert!(!node.is_leaf());
    assert_eq!(node.mbr(), expected);
    Ok(())
}

#[test]
fn test_default_leaf_round_trip() {
    run_test(create_default_test_context, leaf_round_trip, cleanup)
}

#[test]
fn test_compact_leaf_round_trip() {
    run_test(create_compact_test_context, leaf_round_trip, cleanup)
}

#[test]
fn test_bincode_leaf_round_trip() {
    run_test(create_bincode_test_context, leaf_round_trip, cleanup)
}

#[test]
fn test_default_empty_leaf() {
    run_test(create_default_test_context, empty_leaf, cleanup)
}

#[test]
fn test_compact_empty_leaf() {
    run_test(create_compact_test_context, empty_leaf, cleanup)
}

#[test]
fn test_default_non_leaf() {
    run_test(create_default_test_context, non_leaf_is_conventional, cleanup)
}

#[test]
fn test_compact_non_leaf() {
    run_test(create_compact_test_context, non_leaf_is_conventional, cleanup)
}

#[test]
fn test_representations_are_indistinguishable() {
    run_test(
        create_default_test_context,
        |ctx| {
            let compact = create_compact_test_context()?;
            let entries = random_entries(ctx.context().max_children(), 3);

            let plain = ctx.factory().create_leaf(entries.clone(), ctx.context())?;
            let packed = compact
                .factory()
                .create_leaf(entries.clone(), compact.context())?;

            assert_eq!(plain.count(), packed.count());
            assert_eq!(plain.mbr(), packed.mbr());
            assert_eq!(plain.to_vec()?, packed.to_vec()?);
            let plain_rev: Vec<_> = plain.entries().rev().collect::<NodeResult<_>>()?;
            let packed_rev: Vec<_> = packed.entries().rev().collect::<NodeResult<_>>()?;
            assert_eq!(plain_rev, packed_rev);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_create_entry() {
    run_test(
        create_compact_test_context,
        |ctx| {
            let entry = ctx
                .factory()
                .create_entry("payload".to_string(), BoundingBox::new(0.0, 0.0, 2.0, 2.0));
            assert_eq!(entry.value(), "payload");
            assert_eq!(entry.geometry(), &BoundingBox::new(0.0, 0.0, 2.0, 2.0));

            let leaf = ctx.factory().create_leaf(vec![entry.clone()], ctx.context())?;
            assert_eq!(leaf.entry(0)?, entry);
            Ok(())
        },
        cleanup,
    )
}
