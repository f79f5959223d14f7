use rtree_nodes::{BoundingBox, DefaultFactory, Entry, NodeError, NodeResult};
use rtree_nodes_int_test::test_util::{
    cleanup, create_compact_test_context, create_default_test_context, random_entries, run_test,
    TestContext,
};

fn grow_and_shrink(ctx: TestContext) -> NodeResult<()> {
    let entries = random_entries(4, 21);
    let leaf = ctx.factory().create_leaf(entries.clone(), ctx.context())?;
    let before = leaf.mbr();

    let far = Entry::new("far".to_string(), BoundingBox::new(500.0, 500.0, 501.0, 501.0));
    let grown = leaf.with_entry(far.clone(), ctx.factory(), ctx.context())?;
    assert_eq!(grown.count(), 5);
    assert_eq!(grown.entry(4)?, far);
    assert_eq!(grown.mbr(), before.union(far.geometry()));

    let shrunk = grown.without_entry(4, ctx.factory(), ctx.context())?;
    assert_eq!(shrunk.to_vec()?, entries);
    assert_eq!(shrunk.mbr(), before);

    // the originals are untouched
    assert_eq!(leaf.count(), 4);
    assert_eq!(leaf.to_vec()?, entries);
    assert_eq!(grown.count(), 5);

    assert!(matches!(
        leaf.without_entry(9, ctx.factory(), ctx.context()),
        Err(NodeError::OutOfBounds { index: 9, count: 4 })
    ));
    Ok(())
}

#[test]
fn test_default_copy_on_write() {
    run_test(create_default_test_context, grow_and_shrink, cleanup)
}

#[test]
fn test_compact_copy_on_write() {
    run_test(create_compact_test_context, grow_and_shrink, cleanup)
}

#[test]
fn test_rebuild_through_another_factory() {
    run_test(
        create_compact_test_context,
        |ctx| {
            let entries = random_entries(6, 8);
            let compact = ctx.factory().create_leaf(entries.clone(), ctx.context())?;
            let extra = Entry::new("x".to_string(), BoundingBox::new(1.0, 1.0, 2.0, 2.0));

            let plain = compact.with_entry(extra.clone(), &DefaultFactory, ctx.context())?;
            let mut expected = entries;
            expected.push(extra);
            assert_eq!(plain.to_vec()?, expected);
            assert_eq!(plain.mbr(), compact.mbr().union(&BoundingBox::new(1.0, 1.0, 2.0, 2.0)));
            Ok(())
        },
        cleanup,
    )
}
