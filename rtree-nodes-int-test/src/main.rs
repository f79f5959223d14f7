use rtree_nodes::{BoundingBox, CompactLeaf, Context, Entry, Factory, Node, NodeResult};
use rtree_nodes_int_test::test_util::{
    build_tree, create_compact_test_context, create_default_test_context, entry_count,
    random_entries, search, utf8_codec, Payload, TestContext,
};
use std::mem::size_of;

/// Bytes held by `entries` as live values.
fn live_bytes(entries: &[Entry<Payload, BoundingBox>]) -> usize {
    entries
        .iter()
        .map(|e| size_of::<Entry<Payload, BoundingBox>>() + e.value().capacity())
        .sum()
}

/// Bytes held by `entries` once packed into compact leaves of `context`.
fn compact_bytes(
    entries: &[Entry<Payload, BoundingBox>],
    context: &Context,
) -> NodeResult<usize> {
    let mut total = 0;
    for run in entries.chunks(context.max_children()) {
        let leaf: CompactLeaf<Payload, BoundingBox> =
            CompactLeaf::from_entries(run, utf8_codec(), *context)?;
        total += leaf.encoded_len();
    }
    Ok(total)
}

fn stress(ctx: &TestContext, entries: &[Entry<Payload, BoundingBox>]) -> NodeResult<()> {
    let start = std::time::Instant::now();
    let root: Node<Payload, BoundingBox> =
        build_tree(ctx.factory(), entries.to_vec(), ctx.context())?;
    println!(
        "[{}] Built tree of {} entries in {:?}",
        ctx.name(),
        entry_count(&root),
        start.elapsed()
    );

    let start = std::time::Instant::now();
    let mut hits = 0;
    for i in 0..1000 {
        let x = (i % 100) as f64;
        let y = (i / 10) as f64;
        hits += search(&root, &BoundingBox::new(x, y, x + 2.0, y + 2.0))?.len();
    }
    println!(
        "[{}] Ran 1000 window queries ({} hits) in {:?}",
        ctx.name(),
        hits,
        start.elapsed()
    );

    let start = std::time::Instant::now();
    let extra = ctx
        .factory()
        .create_entry(uuid::Uuid::new_v4().to_string(), BoundingBox::new(0.0, 0.0, 1.0, 1.0));
    let mut node = &root;
    while let Some(child) = node.as_non_leaf().and_then(|n| n.child(0)) {
        node = child;
    }
    if let Some(leaf) = node.as_leaf() {
        leaf.with_entry(extra, ctx.factory(), ctx.context())?;
    }
    println!("[{}] Rebuilt one leaf in {:?}", ctx.name(), start.elapsed());
    Ok(())
}

fn main() -> NodeResult<()> {
    println!("Starting stress test...");
    let count = 100000;
    let entries = random_entries(count, 7);

    let default_ctx = create_default_test_context()?;
    let compact_ctx = create_compact_test_context()?;

    println!(
        "Leaf payload footprint: {} bytes as live values, {} bytes compact",
        live_bytes(&entries),
        compact_bytes(&entries, compact_ctx.context())?
    );

    stress(&default_ctx, &entries)?;
    stress(&compact_ctx, &entries)?;
    Ok(())
}
