use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rtree_nodes::{
    BoundingBox, Codec, CompactFactory, Context, DefaultFactory, Entry, Factory, Geometry, Node,
    NodeResult,
};
use std::backtrace::Backtrace;
use std::sync::Arc;
use std::time::Instant;

/// Payload type used by the shared test contexts.
pub type Payload = String;

/// Runs a test between a setup and a teardown step.
///
/// `after` runs whether or not the test body fails. A failure or panic in any
/// step fails the test with the step it happened in.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> NodeResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> NodeResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> NodeResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    let start_time = Instant::now();

    let result = std::panic::catch_unwind(|| {
        let backtrace = Backtrace::capture();
        match before() {
            Ok(ctx) => match test(ctx.clone()) {
                Ok(_) => after(ctx)
                    .map_err(|e| (format!("After run failed: {:?}", e), backtrace.to_string())),
                Err(e) => {
                    let _ = after(ctx);
                    Err((format!("Test failed: {:?}", e), backtrace.to_string()))
                }
            },
            Err(e) => Err((format!("Before run failed: {:?}", e), backtrace.to_string())),
        }
    });

    let elapsed = start_time.elapsed();
    let (error, backtrace) = match result {
        Ok(Ok(_)) => return,
        Ok(Err((e, bt))) => (e, bt),
        Err(panic_err) => {
            let err_msg = if let Some(s) = panic_err.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_err.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            (format!("Panic: {}", err_msg), Backtrace::capture().to_string())
        }
    };

    eprintln!("\n==================== TEST FAILED ====================");
    eprintln!("Failed after {:?}", elapsed);
    eprintln!("Error: {}", error);
    if !backtrace.is_empty() && !backtrace.contains("disabled") {
        eprintln!("\nBacktrace:\n{}", backtrace);
    }
    eprintln!("=====================================================\n");

    panic!("Test failed. Error: {}", error);
}

/// A tree configuration: the context plus the one factory building its nodes.
#[derive(Clone)]
pub struct TestContext {
    name: String,
    context: Context,
    factory: Arc<dyn Factory<Payload, BoundingBox>>,
}

impl TestContext {
    pub fn new(
        name: &str,
        context: Context,
        factory: Arc<dyn Factory<Payload, BoundingBox>>,
    ) -> Self {
        Self {
            name: name.to_string(),
            context,
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn factory(&self) -> &dyn Factory<Payload, BoundingBox> {
        self.factory.as_ref()
    }

    pub fn shared_factory(&self) -> Arc<dyn Factory<Payload, BoundingBox>> {
        Arc::clone(&self.factory)
    }
}

/// Codec storing strings as their UTF-8 bytes.
pub fn utf8_codec() -> Codec<Payload> {
    Codec::new(
        |v: &Payload| Ok(v.as_bytes().to_vec()),
        |bytes: &[u8]| Ok(String::from_utf8(bytes.to_vec())?),
    )
}

/// Codec storing integers as their decimal text, e.g. `12` as `b"12"`.
pub fn decimal_codec() -> Codec<i64> {
    Codec::new(
        |v: &i64| Ok(v.to_string().into_bytes()),
        |bytes: &[u8]| Ok(std::str::from_utf8(bytes)?.parse::<i64>()?),
    )
}

pub fn test_tree_context() -> NodeResult<Context> {
    Context::builder().max_children(8).build()
}

pub fn create_default_test_context() -> NodeResult<TestContext> {
    Ok(TestContext::new(
        "default",
        test_tree_context()?,
        Arc::new(DefaultFactory),
    ))
}

pub fn create_compact_test_context() -> NodeResult<TestContext> {
    let codec = utf8_codec();
    let factory = CompactFactory::builder()
        .serializer(move |v: &Payload| codec.encode(v))
        .deserializer(|bytes: &[u8]| Ok(String::from_utf8(bytes.to_vec())?))
        .build()?;
    Ok(TestContext::new("compact", test_tree_context()?, Arc::new(factory)))
}

pub fn create_bincode_test_context() -> NodeResult<TestContext> {
    Ok(TestContext::new(
        "compact-bincode",
        test_tree_context()?,
        Arc::new(CompactFactory::new(Codec::<Payload>::bincode())),
    ))
}

pub fn cleanup(ctx: TestContext) -> NodeResult<()> {
    log::debug!("Finished test on {} tree", ctx.name());
    Ok(())
}

/// `count` entries with random unit boxes and uuid payloads.
pub fn random_entries(count: usize, seed: u64) -> Vec<Entry<Payload, BoundingBox>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let x = rng.gen_range(0.0..100.0);
            let y = rng.gen_range(0.0..100.0);
            Entry::new(
                uuid::Uuid::new_v4().to_string(),
                BoundingBox::new(x, y, x + 1.0, y + 1.0),
            )
        })
        .collect()
}

/// Packs `entries` bottom-up into a tree, asking `factory` for every node.
///
/// Entries are sorted by the x coordinate of their centre and cut into runs of
/// `max_children`; each level of nodes is grouped the same way until a single
/// root is left. An empty input yields an empty leaf.
pub fn build_tree<T, S, F>(
    factory: &F,
    mut entries: Vec<Entry<T, S>>,
    context: &Context,
) -> NodeResult<Node<T, S>>
where
    S: Geometry,
    F: Factory<T, S> + ?Sized,
{
    let fanout = context.max_children();
    entries.sort_by(|a, b| {
        let (ax, _) = a.geometry().mbr().center();
        let (bx, _) = b.geometry().mbr().center();
        ax.total_cmp(&bx)
    });

    let mut level: Vec<Node<T, S>> = Vec::new();
    let mut entries = entries.into_iter().peekable();
    while entries.peek().is_some() {
        let run: Vec<_> = entries.by_ref().take(fanout).collect();
        level.push(factory.create_leaf(run, context)?.into());
    }
    if level.is_empty() {
        return Ok(factory.create_leaf(Vec::new(), context)?.into());
    }

    while level.len() > 1 {
        let mut parents: Vec<Node<T, S>> = Vec::with_capacity(level.len() / fanout + 1);
        let mut nodes = level.into_iter().peekable();
        while nodes.peek().is_some() {
            let run: Vec<_> = nodes.by_ref().take(fanout).collect();
            parents.push(factory.create_non_leaf(run, context).into());
        }
        level = parents;
    }

    Ok(level.remove(0))
}

/// Entries whose geometry intersects `query`.
///
/// Subtrees are pruned on their bounding box, and leaf geometries are checked
/// before any payload is decoded.
pub fn search<T, S>(node: &Node<T, S>, query: &BoundingBox) -> NodeResult<Vec<Entry<T, S>>>
where
    T: Clone,
    S: Geometry,
{
    let mut found = Vec::new();
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        if !node.mbr().intersects(query) {
            continue;
        }
        match node {
            Node::Leaf(leaf) => {
                for index in 0..leaf.count() {
                    if leaf.geometry(index)?.intersects(query) {
                        found.push(leaf.entry(index)?);
                    }
                }
            }
            Node::NonLeaf(non_leaf) => stack.extend(non_leaf.children().iter().rev()),
        }
    }
    Ok(found)
}

/// Number of entries stored under `node`.
pub fn entry_count<T, S>(node: &Node<T, S>) -> usize {
    match node {
        Node::Leaf(leaf) => leaf.count(),
        Node::NonLeaf(non_leaf) => non_leaf.children().iter().map(entry_count).sum(),
    }
}

/// Number of levels from `node` down to its leaves.
pub fn depth<T, S>(node: &Node<T, S>) -> usize {
    match node {
        Node::Leaf(_) => 1,
        Node::NonLeaf(non_leaf) => 1 + non_leaf.child(0).map(depth).unwrap_or(0),
    }
}

/// All leaf entries under `node`, left to right.
pub fn collect_entries<T, S>(node: &Node<T, S>) -> NodeResult<Vec<Entry<T, S>>>
where
    T: Clone,
    S: Geometry,
{
    match node {
        Node::Leaf(leaf) => leaf.to_vec(),
        Node::NonLeaf(non_leaf) => {
            let mut all = Vec::with_capacity(entry_count(node));
            for child in non_leaf.children() {
                all.extend(collect_entries(child)?);
            }
            Ok(all)
        }
    }
}
