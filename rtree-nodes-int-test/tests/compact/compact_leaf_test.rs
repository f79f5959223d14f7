use rtree_nodes::{
    BoundingBox, Codec, CompactFactory, CompactLeaf, Context, Entry, Factory, NodeResult,
    NodeTable,
};
use rtree_nodes_int_test::test_util::decimal_codec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn three_entries() -> Vec<Entry<i64, BoundingBox>> {
    vec![
        Entry::new(1, BoundingBox::new(0.0, 0.0, 1.0, 1.0)),
        Entry::new(2, BoundingBox::new(2.0, 2.0, 3.0, 3.0)),
        Entry::new(3, BoundingBox::new(-1.0, 5.0, 0.0, 6.0)),
    ]
}

/// Decimal codec that counts how many payloads it decodes.
fn counting_codec() -> (Codec<i64>, Arc<AtomicUsize>) {
    let decodes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&decodes);
    let codec = Codec::new(
        |v: &i64| Ok(v.to_string().into_bytes()),
        move |bytes: &[u8]| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(std::str::from_utf8(bytes)?.parse::<i64>()?)
        },
    );
    (codec, decodes)
}

#[test]
fn test_end_to_end_decimal_payloads() {
    let factory = CompactFactory::new(decimal_codec());
    let context = Context::default();
    let leaf = factory.create_leaf(three_entries(), &context).unwrap();

    assert_eq!(leaf.count(), 3);
    assert_eq!(leaf.mbr(), BoundingBox::new(-1.0, 0.0, 3.0, 6.0));
    let decoded: Vec<_> = leaf.entries().collect::<NodeResult<_>>().unwrap();
    assert_eq!(decoded, three_entries());

    // payloads are stored as their decimal text
    let compact = CompactLeaf::from_entries(&three_entries(), decimal_codec(), context).unwrap();
    let table = NodeTable::from_bytes(Arc::from(compact.buffer())).unwrap();
    assert_eq!(table.payload_bytes(0).unwrap(), b"1");
    assert_eq!(table.payload_bytes(1).unwrap(), b"2");
    assert_eq!(table.payload_bytes(2).unwrap(), b"3");
}

#[test]
fn test_iteration_is_restartable() {
    let factory = CompactFactory::new(decimal_codec());
    let leaf = factory.create_leaf(three_entries(), &Context::default()).unwrap();

    let mut partial = leaf.entries();
    assert_eq!(*partial.next().unwrap().unwrap().value(), 1);

    let values: Vec<i64> = leaf.entries().map(|e| *e.unwrap().value()).collect();
    assert_eq!(values, vec![1, 2, 3]);
    let again: Vec<i64> = leaf.entries().map(|e| *e.unwrap().value()).collect();
    assert_eq!(values, again);

    assert_eq!(*partial.next().unwrap().unwrap().value(), 2);
}

#[test]
fn test_random_access_decodes_only_the_requested_slot() {
    let (codec, decodes) = counting_codec();
    let factory = CompactFactory::new(codec);
    let leaf = factory.create_leaf(three_entries(), &Context::default()).unwrap();

    assert_eq!(leaf.mbr(), BoundingBox::new(-1.0, 0.0, 3.0, 6.0));
    assert_eq!(leaf.count(), 3);
    assert_eq!(leaf.geometry(1).unwrap(), BoundingBox::new(2.0, 2.0, 3.0, 3.0));
    assert_eq!(decodes.load(Ordering::SeqCst), 0);

    assert_eq!(leaf.entry(2).unwrap(), three_entries()[2]);
    assert_eq!(decodes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_encoding_failure_is_atomic() {
    let factory = CompactFactory::builder()
        .serializer(|v: &i64| {
            if *v == 3 {
                anyhow::bail!("cannot encode {}", v)
            }
            Ok(v.to_string().into_bytes())
        })
        .deserializer(|bytes: &[u8]| Ok(std::str::from_utf8(bytes)?.parse::<i64>()?))
        .build()
        .unwrap();

    let err = factory
        .create_leaf(three_entries(), &Context::default())
        .unwrap_err();
    assert!(err.is_encoding());
    assert_eq!(err.index(), Some(2));
    assert!(err.to_string().contains("cannot encode 3"));

    // the first two entries alone still encode
    let leaf = factory
        .create_leaf(three_entries()[..2].to_vec(), &Context::default())
        .unwrap();
    assert_eq!(leaf.count(), 2);
}

#[test]
fn test_decode_failure_does_not_poison_the_leaf() {
    let factory = CompactFactory::builder()
        .serializer(|v: &i64| Ok(v.to_string().into_bytes()))
        .deserializer(|bytes: &[u8]| {
            if bytes == b"2" {
                anyhow::bail!("slot rejected")
            }
            Ok(std::str::from_utf8(bytes)?.parse::<i64>()?)
        })
        .build()
        .unwrap();
    let leaf = factory.create_leaf(three_entries(), &Context::default()).unwrap();

    let results: Vec<_> = leaf.entries().collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert!(err.is_decode());
    assert_eq!(err.index(), Some(1));
    assert!(results[2].is_ok());

    // failures repeat, neighbours stay readable
    assert!(leaf.entry(1).is_err());
    assert_eq!(leaf.entry(0).unwrap(), three_entries()[0]);
    assert_eq!(leaf.mbr(), BoundingBox::new(-1.0, 0.0, 3.0, 6.0));
    assert!(leaf.to_vec().is_err());
}

#[test]
fn test_compact_buffer_validates_on_reload() {
    let leaf = CompactLeaf::from_entries(&three_entries(), decimal_codec(), Context::default())
        .unwrap();
    assert_eq!(leaf.buffer().len(), leaf.encoded_len());

    let bytes = leaf.buffer();
    let truncated: Arc<[u8]> = Arc::from(&bytes[..bytes.len() - 2]);
    let err = NodeTable::from_bytes(truncated).unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn test_large_leaf() {
    let context = Context::builder().max_children(256).build().unwrap();
    let entries: Vec<_> = (0..256)
        .map(|i| {
            let x = (i % 16) as f64;
            let y = (i / 16) as f64;
            Entry::new(i as i64 * 1000, BoundingBox::new(x, y, x + 0.5, y + 0.5))
        })
        .collect();
    let leaf = CompactFactory::new(decimal_codec())
        .create_leaf(entries.clone(), &context)
        .unwrap();

    assert_eq!(leaf.count(), 256);
    assert_eq!(leaf.mbr(), BoundingBox::new(0.0, 0.0, 15.5, 15.5));
    assert_eq!(leaf.entry(200).unwrap(), entries[200]);
    assert_eq!(leaf.entries().nth(255).unwrap().unwrap(), entries[255]);
    assert_eq!(leaf.to_vec().unwrap(), entries);
}
