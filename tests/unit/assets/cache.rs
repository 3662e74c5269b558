use super::*;

fn handle(tag: u8) -> FrameHandle {
    FrameHandle::from_parts(1, 1, vec![tag])
}

#[test]
fn put_is_insert_if_absent() {
    let cache = FrameCache::new();
    assert!(cache.is_empty());
    assert!(cache.put(FrameId::from("a.png"), handle(1)));
    assert!(!cache.put(FrameId::from("a.png"), handle(2)));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("a.png").unwrap().encoded(), &[1]);
}

#[test]
fn has_and_get_miss() {
    let cache = FrameCache::new();
    assert!(!cache.has("missing.png"));
    assert!(cache.get("missing.png").is_none());
}

#[test]
fn clones_share_storage() {
    let a = FrameCache::new();
    let b = a.clone();
    b.put(FrameId::from("x.webp"), handle(9));
    assert!(a.has("x.webp"));
}

#[test]
fn concurrent_puts_of_same_id_keep_one_entry() {
    let cache = FrameCache::new();
    let inserted: usize = std::thread::scope(|s| {
        let joins: Vec<_> = (0..8u8)
            .map(|i| {
                let cache = cache.clone();
                s.spawn(move || usize::from(cache.put(FrameId::from("same.png"), handle(i))))
            })
            .collect();
        joins.into_iter().map(|j| j.join().unwrap()).sum()
    });
    assert_eq!(inserted, 1);
    assert_eq!(cache.len(), 1);
}
