use std::sync::mpsc;

use super::*;

#[test]
fn queued_spawner_runs_fifo_and_follow_ups() {
    let q = QueuedSpawner::new();
    let log = Arc::new(Mutex::new(Vec::<u32>::new()));

    for i in 0..3 {
        let log = Arc::clone(&log);
        q.spawn(Box::new(move || log.lock().unwrap().push(i)));
    }
    let q2 = q.clone();
    let log2 = Arc::clone(&log);
    q.spawn(Box::new(move || {
        let log3 = Arc::clone(&log2);
        q2.spawn(Box::new(move || log3.lock().unwrap().push(99)));
    }));

    assert_eq!(q.pending(), 4);
    assert_eq!(q.run_until_idle(), 5);
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 99]);
    assert!(!q.run_next());
}

#[test]
fn queued_spawner_can_complete_out_of_order() {
    let q = QueuedSpawner::new();
    let log = Arc::new(Mutex::new(Vec::<u32>::new()));
    for i in 0..3 {
        let log = Arc::clone(&log);
        q.spawn(Box::new(move || log.lock().unwrap().push(i)));
    }
    assert!(q.run_newest());
    assert!(q.run_next());
    assert!(q.run_newest());
    assert!(!q.run_newest());
    assert_eq!(*log.lock().unwrap(), vec![2, 0, 1]);
}

#[test]
fn rayon_spawner_executes_tasks() {
    let s = RayonSpawner::new(Some(2)).unwrap();
    let (tx, rx) = mpsc::channel();
    for i in 0..4u32 {
        let tx = tx.clone();
        s.spawn(Box::new(move || tx.send(i).unwrap()));
    }
    drop(tx);
    let mut got: Vec<u32> = rx.iter().collect();
    got.sort();
    assert_eq!(got, vec![0, 1, 2, 3]);
}

#[test]
fn rayon_spawner_rejects_zero_threads() {
    assert!(RayonSpawner::new(Some(0)).is_err());
}
