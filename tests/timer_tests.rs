use std::time::Duration;

use fareline::kernel::{ticks_for, Tick, TimerQueue};

#[test]
fn test_ticks_round_up() {
    assert_eq!(ticks_for(Duration::ZERO), 0);
    assert_eq!(ticks_for(Duration::from_millis(1)), 1);
    assert_eq!(ticks_for(Duration::from_millis(100)), 1);
    assert_eq!(ticks_for(Duration::from_millis(2500)), 25);
    assert_eq!(ticks_for(Duration::from_millis(1850)), 19);

    let start = Tick { frame: 7 };
    assert_eq!(start.after(Duration::from_millis(1800)), Tick { frame: 25 });
    assert_eq!(start.next().elapsed_since(start), 1);
    assert_eq!(start.elapsed_since(start.next()), 0);
}

#[test]
fn test_drain_in_due_order() {
    let mut queue = TimerQueue::new();
    queue.schedule(Tick { frame: 30 }, "late");
    queue.schedule(Tick { frame: 10 }, "early");
    queue.schedule(Tick { frame: 10 }, "early-second");
    queue.schedule(Tick { frame: 50 }, "future");

    assert_eq!(queue.next_due(), Some(Tick { frame: 10 }));
    assert!(queue.drain_due(Tick { frame: 9 }).is_empty());
    assert_eq!(queue.drain_due(Tick { frame: 30 }), vec!["early", "early-second", "late"]);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.next_due(), Some(Tick { frame: 50 }));
}

#[test]
fn test_cancel() {
    let mut queue = TimerQueue::new();
    let first = queue.schedule(Tick { frame: 5 }, 1);
    queue.schedule(Tick { frame: 6 }, 2);

    assert!(queue.cancel(first));
    assert!(!queue.cancel(first), "second cancel is a no-op");
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.drain_due(Tick { frame: 10 }), vec![2]);
    assert!(!queue.cancel(first), "already drained");

    queue.schedule(Tick { frame: 20 }, 3);
    queue.cancel_all();
    assert!(queue.is_empty());
    assert_eq!(queue.next_due(), None);
}
