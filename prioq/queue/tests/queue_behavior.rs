//! Behavioral tests for the blocking priority queue.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use prioq_queue::{
    Event, PqError, PriorityLevel, PriorityQueue, PriorityQueueHandle, QueueConfig, SendPolicy,
    Timeout, DEFAULT_CAPACITY,
};
use proptest::prelude::*;

fn new_queue() -> PriorityQueueHandle<u32> {
    PriorityQueue::create().expect("queue creation")
}

#[test]
fn low_high_medium_come_out_high_medium_low() {
    let queue: PriorityQueueHandle = PriorityQueue::create().expect("queue creation");
    let wait = Duration::from_millis(20);

    for priority in [PriorityLevel::Low, PriorityLevel::High, PriorityLevel::Medium] {
        queue.send(Event::new(priority), wait).expect("send");
    }

    assert_eq!(queue.receive(wait).map(|e| e.priority()), Ok(PriorityLevel::High));
    assert_eq!(queue.receive(wait).map(|e| e.priority()), Ok(PriorityLevel::Medium));
    assert_eq!(queue.receive(wait).map(|e| e.priority()), Ok(PriorityLevel::Low));
    assert_eq!(queue.receive(wait), Err(PqError::Timeout));
}

#[test]
fn full_queue_reports_capacity_exceeded() {
    let queue = new_queue();
    for seq in 0..DEFAULT_CAPACITY as u32 {
        queue
            .try_send(Event::with_payload(PriorityLevel::Low, seq))
            .expect("room left");
    }

    assert_eq!(
        queue.send(Event::with_payload(PriorityLevel::High, 99), Duration::from_millis(5)),
        Err(PqError::CapacityExceeded)
    );
    assert_eq!(queue.len(), DEFAULT_CAPACITY);
    assert_eq!(queue.available(), DEFAULT_CAPACITY);
    // The rejected high-priority event displaced nothing.
    assert_eq!(queue.try_receive().map(|e| e.priority()), Ok(PriorityLevel::Low));
}

#[test]
fn empty_receive_waits_out_the_full_budget() {
    let queue = new_queue();
    let budget = Duration::from_millis(40);

    let start = Instant::now();
    assert_eq!(queue.receive(budget), Err(PqError::Timeout));
    assert!(start.elapsed() >= budget);
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.available(), 0);
}

#[test]
fn blocked_receiver_wakes_on_send() {
    let queue = new_queue();
    let receiver = {
        let queue = queue.clone();
        thread::spawn(move || queue.receive(Timeout::Forever))
    };

    thread::sleep(Duration::from_millis(20));
    queue
        .send(Event::with_payload(PriorityLevel::Medium, 7), Timeout::NoWait)
        .expect("send");

    let event = receiver.join().expect("receiver panicked").expect("receive");
    assert_eq!(event.into_payload(), 7);
    assert!(queue.is_empty());
}

#[test]
fn blocking_policy_waits_for_a_free_slot() {
    let config = QueueConfig::builder()
        .name("blocking")
        .send_policy(SendPolicy::Block)
        .build();
    let queue: PriorityQueueHandle<u32, 2> = PriorityQueue::create_with(config).expect("queue");

    queue.try_send(Event::with_payload(PriorityLevel::Low, 0)).unwrap();
    queue.try_send(Event::with_payload(PriorityLevel::Low, 1)).unwrap();
    assert_eq!(
        queue.send(Event::with_payload(PriorityLevel::High, 2), Duration::from_millis(10)),
        Err(PqError::Timeout)
    );

    let (started_tx, started_rx) = mpsc::channel();
    let sender = {
        let queue = queue.clone();
        thread::spawn(move || {
            started_tx.send(()).unwrap();
            queue.send(Event::with_payload(PriorityLevel::High, 2), Timeout::Forever)
        })
    };

    started_rx.recv().unwrap();
    thread::sleep(Duration::from_millis(20));
    assert!(queue.try_receive().is_ok());

    assert_eq!(sender.join().expect("sender panicked"), Ok(()));
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.try_receive().map(|e| e.priority()), Ok(PriorityLevel::High));
}

#[test]
fn rejecting_policy_fails_fast_when_full() {
    let queue: PriorityQueueHandle<(), 1> = PriorityQueue::create().expect("queue");
    queue.try_send(Event::new(PriorityLevel::Low)).unwrap();

    let start = Instant::now();
    assert_eq!(
        queue.send(Event::new(PriorityLevel::High), Duration::from_secs(5)),
        Err(PqError::CapacityExceeded)
    );
    assert!(start.elapsed() < Duration::from_secs(1));
}

proptest! {
    #[test]
    fn size_tracks_successful_operations(ops in prop::collection::vec(prop::option::of(0u8..3), 0..80)) {
        let queue = new_queue();
        let mut sent = 0usize;
        let mut received = 0usize;

        for (seq, op) in ops.into_iter().enumerate() {
            match op {
                Some(raw) => {
                    let priority = PriorityLevel::new(raw).unwrap();
                    match queue.try_send(Event::with_payload(priority, seq as u32)) {
                        Ok(()) => sent += 1,
                        Err(err) => prop_assert_eq!(err, PqError::CapacityExceeded),
                    }
                }
                None => match queue.try_receive() {
                    Ok(_) => received += 1,
                    Err(err) => prop_assert_eq!(err, PqError::Timeout),
                },
            }
            prop_assert!(queue.is_heap_valid());
            prop_assert_eq!(queue.len(), sent - received);
            prop_assert_eq!(queue.available(), queue.len());
            prop_assert!(queue.len() <= DEFAULT_CAPACITY);
        }
    }

    #[test]
    fn filled_queue_drains_in_priority_order(raws in prop::collection::vec(0u8..3, DEFAULT_CAPACITY)) {
        let queue = new_queue();
        for (seq, raw) in raws.iter().enumerate() {
            let priority = PriorityLevel::new(*raw).unwrap();
            queue.try_send(Event::with_payload(priority, seq as u32)).unwrap();
        }

        let drained: Vec<PriorityLevel> = (0..DEFAULT_CAPACITY)
            .map(|_| queue.try_receive().unwrap().priority())
            .collect();
        prop_assert!(drained.windows(2).all(|pair| pair[0] >= pair[1]));
        prop_assert!(queue.is_empty());
    }
}
