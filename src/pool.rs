//! Bounded worker pool
//!
//! Fan-out/fan-in over plain threads: a shared task queue, a fixed
//! worker count, results delivered over a channel in completion order.
//! No long-lived workers; each call builds and drains its own pool.

use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

/// Run `job` over `items` on at most `workers` threads. Results arrive
/// on the returned channel as they complete, not in submission order.
/// Dropping the receiver is a cooperative cancel: workers finish their
/// in-flight task, fail to deliver it, and exit without draining the
/// queue.
pub fn map_bounded<T, R, F>(items: Vec<T>, workers: usize, job: F) -> Receiver<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> R + Send + Sync + 'static,
{
    let (tx, rx) = channel();
    let count = items.len();
    if count == 0 {
        return rx;
    }

    let queue = Arc::new(Mutex::new(VecDeque::from(items)));
    let job = Arc::new(job);

    for _ in 0..workers.clamp(1, count) {
        let queue = Arc::clone(&queue);
        let job = Arc::clone(&job);
        let tx = tx.clone();

        thread::spawn(move || loop {
            let task = match queue.lock() {
                Ok(mut queue) => queue.pop_front(),
                Err(_) => None,
            };
            match task {
                Some(task) => {
                    if tx.send(job(task)).is_err() {
                        break;
                    }
                }
                None => break,
            }
        });
    }

    rx
}
