//! Single-producer/multi-consumer emotion event stream
//!
//! Each subscriber owns its own queue; there is no shared cursor, so slow
//! consumers never hold back fast ones. Delivery order is preserved per
//! subscriber and duplicate events are delivered as-is.

use crate::event::EmotionEvent;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Anything that can hand out emotion event subscriptions
///
/// Producers implement this explicitly; there is no runtime discovery of
/// compatible event shapes.
pub trait EmotionSource {
    /// Open a new independent subscription
    fn subscribe(&mut self) -> EmotionReceiver;
}

type Queue = Arc<Mutex<VecDeque<EmotionEvent>>>;

/// Consumer side of a bus subscription
pub struct EmotionReceiver {
    queue: Queue,
}

impl EmotionReceiver {
    /// Take the oldest pending event, if any
    pub fn poll(&self) -> Option<EmotionEvent> {
        self.queue.lock().pop_front()
    }

    /// Take every pending event in delivery order
    pub fn drain(&self) -> Vec<EmotionEvent> {
        self.queue.lock().drain(..).collect()
    }

    /// Number of pending events
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }
}

/// The emotion signal bus
///
/// Single logical producer; any number of consumers. Dropped receivers are
/// pruned lazily on the next publish.
#[derive(Default)]
pub struct EmotionBus {
    subscribers: Vec<Queue>,
}

impl EmotionBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every live subscriber
    pub fn publish(&mut self, event: EmotionEvent) {
        // A receiver holds the only other strong reference to its queue
        self.subscribers.retain(|q| Arc::strong_count(q) > 1);
        for queue in &self.subscribers {
            queue.lock().push_back(event);
        }
    }

    /// Number of live subscribers (after pruning on publish)
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl EmotionSource for EmotionBus {
    fn subscribe(&mut self) -> EmotionReceiver {
        let queue: Queue = Arc::new(Mutex::new(VecDeque::new()));
        self.subscribers.push(queue.clone());
        EmotionReceiver { queue }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EmotionLabel;

    fn ev(label: EmotionLabel, confidence: f32) -> EmotionEvent {
        EmotionEvent::new(label, confidence)
    }

    #[test]
    fn test_independent_cursors() {
        let mut bus = EmotionBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(ev(EmotionLabel::Calm, 0.9));
        bus.publish(ev(EmotionLabel::Sad, 0.8));

        // Consuming on one subscription does not advance the other
        assert_eq!(a.poll().unwrap().label, EmotionLabel::Calm);
        assert_eq!(b.drain().len(), 2);
        assert_eq!(a.poll().unwrap().label, EmotionLabel::Sad);
        assert!(a.poll().is_none());
    }

    #[test]
    fn test_order_preserved_no_dedup() {
        let mut bus = EmotionBus::new();
        let rx = bus.subscribe();

        bus.publish(ev(EmotionLabel::Calm, 0.9));
        bus.publish(ev(EmotionLabel::Calm, 0.9));

        let got = rx.drain();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], got[1]);
    }

    #[test]
    fn test_dropped_receiver_pruned() {
        let mut bus = EmotionBus::new();
        let rx = bus.subscribe();
        drop(rx);

        bus.publish(ev(EmotionLabel::Happy, 0.7));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_late_subscriber_misses_history() {
        let mut bus = EmotionBus::new();
        bus.publish(ev(EmotionLabel::Excited, 0.9));
        let rx = bus.subscribe();
        assert!(rx.poll().is_none());
    }
}
