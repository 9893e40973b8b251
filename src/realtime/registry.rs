//! Topic Subscription Registry
//!
//! Maps topic names to listener callbacks and fans incoming events out to
//! them. The registry only reads connectivity (the connection manager flips
//! the `online` flag); it owns nothing but its own registration table.
//!
//! Dispatch works off a snapshot of the listener list and re-checks liveness
//! before every callback, so listeners may subscribe or cancel from inside a
//! callback without corrupting the table, and a handle cancelled mid-cycle
//! never sees the in-flight event.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use leptos::logging;
use serde_json::Value;

use super::protocol::ClientFrame;

type Callback = Rc<dyn Fn(&Value)>;
type Announcer = Box<dyn Fn(&ClientFrame)>;

struct ListenerEntry {
    id: u64,
    callback: Callback,
}

/// Registry of topic listeners for the realtime channel
pub struct TopicRegistry {
    /// Mirrors the connection state; registrations are refused while offline
    online: Cell<bool>,
    next_id: Cell<u64>,
    /// Topic → listeners, in registration order
    listeners: RefCell<HashMap<String, Vec<ListenerEntry>>>,
    /// Outbound control-frame sink, installed while the link is up
    announcer: RefCell<Option<Announcer>>,
}

impl TopicRegistry {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            online: Cell::new(false),
            next_id: Cell::new(1),
            listeners: RefCell::new(HashMap::new()),
            announcer: RefCell::new(None),
        })
    }

    pub fn set_online(&self, online: bool) {
        self.online.set(online);
    }

    pub fn is_online(&self) -> bool {
        self.online.get()
    }

    /// Install or remove the sink used to announce topic interest upstream
    pub fn set_announcer(&self, announcer: Option<Announcer>) {
        *self.announcer.borrow_mut() = announcer;
    }

    /// Register `callback` against `topic`.
    ///
    /// While the connection is down this performs no registration and returns
    /// an inert handle; the lifecycle adapter re-acquires once connectivity
    /// flips back. The first listener on a topic announces the topic
    /// upstream.
    pub fn subscribe(
        self: &Rc<Self>,
        topic: &str,
        callback: impl Fn(&Value) + 'static,
    ) -> Subscription {
        if !self.online.get() {
            logging::warn!("realtime: not connected, ignoring subscribe to {topic}");
            return Subscription::detached();
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let first_on_topic = {
            let mut listeners = self.listeners.borrow_mut();
            let entries = listeners.entry(topic.to_string()).or_default();
            entries.push(ListenerEntry {
                id,
                callback: Rc::new(callback),
            });
            entries.len() == 1
        };

        if first_on_topic {
            self.announce(ClientFrame::Subscribe {
                topic: topic.to_string(),
            });
        }

        Subscription {
            registry: Rc::downgrade(self),
            topic: topic.to_string(),
            id,
            released: Cell::new(false),
        }
    }

    /// Decode one inbound frame body and deliver it to every listener on
    /// `topic`, in registration order.
    ///
    /// A body that fails to parse drops that frame only. A panicking listener
    /// does not starve its siblings.
    pub fn dispatch(&self, topic: &str, body: &str) {
        let payload: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(err) => {
                logging::warn!("realtime: undecodable event on {topic}: {err}");
                return;
            }
        };

        let snapshot: Vec<(u64, Callback)> = match self.listeners.borrow().get(topic) {
            Some(entries) => entries
                .iter()
                .map(|entry| (entry.id, Rc::clone(&entry.callback)))
                .collect(),
            None => return,
        };

        for (id, callback) in snapshot {
            // A cancel earlier in this cycle drops the in-flight delivery
            if !self.is_registered(topic, id) {
                continue;
            }
            if catch_unwind(AssertUnwindSafe(|| callback(&payload))).is_err() {
                logging::error!("realtime: listener on {topic} panicked during dispatch");
            }
        }
    }

    /// Drop every registration, e.g. when the connection goes away.
    /// Outstanding [`Subscription`] handles stay valid as idempotent no-ops.
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }

    pub fn listener_count(&self, topic: &str) -> usize {
        self.listeners
            .borrow()
            .get(topic)
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    fn remove(&self, topic: &str, id: u64) {
        let emptied_topic = {
            let mut listeners = self.listeners.borrow_mut();
            match listeners.get_mut(topic) {
                Some(entries) => {
                    let before = entries.len();
                    entries.retain(|entry| entry.id != id);
                    let removed = entries.len() < before;
                    if removed && entries.is_empty() {
                        listeners.remove(topic);
                        true
                    } else {
                        false
                    }
                }
                None => false,
            }
        };

        if emptied_topic && self.online.get() {
            self.announce(ClientFrame::Unsubscribe {
                topic: topic.to_string(),
            });
        }
    }

    fn is_registered(&self, topic: &str, id: u64) -> bool {
        self.listeners
            .borrow()
            .get(topic)
            .map(|entries| entries.iter().any(|entry| entry.id == id))
            .unwrap_or(false)
    }

    fn announce(&self, frame: ClientFrame) {
        if let Some(sink) = self.announcer.borrow().as_ref() {
            sink(&frame);
        }
    }
}

/// One listener's registration on one topic.
///
/// Cancelling (explicitly or by drop) removes exactly this registration and
/// never touches siblings on the same topic. Safe to cancel repeatedly.
pub struct Subscription {
    registry: Weak<TopicRegistry>,
    topic: String,
    id: u64,
    released: Cell<bool>,
}

impl Subscription {
    /// Inert handle returned when no registration took place
    pub(crate) fn detached() -> Self {
        Self {
            registry: Weak::new(),
            topic: String::new(),
            id: 0,
            released: Cell::new(true),
        }
    }

    pub fn cancel(&self) {
        if self.released.replace(true) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(&self.topic, self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn online_registry() -> Rc<TopicRegistry> {
        let registry = TopicRegistry::new();
        registry.set_online(true);
        registry
    }

    fn recorder() -> (Rc<RefCell<Vec<Value>>>, impl Fn(&Value) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |payload: &Value| {
            sink.borrow_mut().push(payload.clone())
        })
    }

    #[test]
    fn test_fan_out_delivers_to_every_listener() {
        let registry = online_registry();
        let (seen_a, cb_a) = recorder();
        let (seen_b, cb_b) = recorder();
        let (seen_c, cb_c) = recorder();

        let _a = registry.subscribe("/topic/post/1/likes", cb_a);
        let _b = registry.subscribe("/topic/post/1/likes", cb_b);
        let _c = registry.subscribe("/topic/post/1/likes", cb_c);

        registry.dispatch("/topic/post/1/likes", r#"{"likesCount":3}"#);

        for seen in [&seen_a, &seen_b, &seen_c] {
            let seen = seen.borrow();
            assert_eq!(seen.len(), 1);
            assert_eq!(seen[0], json!({"likesCount": 3}));
        }
    }

    #[test]
    fn test_likes_scenario_cancel_stops_delivery() {
        let registry = online_registry();
        let (seen, cb) = recorder();

        let sub = registry.subscribe("/topic/post/42/likes", cb);
        registry.dispatch("/topic/post/42/likes", r#"{"likesCount":7}"#);
        assert_eq!(*seen.borrow(), vec![json!({"likesCount": 7})]);

        sub.cancel();
        registry.dispatch("/topic/post/42/likes", r#"{"likesCount":7}"#);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_cancel_leaves_siblings_untouched() {
        let registry = online_registry();
        let (seen_a, cb_a) = recorder();
        let (seen_b, cb_b) = recorder();

        let sub_a = registry.subscribe("/topic/post/5/comments", cb_a);
        let _sub_b = registry.subscribe("/topic/post/5/comments", cb_b);

        registry.dispatch("/topic/post/5/comments", r#"{"action":"COMMENT_ADDED"}"#);
        assert_eq!(seen_a.borrow().len(), 1);
        assert_eq!(seen_b.borrow().len(), 1);

        sub_a.cancel();
        registry.dispatch("/topic/post/5/comments", r#"{"action":"COMMENT_ADDED"}"#);
        assert_eq!(seen_a.borrow().len(), 1);
        assert_eq!(seen_b.borrow().len(), 2);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let registry = online_registry();
        let (seen_a, cb_a) = recorder();
        let (seen_b, cb_b) = recorder();

        let sub = registry.subscribe("/topic/post/9/likes", cb_a);
        let _other = registry.subscribe("/topic/post/9/likes", cb_b);

        sub.cancel();
        sub.cancel();
        sub.cancel();

        registry.dispatch("/topic/post/9/likes", r#"{"likesCount":1}"#);
        assert_eq!(seen_a.borrow().len(), 0);
        assert_eq!(seen_b.borrow().len(), 1);
    }

    #[test]
    fn test_subscribe_while_offline_is_inert() {
        let registry = TopicRegistry::new();
        let (seen, cb) = recorder();

        let sub = registry.subscribe("/topic/post/3/likes", cb);
        assert_eq!(registry.listener_count("/topic/post/3/likes"), 0);

        // Even once the link comes back, the rejected registration must not
        // resurface.
        registry.set_online(true);
        registry.dispatch("/topic/post/3/likes", r#"{"likesCount":2}"#);
        assert_eq!(seen.borrow().len(), 0);

        // Cancelling the inert handle is a no-op
        sub.cancel();
    }

    #[test]
    fn test_malformed_body_skips_frame_only() {
        let registry = online_registry();
        let (seen_a, cb_a) = recorder();
        let (seen_b, cb_b) = recorder();

        let _a = registry.subscribe("/topic/post/1/likes", cb_a);
        let _b = registry.subscribe("/topic/post/2/likes", cb_b);

        registry.dispatch("/topic/post/1/likes", "not json{{");
        registry.dispatch("/topic/post/2/likes", r#"{"likesCount":4}"#);

        assert_eq!(seen_a.borrow().len(), 0);
        assert_eq!(seen_b.borrow().len(), 1);
    }

    #[test]
    fn test_cancel_during_dispatch_drops_in_flight_delivery() {
        let registry = online_registry();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let (seen_b, cb_b) = recorder();

        // Listener A cancels listener B while the same event is in flight
        let slot_for_a = Rc::clone(&slot);
        let _a = registry.subscribe("/topic/post/1/comments", move |_| {
            if let Some(sub) = slot_for_a.borrow_mut().take() {
                sub.cancel();
            }
        });
        let sub_b = registry.subscribe("/topic/post/1/comments", cb_b);
        *slot.borrow_mut() = Some(sub_b);

        registry.dispatch("/topic/post/1/comments", r#"{"action":"COMMENT_ADDED"}"#);
        assert_eq!(seen_b.borrow().len(), 0);
    }

    #[test]
    fn test_subscribe_during_dispatch_sees_next_event_only() {
        let registry = online_registry();
        let (seen_late, cb_late) = recorder();

        let registry_for_cb = Rc::clone(&registry);
        let late_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let cb_late = Rc::new(cb_late);
        let late_slot_for_cb = Rc::clone(&late_slot);
        let _a = registry.subscribe("/topic/post/8/comments", move |_| {
            if late_slot_for_cb.borrow().is_none() {
                let cb = Rc::clone(&cb_late);
                let sub = registry_for_cb
                    .subscribe("/topic/post/8/comments", move |payload| cb(payload));
                *late_slot_for_cb.borrow_mut() = Some(sub);
            }
        });

        registry.dispatch("/topic/post/8/comments", r#"{"action":"COMMENT_ADDED"}"#);
        assert_eq!(seen_late.borrow().len(), 0);

        registry.dispatch("/topic/post/8/comments", r#"{"action":"COMMENT_ADDED"}"#);
        assert_eq!(seen_late.borrow().len(), 1);
    }

    #[test]
    fn test_panicking_listener_does_not_starve_siblings() {
        let registry = online_registry();
        let (seen, cb) = recorder();

        let _bad = registry.subscribe("/topic/post/6/likes", |_| {
            panic!("listener bug");
        });
        let _good = registry.subscribe("/topic/post/6/likes", cb);

        registry.dispatch("/topic/post/6/likes", r#"{"likesCount":10}"#);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_topic_interest_announced_upstream() {
        let registry = online_registry();
        let frames: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let frames_sink = Rc::clone(&frames);
        registry.set_announcer(Some(Box::new(move |frame| {
            frames_sink
                .borrow_mut()
                .push(serde_json::to_string(frame).unwrap());
        })));

        let sub_a = registry.subscribe("/topic/post/1/likes", |_| {});
        let sub_b = registry.subscribe("/topic/post/1/likes", |_| {});
        // Only the first listener announces the topic
        assert_eq!(
            *frames.borrow(),
            vec![r#"{"type":"subscribe","topic":"/topic/post/1/likes"}"#.to_string()]
        );

        sub_a.cancel();
        assert_eq!(frames.borrow().len(), 1);

        // Removing the last listener withdraws the topic
        sub_b.cancel();
        assert_eq!(
            frames.borrow().last().unwrap(),
            r#"{"type":"unsubscribe","topic":"/topic/post/1/likes"}"#
        );
    }

    #[test]
    fn test_clear_invalidates_outstanding_handles() {
        let registry = online_registry();
        let (seen, cb) = recorder();

        let sub = registry.subscribe("/topic/post/2/comments", cb);
        registry.clear();
        registry.set_online(false);

        assert_eq!(registry.listener_count("/topic/post/2/comments"), 0);
        registry.dispatch("/topic/post/2/comments", r#"{"action":"COMMENT_ADDED"}"#);
        assert_eq!(seen.borrow().len(), 0);

        // Stale guard from the dead session stays a safe no-op
        sub.cancel();
    }

    #[test]
    fn test_drop_releases_registration() {
        let registry = online_registry();
        {
            let _sub = registry.subscribe("/topic/post/4/likes", |_| {});
            assert_eq!(registry.listener_count("/topic/post/4/likes"), 1);
        }
        assert_eq!(registry.listener_count("/topic/post/4/likes"), 0);
    }
}
