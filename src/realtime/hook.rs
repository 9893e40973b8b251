//! Consumer Lifecycle Adapter
//!
//! `use_topic` is the only seam components touch: it acquires a topic
//! subscription when the owning scope is live and the connection is up,
//! re-acquires when the topic or connectivity changes, and always releases
//! on scope disposal. Components never hold a raw subscription handle.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;
use serde_json::Value;

use super::connection::{ConnectionState, SocketClient};
use super::registry::Subscription;

/// Provide the shared socket client to the component tree
pub fn provide_socket(client: SocketClient) {
    provide_context(client);
}

/// Access the shared socket client
pub fn use_socket() -> SocketClient {
    use_context::<SocketClient>().expect("SocketClient not found")
}

/// Subscribe `on_event` to the topic produced by `topic` for the lifetime of
/// the current reactive scope.
///
/// The subscription follows the connection: while disconnected nothing is
/// registered, and once connectivity flips to connected the effect re-runs
/// and acquires a fresh registration. Events arriving during the brief
/// re-subscription window are dropped; consumers treat events as refetch
/// hints, not as the source of truth.
pub fn use_topic(topic: impl Fn() -> String + 'static, on_event: impl Fn(&Value) + 'static) {
    let socket = use_socket();
    let on_event = Rc::new(on_event);
    let active: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let active_in_effect = Rc::clone(&active);
    create_effect(move |_| {
        let connected = socket.state().get() == ConnectionState::Connected;
        let topic = topic();

        // Release the previous registration before acquiring a new one
        active_in_effect.borrow_mut().take();

        if connected {
            let handler = Rc::clone(&on_event);
            let subscription = socket.subscribe(&topic, move |payload| handler(payload));
            *active_in_effect.borrow_mut() = Some(subscription);
        }
    });

    // Dropping the guard cancels the registration on every exit path
    on_cleanup(move || {
        active.borrow_mut().take();
    });
}
