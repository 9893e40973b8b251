//! Transport Connection Manager
//!
//! Owns the single long-lived WebSocket to the realtime endpoint: connect,
//! fixed-delay reconnect, heartbeat keep-alive, and a reactive connection
//! state other layers observe. Only this module mutates connection state;
//! the registry just reads it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use leptos::*;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use super::protocol::{ClientFrame, ServerFrame};
use super::registry::{Subscription, TopicRegistry};

/// Delay between reconnect attempts
pub const DEFAULT_RECONNECT_DELAY_MS: u32 = 5_000;
/// Expected heartbeat cadence, both directions
pub const DEFAULT_HEARTBEAT_MS: u32 = 4_000;

/// Connectivity of the realtime channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

/// Socket endpoint and timing configuration
#[derive(Debug, Clone)]
pub struct SocketConfig {
    pub endpoint_url: String,
    pub reconnect_delay_ms: u32,
    /// Window in which the server is expected to send something
    pub heartbeat_in_ms: u32,
    /// Cadence of outbound pings
    pub heartbeat_out_ms: u32,
}

impl SocketConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
            heartbeat_in_ms: DEFAULT_HEARTBEAT_MS,
            heartbeat_out_ms: DEFAULT_HEARTBEAT_MS,
        }
    }

    /// Derive the realtime endpoint from the HTTP API base
    pub fn from_api_base(api_base: &str) -> Self {
        Self::new(socket_url(api_base))
    }
}

/// Convert an HTTP API base into the matching WebSocket URL
fn socket_url(api_base: &str) -> String {
    let base = api_base.trim_end_matches('/');
    let base = base
        .replace("http://", "ws://")
        .replace("https://", "wss://");
    format!("{}/ws", base)
}

/// Client handle for the process-wide realtime connection.
///
/// Cheap to clone; all clones share the same underlying connection. Created
/// once at the app root, provided through context, torn down by the root's
/// cleanup hook.
#[derive(Clone)]
pub struct SocketClient {
    inner: Rc<SocketInner>,
}

struct SocketInner {
    config: SocketConfig,
    state: RwSignal<ConnectionState>,
    registry: Rc<TopicRegistry>,
    ws: RefCell<Option<WebSocket>>,
    reconnect: RefCell<Option<Timeout>>,
    heartbeat: RefCell<Option<Interval>>,
    watchdog: RefCell<Option<Interval>>,
    last_inbound_ms: Cell<i64>,
    attempts: Cell<u32>,
    /// Set during a deliberate disconnect so the close handler does not
    /// schedule a reconnect
    closing: Cell<bool>,
}

impl SocketClient {
    pub fn new(config: SocketConfig) -> Self {
        Self {
            inner: Rc::new(SocketInner {
                config,
                state: create_rw_signal(ConnectionState::Disconnected),
                registry: TopicRegistry::new(),
                ws: RefCell::new(None),
                reconnect: RefCell::new(None),
                heartbeat: RefCell::new(None),
                watchdog: RefCell::new(None),
                last_inbound_ms: Cell::new(0),
                attempts: Cell::new(0),
                closing: Cell::new(false),
            }),
        }
    }

    /// Reactive connection state, for the registry gate and status displays
    pub fn state(&self) -> RwSignal<ConnectionState> {
        self.inner.state
    }

    pub fn is_connected(&self) -> bool {
        self.inner.state.get_untracked() == ConnectionState::Connected
    }

    pub fn config(&self) -> &SocketConfig {
        &self.inner.config
    }

    /// Register interest in a topic. Inert while disconnected; see
    /// [`TopicRegistry::subscribe`].
    pub fn subscribe(&self, topic: &str, callback: impl Fn(&Value) + 'static) -> Subscription {
        self.inner.registry.subscribe(topic, callback)
    }

    /// Establish the connection. Safe to call when already connecting or
    /// connected.
    pub fn connect(&self) {
        let inner = &self.inner;
        if matches!(
            inner.state.get_untracked(),
            ConnectionState::Connecting | ConnectionState::Connected
        ) {
            return;
        }

        inner.closing.set(false);
        inner.reconnect.borrow_mut().take();
        inner.state.set(ConnectionState::Connecting);

        match WebSocket::new(&inner.config.endpoint_url) {
            Ok(ws) => {
                self.install_handlers(&ws);
                *inner.ws.borrow_mut() = Some(ws);
            }
            Err(err) => {
                logging::error!("realtime: connection failed: {err:?}");
                inner.state.set(ConnectionState::Failed);
                self.schedule_reconnect();
            }
        }
    }

    /// Tear the connection down and cancel any pending reconnect. Safe to
    /// call repeatedly.
    pub fn disconnect(&self) {
        let inner = &self.inner;
        inner.closing.set(true);
        inner.reconnect.borrow_mut().take();

        let ws = inner.ws.borrow_mut().take();
        self.teardown_session();
        if let Some(ws) = ws {
            let _ = ws.close();
        }
        inner.state.set(ConnectionState::Disconnected);
    }

    /// Send one frame over the live socket
    pub fn send_frame(&self, frame: &ClientFrame) -> Result<(), String> {
        let ws_guard = self.inner.ws.borrow();
        let ws = ws_guard.as_ref().ok_or("socket not connected")?;

        let json = serde_json::to_string(frame).map_err(|e| e.to_string())?;
        ws.send_with_str(&json).map_err(|e| format!("{e:?}"))
    }

    /// Set up WebSocket event handlers
    fn install_handlers(&self, ws: &WebSocket) {
        // On open
        let client = self.clone();
        let on_open = Closure::wrap(Box::new(move |_: JsValue| {
            client.handle_open();
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        // On message
        let client = self.clone();
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Ok(text) = event.data().dyn_into::<js_sys::JsString>() {
                let text: String = text.into();
                client.handle_frame(&text);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        on_message.forget();

        // On close
        let client = self.clone();
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            logging::log!(
                "realtime: socket closed: code={}, reason={}",
                event.code(),
                event.reason()
            );
            client.handle_close();
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        // On error
        let on_error = Closure::wrap(Box::new(move |err: JsValue| {
            logging::error!("realtime: socket error: {err:?}");
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    }

    fn handle_open(&self) {
        let inner = &self.inner;
        logging::log!("realtime: connected to {}", inner.config.endpoint_url);
        inner.attempts.set(0);
        inner.last_inbound_ms.set(now_ms());

        // Wire the registry to the live socket so topic interest reaches the
        // server, then open the gate for registrations.
        if let Some(ws) = inner.ws.borrow().clone() {
            inner.registry.set_announcer(Some(Box::new(move |frame| {
                if let Ok(json) = serde_json::to_string(frame) {
                    let _ = ws.send_with_str(&json);
                }
            })));
        }
        inner.registry.set_online(true);
        inner.state.set(ConnectionState::Connected);

        let client = self.clone();
        *inner.heartbeat.borrow_mut() = Some(Interval::new(
            inner.config.heartbeat_out_ms,
            move || client.send_ping(),
        ));

        let client = self.clone();
        *inner.watchdog.borrow_mut() = Some(Interval::new(
            inner.config.heartbeat_in_ms,
            move || client.check_liveness(),
        ));
    }

    fn handle_frame(&self, text: &str) {
        self.inner.last_inbound_ms.set(now_ms());

        match serde_json::from_str::<ServerFrame>(text) {
            Ok(ServerFrame::Connected { session_id }) => {
                logging::log!("realtime: session established: {session_id}");
            }
            Ok(ServerFrame::Event { topic, body }) => {
                self.inner.registry.dispatch(&topic, &body);
            }
            Ok(ServerFrame::Pong) => {}
            Ok(ServerFrame::Error { message }) => {
                // The link may still be usable, report and carry on
                logging::error!("realtime: server error: {message}");
            }
            Err(err) => {
                logging::warn!("realtime: unreadable frame: {err}");
            }
        }
    }

    fn handle_close(&self) {
        self.teardown_session();
        self.inner.state.set(ConnectionState::Disconnected);
        if !self.inner.closing.get() {
            self.schedule_reconnect();
        }
    }

    fn teardown_session(&self) {
        let inner = &self.inner;
        inner.registry.set_online(false);
        inner.registry.set_announcer(None);
        inner.registry.clear();
        inner.heartbeat.borrow_mut().take();
        inner.watchdog.borrow_mut().take();
        inner.ws.borrow_mut().take();
    }

    /// Schedule the next reconnect attempt. Retries forever on the fixed
    /// delay; connectivity is surfaced through the state signal, never as an
    /// error to callers.
    fn schedule_reconnect(&self) {
        let inner = &self.inner;
        let attempt = inner.attempts.get() + 1;
        inner.attempts.set(attempt);
        logging::log!(
            "realtime: reconnect attempt {attempt} in {}ms",
            inner.config.reconnect_delay_ms
        );

        let client = self.clone();
        *inner.reconnect.borrow_mut() = Some(Timeout::new(
            inner.config.reconnect_delay_ms,
            move || client.connect(),
        ));
    }

    fn send_ping(&self) {
        if self.send_frame(&ClientFrame::Ping).is_err() {
            logging::warn!("realtime: heartbeat send failed, recycling connection");
            self.recycle();
        }
    }

    fn check_liveness(&self) {
        let idle = now_ms() - self.inner.last_inbound_ms.get();
        if idle > i64::from(self.inner.config.heartbeat_in_ms) * 2 {
            logging::warn!("realtime: no traffic for {idle}ms, recycling connection");
            self.recycle();
        }
    }

    /// Force-close a connection believed dead; the close handler drives the
    /// normal reconnect path.
    fn recycle(&self) {
        if let Some(ws) = self.inner.ws.borrow().as_ref() {
            let _ = ws.close();
        }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SocketConfig::new("ws://localhost:8080/api/ws");
        assert_eq!(config.reconnect_delay_ms, 5000);
        assert_eq!(config.heartbeat_in_ms, 4000);
        assert_eq!(config.heartbeat_out_ms, 4000);
    }

    #[test]
    fn test_socket_url_from_api_base() {
        assert_eq!(
            socket_url("http://localhost:8080/api"),
            "ws://localhost:8080/api/ws"
        );
        assert_eq!(
            socket_url("https://ripple.example.com/api/"),
            "wss://ripple.example.com/api/ws"
        );
    }
}
