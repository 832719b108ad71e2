//! Realtime channel to the mood backend.
//!
//! [`RealtimeClient`] owns a [`Session`] and, in the browser, the WebSocket
//! that feeds it. WebSocket callbacks only touch the session; subscribers get
//! events through channels and drain them from their own tasks, so no UI
//! state is ever written from inside a JS callback.

pub mod packet;
pub mod session;

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::mpsc::UnboundedReceiver;
use serde_json::Value;

pub use session::{Session, SessionState};

use crate::error::ApiError;

/// Server → client: a detection pass finished. Payload `{ "mood": .. }`.
pub const EVENT_MOOD_UPDATE: &str = "moodUpdate";
/// Client → server: run one detection pass.
pub const EVENT_REQUEST_SCAN: &str = "requestScan";

/// Cheap-to-clone handle to one realtime connection.
#[derive(Clone)]
pub struct RealtimeClient {
    inner: Rc<Inner>,
}

struct Inner {
    url: String,
    session: RefCell<Session>,
    #[cfg(target_arch = "wasm32")]
    transport: RefCell<Option<browser::Transport>>,
}

impl PartialEq for RealtimeClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for RealtimeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeClient")
            .field("url", &self.inner.url)
            .field("state", self.inner.session.borrow().state())
            .finish()
    }
}

impl RealtimeClient {
    /// Open a connection to `url` (an Engine.IO WebSocket URL).
    pub fn connect(url: &str) -> Result<Self, ApiError> {
        let inner = Rc::new(Inner {
            url: url.to_string(),
            session: RefCell::new(Session::new()),
            #[cfg(target_arch = "wasm32")]
            transport: RefCell::new(None),
        });

        #[cfg(target_arch = "wasm32")]
        {
            let transport = browser::Transport::open(url, Rc::downgrade(&inner))?;
            *inner.transport.borrow_mut() = Some(transport);
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::warn!(url, "no realtime transport outside the browser; events will not arrive");
        }

        tracing::info!(url, "realtime channel opening");
        Ok(Self { inner })
    }

    pub fn is_connected(&self) -> bool {
        self.inner.session.borrow().is_connected()
    }

    /// Subscribe to `event`. A second subscription replaces the first, whose
    /// stream then ends.
    pub fn on(&self, event: &str) -> UnboundedReceiver<Value> {
        self.inner.session.borrow_mut().on(event)
    }

    /// Unsubscribe from `event`.
    pub fn off(&self, event: &str) {
        if self.inner.session.borrow_mut().off(event) {
            tracing::debug!(event, "realtime handler removed");
        }
    }

    /// Emit `event` without payload, queueing it until the namespace is up.
    pub fn emit(&self, event: &str) {
        let frame = self.inner.session.borrow_mut().emit(event, None);
        if let Some(frame) = frame {
            self.inner.send(&frame);
        }
    }

    /// Close the connection and drop every handler.
    pub fn close(&self) {
        let frame = self.inner.session.borrow_mut().close();
        if let Some(frame) = frame {
            self.inner.send(&frame);
        }
        #[cfg(target_arch = "wasm32")]
        {
            let transport = self.inner.transport.borrow_mut().take();
            if let Some(transport) = transport {
                transport.shutdown();
            }
        }
    }
}

impl Inner {
    /// Feed one incoming frame to the session and write back its replies.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    fn handle_frame(&self, frame: &str) {
        let replies = self.session.borrow_mut().receive(frame);
        match replies {
            Ok(replies) => {
                for reply in replies {
                    self.send(&reply);
                }
            }
            Err(e) => tracing::warn!("realtime frame rejected: {}", e),
        }
    }

    /// The socket closed or failed. Unless the client was closed on purpose,
    /// open a fresh socket after the session's backoff delay.
    #[cfg(target_arch = "wasm32")]
    fn transport_lost(self: &Rc<Self>) {
        let delay = self.session.borrow_mut().transport_lost();
        let Some(delay) = delay else {
            return;
        };
        tracing::warn!(url = %self.url, ?delay, "realtime socket lost; reconnecting");
        let weak = Rc::downgrade(self);
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.reconnect();
            }
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn reconnect(self: &Rc<Self>) {
        if !self.session.borrow_mut().reopening() {
            return;
        }
        let stale = self.transport.borrow_mut().take();
        if let Some(stale) = stale {
            stale.shutdown();
        }
        match browser::Transport::open(&self.url, Rc::downgrade(self)) {
            Ok(transport) => *self.transport.borrow_mut() = Some(transport),
            Err(e) => {
                tracing::error!("realtime reconnect failed: {}", e);
                self.transport_lost();
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn send(&self, frame: &str) {
        if let Some(transport) = self.transport.borrow().as_ref() {
            transport.send(frame);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn send(&self, frame: &str) {
        tracing::trace!(frame, "realtime frame dropped without transport");
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(transport) = self.transport.get_mut().take() {
            transport.shutdown();
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::rc::Weak;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

    use super::Inner;
    use crate::error::ApiError;

    /// A browser WebSocket plus the callbacks that must outlive it.
    pub(super) struct Transport {
        socket: WebSocket,
        _on_message: Closure<dyn FnMut(MessageEvent)>,
        _on_close: Closure<dyn FnMut(CloseEvent)>,
        _on_error: Closure<dyn FnMut(Event)>,
    }

    impl Transport {
        pub(super) fn open(url: &str, inner: Weak<Inner>) -> Result<Self, ApiError> {
            let socket = WebSocket::new(url).map_err(|e| ApiError::Socket(format!("{e:?}")))?;
            let close_handle = inner.clone();
            let error_handle = inner.clone();

            let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
                let Some(inner) = inner.upgrade() else {
                    return;
                };
                match event.data().as_string() {
                    Some(frame) => inner.handle_frame(&frame),
                    None => tracing::debug!("ignoring non-text realtime frame"),
                }
            });
            socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

            let on_close = Closure::<dyn FnMut(CloseEvent)>::new(move |event: CloseEvent| {
                tracing::info!(code = event.code(), reason = %event.reason(), "realtime socket closed");
                if let Some(inner) = close_handle.upgrade() {
                    inner.transport_lost();
                }
            });
            socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

            let on_error = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                tracing::error!("realtime socket error");
                if let Some(inner) = error_handle.upgrade() {
                    inner.transport_lost();
                }
            });
            socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));

            Ok(Self {
                socket,
                _on_message: on_message,
                _on_close: on_close,
                _on_error: on_error,
            })
        }

        pub(super) fn send(&self, frame: &str) {
            if let Err(e) = self.socket.send_with_str(frame) {
                tracing::error!("failed to send realtime frame: {:?}", e);
            }
        }

        /// Detach callbacks and close the socket.
        pub(super) fn shutdown(self) {
            self.socket.set_onmessage(None);
            self.socket.set_onclose(None);
            self.socket.set_onerror(None);
            if let Err(e) = self.socket.close() {
                tracing::warn!("failed to close realtime socket: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_client_queues_until_connected() {
        let client = RealtimeClient::connect("ws://localhost:5000/socket.io/?EIO=4&transport=websocket")
            .unwrap();
        client.emit(EVENT_REQUEST_SCAN);
        assert!(!client.is_connected());

        client.inner.handle_frame(r#"0{"sid":"a","pingInterval":1,"pingTimeout":1}"#);
        client.inner.handle_frame("40");
        assert!(client.is_connected());
        assert_eq!(client, client.clone());
    }

    #[tokio::test]
    async fn test_close_ends_subscriptions() {
        use futures::StreamExt;

        let client = RealtimeClient::connect("ws://localhost:5000/socket.io/?EIO=4&transport=websocket")
            .unwrap();
        let mut updates = client.on(EVENT_MOOD_UPDATE);
        client.close();
        assert_eq!(updates.next().await, None);
    }
}
