//! Transport-independent Socket.IO client session.
//!
//! [`Session`] consumes incoming text frames and produces the frames that must
//! be written back, so the whole protocol runs (and is tested) without a
//! socket. Handlers are channels: each subscribed event owns the sending half
//! of an unbounded channel whose receiver is handed to the caller.

use std::collections::HashMap;
use std::time::Duration;

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use serde_json::Value;

use super::packet::{EnginePacket, Handshake, ProtocolError, SocketPacket, DEFAULT_NAMESPACE};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    /// Waiting for the engine handshake.
    #[default]
    Opening,
    /// Engine open, namespace connect sent.
    Handshaken(Handshake),
    /// Namespace connected; emits go straight out.
    Connected,
    /// Transport dropped; a reconnect is pending and emits are queued.
    Disconnected,
    /// Closed by either side. Terminal.
    Closed,
}

/// First reconnect delay; doubles per failed attempt.
pub const RECONNECT_BASE: Duration = Duration::from_millis(1000);
/// Upper bound on the reconnect delay.
pub const RECONNECT_MAX: Duration = Duration::from_millis(5000);

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    queued: Vec<String>,
    handlers: HashMap<String, UnboundedSender<Value>>,
    /// Consecutive reconnect attempts since the last successful connect.
    attempts: u32,
    reconnect_pending: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == SessionState::Connected
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// The transport went away without a local `close`.
    ///
    /// Returns how long to wait before opening a new transport, or `None`
    /// when no reconnect should be scheduled: the session was closed on
    /// purpose, or a reconnect is already pending.
    pub fn transport_lost(&mut self) -> Option<Duration> {
        if self.is_closed() || self.reconnect_pending {
            return None;
        }
        self.state = SessionState::Disconnected;
        self.reconnect_pending = true;
        let delay = reconnect_delay(self.attempts);
        self.attempts = self.attempts.saturating_add(1);
        Some(delay)
    }

    /// A new transport is being opened for a pending reconnect; wait for its
    /// handshake. Returns `false` when nothing was pending.
    pub fn reopening(&mut self) -> bool {
        if self.is_closed() || !self.reconnect_pending {
            return false;
        }
        self.reconnect_pending = false;
        self.state = SessionState::Opening;
        true
    }

    /// Subscribe to `event`, replacing any previous handler for it.
    pub fn on(&mut self, event: &str) -> UnboundedReceiver<Value> {
        let (tx, rx) = unbounded();
        if self.handlers.insert(event.to_string(), tx).is_some() {
            tracing::debug!(event, "replaced realtime handler");
        }
        rx
    }

    /// Drop the handler for `event`. Its receiver then ends.
    pub fn off(&mut self, event: &str) -> bool {
        self.handlers.remove(event).is_some()
    }

    pub fn has_handler(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    /// Emit `event` with optional data. Returns the frame to send now, or
    /// `None` when it was queued until the namespace connects.
    pub fn emit(&mut self, event: &str, data: Option<Value>) -> Option<String> {
        let frame = SocketPacket::event(event, data.into_iter().collect()).to_frame();
        match self.state {
            SessionState::Connected => Some(frame),
            SessionState::Closed => {
                tracing::warn!(event, "emit on closed realtime channel dropped");
                None
            }
            _ => {
                self.queued.push(frame);
                None
            }
        }
    }

    /// Mark closed locally and return the frame announcing it, if any.
    pub fn close(&mut self) -> Option<String> {
        let was_open = matches!(self.state, SessionState::Connected | SessionState::Handshaken(_));
        self.state = SessionState::Closed;
        self.reconnect_pending = false;
        self.queued.clear();
        self.handlers.clear();
        was_open.then(|| EnginePacket::Close.encode())
    }

    /// Handle one incoming frame and return the frames to write back.
    pub fn receive(&mut self, frame: &str) -> Result<Vec<String>, ProtocolError> {
        match EnginePacket::decode(frame)? {
            EnginePacket::Open(handshake) => {
                tracing::debug!(sid = %handshake.sid, "realtime engine open");
                self.state = SessionState::Handshaken(handshake);
                Ok(vec![SocketPacket::connect().to_frame()])
            }
            EnginePacket::Ping(body) => Ok(vec![EnginePacket::Pong(body).encode()]),
            EnginePacket::Close => {
                // Server-side close; the socket's own close event schedules the reconnect.
                if self.state != SessionState::Closed {
                    self.state = SessionState::Disconnected;
                }
                Ok(Vec::new())
            }
            EnginePacket::Message(body) => self.receive_socket(SocketPacket::decode(&body)?),
            EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => Ok(Vec::new()),
        }
    }

    fn receive_socket(&mut self, packet: SocketPacket) -> Result<Vec<String>, ProtocolError> {
        match packet {
            SocketPacket::Connect { namespace, .. } if namespace == DEFAULT_NAMESPACE => {
                self.state = SessionState::Connected;
                self.attempts = 0;
                Ok(std::mem::take(&mut self.queued))
            }
            SocketPacket::Disconnect { namespace } if namespace == DEFAULT_NAMESPACE => {
                tracing::info!("realtime namespace disconnected by server");
                self.state = SessionState::Closed;
                Ok(Vec::new())
            }
            SocketPacket::ConnectError { data, .. } => Err(ProtocolError::Malformed(format!(
                "namespace connect refused: {}",
                data.unwrap_or(Value::Null)
            ))),
            SocketPacket::Event { namespace, name, mut args, .. } if namespace == DEFAULT_NAMESPACE => {
                self.dispatch(&name, if args.is_empty() { Value::Null } else { args.remove(0) });
                Ok(Vec::new())
            }
            other => {
                tracing::debug!(?other, "ignoring realtime packet");
                Ok(Vec::new())
            }
        }
    }

    fn dispatch(&mut self, event: &str, payload: Value) {
        let Some(sender) = self.handlers.get(event) else {
            tracing::debug!(event, "no handler for realtime event");
            return;
        };
        if sender.unbounded_send(payload).is_err() {
            // Receiver dropped without calling `off`.
            self.handlers.remove(event);
        }
    }
}

/// Exponential backoff: `RECONNECT_BASE * 2^attempt`, capped.
fn reconnect_delay(attempt: u32) -> Duration {
    RECONNECT_BASE
        .checked_mul(1u32.checked_shl(attempt).unwrap_or(u32::MAX))
        .map_or(RECONNECT_MAX, |delay| delay.min(RECONNECT_MAX))
}
