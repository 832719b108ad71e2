//! # API crate: client side of the mood backend
//!
//! Everything the screens need to talk to the external mood service. The
//! backend owns detection, storage and history; this crate only moves data.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`BackendClient`]: the three HTTP endpoints (`/start-mood-detection`, `/mood-track`, `/mood-history`) over `reqwest` |
//! | [`realtime`] | [`RealtimeClient`]: Socket.IO v5 over an Engine.IO v4 WebSocket, used for `moodUpdate` / `requestScan` |
//! | [`error`] | [`ApiError`], shared by both |
//!
//! The realtime transport is the browser's `WebSocket` and only exists on
//! `wasm32`. Elsewhere the client keeps its protocol session but never opens a
//! connection, so UI code compiles and runs unchanged in host builds.

pub mod client;
pub mod error;
pub mod realtime;

pub use client::BackendClient;
pub use error::ApiError;
pub use realtime::{RealtimeClient, EVENT_MOOD_UPDATE, EVENT_REQUEST_SCAN};
