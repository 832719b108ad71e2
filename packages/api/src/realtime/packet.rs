//! Engine.IO v4 and Socket.IO v5 text packets.
//!
//! An Engine.IO frame is a one-digit type followed by its payload. Socket.IO
//! packets ride inside Engine.IO `message` frames:
//!
//! ```text
//! 0{"sid":"..","pingInterval":25000,..}   engine open
//! 2 / 3                                   engine ping / pong
//! 40                                      socket connect, default namespace
//! 42["moodUpdate",{"mood":"happy"}]       socket event
//! ```
//!
//! Binary attachments are not used by the mood backend and are rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_NAMESPACE: &str = "/";

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ProtocolError {
    #[error("empty frame")]
    Empty,
    #[error("unknown engine packet type {0:?}")]
    UnknownEnginePacket(char),
    #[error("unknown socket packet type {0:?}")]
    UnknownSocketPacket(char),
    #[error("binary packets are not supported")]
    Binary,
    #[error("malformed packet: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::Malformed(err.to_string())
    }
}

/// Payload of the engine `open` packet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u64,
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        let mut chars = frame.chars();
        let kind = chars.next().ok_or(ProtocolError::Empty)?;
        let body = chars.as_str();
        Ok(match kind {
            '0' => EnginePacket::Open(serde_json::from_str(body)?),
            '1' => EnginePacket::Close,
            '2' => EnginePacket::Ping(body.to_string()),
            '3' => EnginePacket::Pong(body.to_string()),
            '4' => EnginePacket::Message(body.to_string()),
            '5' => EnginePacket::Upgrade,
            '6' => EnginePacket::Noop,
            'b' => return Err(ProtocolError::Binary),
            other => return Err(ProtocolError::UnknownEnginePacket(other)),
        })
    }

    pub fn encode(&self) -> String {
        match self {
            EnginePacket::Open(handshake) => {
                format!("0{}", serde_json::to_string(handshake).unwrap_or_default())
            }
            EnginePacket::Close => "1".to_string(),
            EnginePacket::Ping(body) => format!("2{body}"),
            EnginePacket::Pong(body) => format!("3{body}"),
            EnginePacket::Message(body) => format!("4{body}"),
            EnginePacket::Upgrade => "5".to_string(),
            EnginePacket::Noop => "6".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SocketPacket {
    Connect {
        namespace: String,
        data: Option<Value>,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        ack: Option<u64>,
        name: String,
        args: Vec<Value>,
    },
    Ack {
        namespace: String,
        ack: u64,
        args: Vec<Value>,
    },
    ConnectError {
        namespace: String,
        data: Option<Value>,
    },
}

impl SocketPacket {
    /// An event on the default namespace without acknowledgement.
    pub fn event(name: &str, args: Vec<Value>) -> Self {
        SocketPacket::Event {
            namespace: DEFAULT_NAMESPACE.to_string(),
            ack: None,
            name: name.to_string(),
            args,
        }
    }

    pub fn connect() -> Self {
        SocketPacket::Connect {
            namespace: DEFAULT_NAMESPACE.to_string(),
            data: None,
        }
    }

    /// Decode the body of an engine `message` frame.
    pub fn decode(body: &str) -> Result<Self, ProtocolError> {
        let mut chars = body.chars();
        let kind = chars.next().ok_or(ProtocolError::Empty)?;
        let mut rest = chars.as_str();

        if matches!(kind, '5' | '6') {
            return Err(ProtocolError::Binary);
        }

        let namespace = if rest.starts_with('/') {
            let end = rest.find(',').unwrap_or(rest.len());
            let namespace = rest[..end].to_string();
            rest = rest.get(end + 1..).unwrap_or("");
            namespace
        } else {
            DEFAULT_NAMESPACE.to_string()
        };

        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let ack = if digits > 0 {
            let id = rest[..digits]
                .parse()
                .map_err(|_| ProtocolError::Malformed(format!("ack id in {body:?}")))?;
            rest = &rest[digits..];
            Some(id)
        } else {
            None
        };

        let payload: Option<Value> = if rest.is_empty() {
            None
        } else {
            Some(serde_json::from_str(rest)?)
        };

        match kind {
            '0' => Ok(SocketPacket::Connect { namespace, data: payload }),
            '1' => Ok(SocketPacket::Disconnect { namespace }),
            '2' => {
                let mut args = match payload {
                    Some(Value::Array(items)) => items,
                    _ => return Err(ProtocolError::Malformed(format!("event without array: {body:?}"))),
                };
                if args.is_empty() {
                    return Err(ProtocolError::Malformed(format!("event without name: {body:?}")));
                }
                let name = match args.remove(0) {
                    Value::String(name) => name,
                    other => return Err(ProtocolError::Malformed(format!("event name {other}"))),
                };
                Ok(SocketPacket::Event { namespace, ack, name, args })
            }
            '3' => {
                let ack = ack.ok_or_else(|| ProtocolError::Malformed(format!("ack without id: {body:?}")))?;
                let args = match payload {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                };
                Ok(SocketPacket::Ack { namespace, ack, args })
            }
            '4' => Ok(SocketPacket::ConnectError { namespace, data: payload }),
            other => Err(ProtocolError::UnknownSocketPacket(other)),
        }
    }

    /// Encode as the body of an engine `message` frame.
    pub fn encode(&self) -> String {
        fn prefix(kind: char, namespace: &str) -> String {
            if namespace == DEFAULT_NAMESPACE {
                kind.to_string()
            } else {
                format!("{kind}{namespace},")
            }
        }

        match self {
            SocketPacket::Connect { namespace, data } => {
                let mut out = prefix('0', namespace);
                if let Some(data) = data {
                    out.push_str(&data.to_string());
                }
                out
            }
            SocketPacket::Disconnect { namespace } => prefix('1', namespace),
            SocketPacket::Event { namespace, ack, name, args } => {
                let mut out = prefix('2', namespace);
                if let Some(ack) = ack {
                    out.push_str(&ack.to_string());
                }
                let mut items = Vec::with_capacity(args.len() + 1);
                items.push(Value::String(name.clone()));
                items.extend(args.iter().cloned());
                out.push_str(&Value::Array(items).to_string());
                out
            }
            SocketPacket::Ack { namespace, ack, args } => {
                format!("{}{ack}{}", prefix('3', namespace), Value::Array(args.clone()))
            }
            SocketPacket::ConnectError { namespace, data } => {
                let mut out = prefix('4', namespace);
                if let Some(data) = data {
                    out.push_str(&data.to_string());
                }
                out
            }
        }
    }

    /// Wrap in an engine `message` frame ready for the socket.
    pub fn to_frame(&self) -> String {
        EnginePacket::Message(self.encode()).encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_open_handshake() {
        let frame = r#"0{"sid":"lv_VI97HAXpY6yYWAAAC","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;
        let EnginePacket::Open(handshake) = EnginePacket::decode(frame).unwrap() else {
            panic!("expected open");
        };
        assert_eq!(handshake.sid, "lv_VI97HAXpY6yYWAAAC");
        assert_eq!(handshake.ping_interval, 25000);
        assert_eq!(handshake.ping_timeout, 20000);
        assert_eq!(handshake.max_payload, Some(1_000_000));
    }

    #[test]
    fn test_engine_control_frames() {
        assert_eq!(EnginePacket::decode("2").unwrap(), EnginePacket::Ping(String::new()));
        assert_eq!(EnginePacket::decode("3probe").unwrap(), EnginePacket::Pong("probe".into()));
        assert_eq!(EnginePacket::decode("1").unwrap(), EnginePacket::Close);
        assert_eq!(EnginePacket::decode("6").unwrap(), EnginePacket::Noop);
        assert_eq!(EnginePacket::Pong(String::new()).encode(), "3");
        assert_eq!(EnginePacket::decode(""), Err(ProtocolError::Empty));
        assert_eq!(EnginePacket::decode("9"), Err(ProtocolError::UnknownEnginePacket('9')));
        assert_eq!(EnginePacket::decode("bAQID"), Err(ProtocolError::Binary));
    }

    #[test]
    fn test_decode_mood_event() {
        let EnginePacket::Message(body) =
            EnginePacket::decode(r#"42["moodUpdate",{"mood":"happy"}]"#).unwrap()
        else {
            panic!("expected message");
        };
        assert_eq!(
            SocketPacket::decode(&body).unwrap(),
            SocketPacket::Event {
                namespace: "/".into(),
                ack: None,
                name: "moodUpdate".into(),
                args: vec![json!({"mood": "happy"})],
            }
        );
    }

    #[test]
    fn test_decode_namespace_and_ack() {
        assert_eq!(
            SocketPacket::decode(r#"2/admin,13["ping"]"#).unwrap(),
            SocketPacket::Event {
                namespace: "/admin".into(),
                ack: Some(13),
                name: "ping".into(),
                args: vec![],
            }
        );
        assert_eq!(
            SocketPacket::decode(r#"0{"sid":"abc"}"#).unwrap(),
            SocketPacket::Connect {
                namespace: "/".into(),
                data: Some(json!({"sid": "abc"})),
            }
        );
        assert_eq!(
            SocketPacket::decode("1/admin,").unwrap(),
            SocketPacket::Disconnect { namespace: "/admin".into() }
        );
    }

    #[test]
    fn test_decode_rejects_bad_packets() {
        assert_eq!(SocketPacket::decode("51-[\"x\"]"), Err(ProtocolError::Binary));
        assert_eq!(SocketPacket::decode("9"), Err(ProtocolError::UnknownSocketPacket('9')));
        assert!(matches!(SocketPacket::decode("2[]"), Err(ProtocolError::Malformed(_))));
        assert!(matches!(SocketPacket::decode("2[1]"), Err(ProtocolError::Malformed(_))));
        assert!(matches!(SocketPacket::decode("2{"), Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn test_encode_client_frames() {
        assert_eq!(SocketPacket::connect().to_frame(), "40");
        assert_eq!(SocketPacket::event("requestScan", vec![]).to_frame(), r#"42["requestScan"]"#);
        assert_eq!(
            SocketPacket::event("note", vec![json!(1)]).encode(),
            r#"2["note",1]"#
        );
        let ack = SocketPacket::Ack { namespace: "/x".into(), ack: 4, args: vec![json!("ok")] };
        assert_eq!(ack.encode(), r#"3/x,4["ok"]"#);
        assert_eq!(SocketPacket::decode(&ack.encode()).unwrap(), ack);
    }
}
