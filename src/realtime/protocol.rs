//! Wire Protocol
//!
//! JSON frames exchanged with the realtime endpoint. Every event frame
//! carries its destination topic and a serialized payload body; the rest are
//! control frames for session setup and keep-alive.

/// Frames sent by the server
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    Connected {
        session_id: String,
    },
    Event {
        topic: String,
        /// Serialized JSON payload, decoded by the registry at dispatch time
        body: String,
    },
    Pong,
    Error {
        message: String,
    },
}

/// Frames sent by the client
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    Subscribe { topic: String },
    Unsubscribe { topic: String },
    Ping,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_frame_encoding() {
        let json = serde_json::to_string(&ClientFrame::Subscribe {
            topic: "/topic/post/42/likes".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"subscribe","topic":"/topic/post/42/likes"}"#
        );

        let json = serde_json::to_string(&ClientFrame::Ping).unwrap();
        assert_eq!(json, r#"{"type":"ping"}"#);
    }

    #[test]
    fn test_server_frame_decoding() {
        let frame: ServerFrame = serde_json::from_str(
            r#"{"type":"event","topic":"/topic/post/7/comments","body":"{\"action\":\"COMMENT_ADDED\"}"}"#,
        )
        .unwrap();
        match frame {
            ServerFrame::Event { topic, body } => {
                assert_eq!(topic, "/topic/post/7/comments");
                assert_eq!(body, r#"{"action":"COMMENT_ADDED"}"#);
            }
            other => panic!("unexpected frame: {:?}", other),
        }

        let frame: ServerFrame =
            serde_json::from_str(r#"{"type":"error","message":"bad destination"}"#).unwrap();
        assert!(matches!(frame, ServerFrame::Error { .. }));
    }

    #[test]
    fn test_unknown_frame_is_rejected() {
        let result = serde_json::from_str::<ServerFrame>(r#"{"type":"presence","users":3}"#);
        assert!(result.is_err());
    }
}
