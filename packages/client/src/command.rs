//! Prompt command parsing.
//!
//! ```text
//! offer {"type":"offer","sdp":"..."}
//! answer @<socketId> {"type":"answer","sdp":"..."}
//! candidate {"candidate":"..."}
//! peer
//! quit
//! ```

use duet_server::infrastructure::dto::websocket::ClientEvent;
use serde_json::Value;
use thiserror::Error;

/// Negotiation message kinds that can be sent from the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::Candidate => "ice-candidate",
        }
    }

    /// Build the wire event addressed to `to`
    pub fn into_event(self, to: String, payload: Value) -> ClientEvent {
        match self {
            SignalKind::Offer => ClientEvent::Offer { to, offer: payload },
            SignalKind::Answer => ClientEvent::Answer {
                to,
                answer: payload,
            },
            SignalKind::Candidate => ClientEvent::IceCandidate {
                to,
                candidate: payload,
            },
        }
    }
}

/// A parsed prompt line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Signal {
        kind: SignalKind,
        target: Option<String>,
        payload: Value,
    },
    Peer,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}' (expected offer, answer, candidate, peer or quit)")]
    Unknown(String),

    #[error("Missing JSON payload for '{0}'")]
    MissingPayload(&'static str),

    #[error("Empty target after '@'")]
    EmptyTarget,

    #[error("Invalid JSON payload: {0}")]
    InvalidJson(String),
}

/// Parse one prompt line
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (line, ""),
    };

    let kind = match word {
        "offer" => SignalKind::Offer,
        "answer" => SignalKind::Answer,
        "candidate" => SignalKind::Candidate,
        "peer" => return Ok(Command::Peer),
        "quit" | "exit" => return Ok(Command::Quit),
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    let (target, payload) = match rest.strip_prefix('@') {
        Some(addressed) => {
            let (target, payload) = addressed
                .split_once(char::is_whitespace)
                .unwrap_or((addressed, ""));
            if target.is_empty() {
                return Err(CommandError::EmptyTarget);
            }
            (Some(target.to_string()), payload.trim())
        }
        None => (None, rest),
    };

    if payload.is_empty() {
        return Err(CommandError::MissingPayload(kind.as_str()));
    }
    let payload = serde_json::from_str::<Value>(payload)
        .map_err(|e| CommandError::InvalidJson(e.to_string()))?;

    Ok(Command::Signal {
        kind,
        target,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_offer_to_remembered_peer() {
        // テスト項目: 宛先なしの offer は target が None になる
        // given (前提条件):
        let line = r#"offer {"type":"offer","sdp":"v=0"}"#;

        // when (操作):
        let command = parse_command(line).unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            Command::Signal {
                kind: SignalKind::Offer,
                target: None,
                payload: json!({"type": "offer", "sdp": "v=0"}),
            }
        );
    }

    #[test]
    fn test_parse_candidate_with_explicit_target() {
        // テスト項目: @handle 付きのコマンドは指定した宛先へ送る
        // given (前提条件):
        let line = r#"candidate @h2   {"candidate":"c1"}"#;

        // when (操作):
        let command = parse_command(line).unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            Command::Signal {
                kind: SignalKind::Candidate,
                target: Some("h2".to_string()),
                payload: json!({"candidate": "c1"}),
            }
        );
    }

    #[test]
    fn test_parse_peer_and_quit() {
        // テスト項目: peer と quit はペイロードなしで受け付ける
        // given (前提条件):

        // when (操作):
        let peer = parse_command("peer").unwrap();
        let quit = parse_command("  quit ").unwrap();

        // then (期待する結果):
        assert_eq!(peer, Command::Peer);
        assert_eq!(quit, Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        // テスト項目: 不明なコマンド、ペイロード欠落、空の宛先、不正な JSON はエラーになる
        // given (前提条件):

        // when (操作):
        let unknown = parse_command("hello world");
        let missing = parse_command("answer");
        let missing_after_target = parse_command("answer @h2");
        let empty_target = parse_command("offer @ {}");
        let invalid = parse_command("offer {not json");

        // then (期待する結果):
        assert_eq!(unknown, Err(CommandError::Unknown("hello".to_string())));
        assert_eq!(missing, Err(CommandError::MissingPayload("answer")));
        assert_eq!(
            missing_after_target,
            Err(CommandError::MissingPayload("answer"))
        );
        assert_eq!(empty_target, Err(CommandError::EmptyTarget));
        assert!(matches!(invalid, Err(CommandError::InvalidJson(_))));
    }

    #[test]
    fn test_signal_kind_into_event() {
        // テスト項目: SignalKind から対応するワイヤイベントが組み立てられる
        // given (前提条件):
        let payload = json!({"candidate": "c1"});

        // when (操作):
        let event = SignalKind::Candidate.into_event("h2".to_string(), payload.clone());

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::IceCandidate {
                to: "h2".to_string(),
                candidate: payload,
            }
        );
    }
}
