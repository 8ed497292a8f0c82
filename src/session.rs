//! Session detection
//!
//! A session is a run of messages with no silence longer than the gap limit.

use serde::Serialize;

use crate::models::Message;

/// Split time-ordered messages into sessions.
///
/// A new session starts whenever more than `gap_secs` passed since the
/// previous message. Every message lands in exactly one session, in order.
pub fn detect_sessions(messages: &[Message], gap_secs: i64) -> Vec<&[Message]> {
    let mut sessions = Vec::new();
    let mut start = 0;
    let mut last_time: Option<i64> = None;

    for (i, message) in messages.iter().enumerate() {
        if let Some(last) = last_time {
            if message.time - last > gap_secs {
                sessions.push(&messages[start..i]);
                start = i;
            }
        }
        last_time = Some(message.time);
    }

    if start < messages.len() {
        sessions.push(&messages[start..]);
    }

    sessions
}

/// Count and mean length of the sessions at one gap limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    pub gap_secs: i64,
    pub sessions: usize,
    pub mean_length: f64,
}

pub fn summarize(messages: &[Message], gap_secs: i64) -> SessionSummary {
    let sessions = detect_sessions(messages, gap_secs);
    let mean_length = if sessions.is_empty() {
        0.0
    } else {
        messages.len() as f64 / sessions.len() as f64
    };

    SessionSummary {
        gap_secs,
        sessions: sessions.len(),
        mean_length,
    }
}
