//! Chat export parsing
//!
//! An export is a sequence of header lines, each followed by the lines of
//! the message body:
//!
//! ```text
//! 2023-05-01 9:03:21 Bob(123456)
//! 早上好 everyone
//! 2023-05-01 9:04:02 Alice<alice@example.com>
//! @Bob morning
//! ```
//!
//! Headers open a new [`Message`] and record the display name in the
//! [`AliasRegistry`]; body lines are tokenized onto the open message.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::debug;
use tracing::warn;

use crate::models::AliasRegistry;
use crate::models::Header;
use crate::models::Message;
use crate::models::ParseStats;
use crate::tokenizer::tokenize_with;
use crate::tokenizer::StopWords;
use crate::ChatLensError;
use crate::Result;

const HEADER_PATTERN: &str = r"^(?P<time>[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{1,2}:[0-9]{2}:[0-9]{2}) (?P<name>.*)(?:\((?P<number>[0-9]+)\)|<(?P<email>[^<>]+)>)$";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static HEADER_RE: OnceLock<Regex> = OnceLock::new();

/// What to do with a header whose timestamp is not a real date-time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampPolicy {
    /// Drop the header and its body lines, keep going
    #[default]
    Reject,
    /// Abort the whole parse
    Fail,
}

impl TimestampPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            TimestampPolicy::Fail
        } else {
            TimestampPolicy::Reject
        }
    }
}

/// Messages and aliases assembled from one export
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub messages: Vec<Message>,
    pub aliases: AliasRegistry,
    pub stats: ParseStats,
}

/// Match a header line.
///
/// The id is the parenthesized account number when present, otherwise the
/// angle-bracketed email. Anything else on the line makes it body text.
pub fn parse_header(line: &str) -> Option<Header> {
    let re = HEADER_RE.get_or_init(|| Regex::new(HEADER_PATTERN).expect("static regex is valid"));
    let captures = re.captures(line)?;

    let id = captures
        .name("number")
        .or_else(|| captures.name("email"))?
        .as_str()
        .to_string();

    Some(Header {
        time: captures["time"].to_string(),
        name: captures["name"].to_string(),
        id,
    })
}

/// Convert header time text to epoch seconds.
///
/// Exports carry no zone, so the wall-clock time is read as UTC; only
/// differences between timestamps are used downstream.
pub fn parse_timestamp(time: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(time, TIME_FORMAT)
        .ok()
        .map(|datetime| datetime.and_utc().timestamp())
}

/// Parse an export, rejecting headers with impossible timestamps
pub fn parse(text: &str) -> Result<Transcript> {
    parse_with(text, TimestampPolicy::default())
}

/// Parse an export in one pass.
///
/// Body lines are tokenized against the aliases seen so far, so a mention of
/// someone who has not spoken yet is not stripped.
pub fn parse_with(text: &str, policy: TimestampPolicy) -> Result<Transcript> {
    let mut transcript = Transcript::default();
    let mut stop_words = StopWords::from_registry(&transcript.aliases);
    let mut open = false;

    for (index, raw) in text.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        transcript.stats.lines += 1;

        if let Some(header) = parse_header(line) {
            match parse_timestamp(&header.time) {
                Some(time) => {
                    transcript.messages.push(Message::new(time, header.id.as_str()));
                    if transcript.aliases.record(&header.id, &header.name) {
                        stop_words = StopWords::from_registry(&transcript.aliases);
                    }
                    open = true;
                }
                None => {
                    if policy == TimestampPolicy::Fail {
                        return Err(ChatLensError::InvalidTimestamp {
                            line: index + 1,
                            value: header.time,
                        });
                    }
                    warn!(
                        "Rejecting header on line {}: invalid timestamp {:?}",
                        index + 1,
                        header.time
                    );
                    transcript.stats.rejected_headers += 1;
                    open = false;
                }
            }
            continue;
        }

        match transcript.messages.last_mut() {
            Some(message) if open => message.tokens.extend(tokenize_with(line, &stop_words)),
            _ => transcript.stats.discarded_lines += 1,
        }
    }

    transcript.stats.messages = transcript.messages.len();
    debug!(
        "Parsed {} lines into {} messages from {} identities ({} rejected headers)",
        transcript.stats.lines,
        transcript.stats.messages,
        transcript.aliases.len(),
        transcript.stats.rejected_headers
    );

    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Token;

    fn values(message: &Message) -> Vec<&str> {
        message.tokens.iter().map(Token::value).collect()
    }

    // ====== Header Tests ======

    #[test]
    fn test_header_with_numeric_id() {
        let header = parse_header("2023-05-01 9:03:21 Bob(123456)").unwrap();
        assert_eq!(header.time, "2023-05-01 9:03:21");
        assert_eq!(header.name, "Bob");
        assert_eq!(header.id, "123456");
    }

    #[test]
    fn test_header_with_email() {
        let header = parse_header("2023-05-01 21:03:21 Alice<alice@example.com>").unwrap();
        assert_eq!(header.name, "Alice");
        assert_eq!(header.id, "alice@example.com");
    }

    #[test]
    fn test_header_name_may_contain_parentheses() {
        let header = parse_header("2023-05-01 9:03:21 Bob (work)(42)").unwrap();
        assert_eq!(header.name, "Bob (work)");
        assert_eq!(header.id, "42");
    }

    #[test]
    fn test_header_with_empty_name() {
        let header = parse_header("2023-05-01 9:03:21 (42)").unwrap();
        assert_eq!(header.name, "");
        assert_eq!(header.id, "42");
    }

    #[test]
    fn test_non_headers() {
        for line in [
            "",
            "hello world",
            "2023-05-01 9:03:21 Bob",
            "2023-05-01 9:03:21 Bob(123456) trailing",
            "2023-05-01 9:03:21 Bob(abc)",
            "2023-05-01 9:03:21 Bob<>",
            "2023-5-01 9:03:21 Bob(1)",
            "2023-05-01 123:03:21 Bob(1)",
            "  2023-05-01 9:03:21 Bob(1)",
        ] {
            assert!(parse_header(line).is_none(), "line {line:?}");
        }
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("1970-01-01 0:00:00"), Some(0));
        assert_eq!(parse_timestamp("1970-01-01 1:00:30"), Some(3630));
        assert_eq!(parse_timestamp("2023-05-01 09:03:21"), parse_timestamp("2023-05-01 9:03:21"));
        assert_eq!(parse_timestamp("2023-13-01 9:03:21"), None);
        assert_eq!(parse_timestamp("2023-02-30 9:03:21"), None);
        assert_eq!(parse_timestamp("2023-05-01 25:03:21"), None);
    }

    // ====== Assembly Tests ======

    #[test]
    fn test_parse_assembles_messages() {
        let text = "exported by someone\r\n\
                    2023-05-01 9:03:21 Bob(1)\r\n\
                    早上好 everyone\r\n\
                    second line\r\n\
                    2023-05-01 9:04:02 Alice<a@x.com>\r\n\
                    hi\r\n";

        let transcript = parse(text).unwrap();
        assert_eq!(transcript.messages.len(), 2);

        let bob = &transcript.messages[0];
        assert_eq!(bob.id, "1");
        assert_eq!(values(bob), vec!["早上", "上好", "everyone", "second", "line"]);

        let alice = &transcript.messages[1];
        assert_eq!(alice.id, "a@x.com");
        assert_eq!(alice.time - bob.time, 41);
        assert_eq!(values(alice), vec!["hi"]);

        assert_eq!(transcript.stats.messages, 2);
        assert_eq!(transcript.stats.discarded_lines, 1);
        assert_eq!(transcript.aliases.total_count("1"), 1);
    }

    #[test]
    fn test_aliases_accumulate() {
        let text = "2023-05-01 9:00:00 Bob(1)\n\
                    2023-05-01 9:00:01 Bobby(1)\n\
                    2023-05-01 9:00:02 Bob(1)\n";

        let transcript = parse(text).unwrap();
        let names = transcript.aliases.names("1").unwrap();
        assert_eq!(names[0].name, "Bob");
        assert_eq!(names[0].count, 2);
        assert_eq!(names[1].name, "Bobby");
        assert!(transcript.messages.iter().all(|m| m.tokens.is_empty()));
    }

    #[test]
    fn test_mentions_of_known_names_stripped() {
        let text = "2023-05-01 9:00:00 Ann(1)\n\
                    hello\n\
                    2023-05-01 9:00:05 Zed(2)\n\
                    @Ann hi @Zed\n";

        let transcript = parse(text).unwrap();
        assert_eq!(values(&transcript.messages[1]), vec!["hi"]);
    }

    #[test]
    fn test_mentions_of_later_speakers_kept() {
        let text = "2023-05-01 9:00:00 Ann(1)\n\
                    @Zed hi\n\
                    2023-05-01 9:00:05 Zed(2)\n";

        let transcript = parse(text).unwrap();
        assert_eq!(values(&transcript.messages[0]), vec!["zed", "hi"]);
    }

    #[test]
    fn test_rejected_header_drops_its_body() {
        let text = "2023-05-01 9:00:00 Ann(1)\n\
                    first\n\
                    2023-13-01 9:00:05 Zed(2)\n\
                    lost\n\
                    2023-05-01 9:00:10 Ann(1)\n\
                    last\n";

        let transcript = parse(text).unwrap();
        assert_eq!(transcript.messages.len(), 2);
        assert_eq!(values(&transcript.messages[0]), vec!["first"]);
        assert_eq!(values(&transcript.messages[1]), vec!["last"]);
        assert!(!transcript.aliases.contains("2"));
        assert_eq!(transcript.stats.rejected_headers, 1);
    }

    #[test]
    fn test_strict_policy_fails_on_bad_timestamp() {
        let text = "2023-05-01 9:00:00 Ann(1)\n2023-05-01 29:00:05 Zed(2)\n";

        let err = parse_with(text, TimestampPolicy::Fail).unwrap_err();
        match err {
            ChatLensError::InvalidTimestamp { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "2023-05-01 29:00:05");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let transcript = parse("").unwrap();
        assert!(transcript.messages.is_empty());
        assert!(transcript.aliases.is_empty());
    }
}
