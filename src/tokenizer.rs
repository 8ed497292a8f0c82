//! Mixed Chinese/English tokenizer
//!
//! Message text is first scrubbed of placeholder markers and `@name`
//! mentions, then fed character by character through a three-state machine
//! that emits Han bigrams (sliding window of two characters) and lowercased
//! runs of ASCII letters. Everything else separates tokens.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::AliasRegistry;
use crate::models::Token;

/// Placeholders the chat client writes in place of pictures and stickers
pub const PLACEHOLDERS: [&str; 2] = ["[图片]", "[表情]"];

/// Appended to the input so a trailing token is flushed
const TERMINATOR: char = '\0';

static HAN: OnceLock<Regex> = OnceLock::new();

fn is_han(c: char) -> bool {
    let re = HAN.get_or_init(|| Regex::new(r"^\p{Han}$").expect("static regex is valid"));
    let mut buf = [0u8; 4];
    re.is_match(c.encode_utf8(&mut buf))
}

/// Character class driving the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Han,
    Latin,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_ascii_alphabetic() {
            CharClass::Latin
        } else if is_han(c) {
            CharClass::Han
        } else {
            CharClass::Other
        }
    }
}

/// Phrases removed from text before tokenizing, longest first
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: Vec<String>,
}

impl StopWords {
    /// Placeholders plus `@name` for every display name in the registry
    pub fn from_registry(aliases: &AliasRegistry) -> Self {
        let mut words: Vec<String> = PLACEHOLDERS.iter().map(|w| (*w).to_string()).collect();
        words.extend(aliases.all_names().map(|name| format!("@{name}")));

        // Some people use names that are prefixes of others, so longer
        // mentions have to go first.
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        words.dedup();

        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Replace every stop word occurrence with a single space
    pub fn strip(&self, text: &str) -> String {
        let mut text = text.to_string();
        for word in &self.words {
            if text.contains(word.as_str()) {
                text = text.replace(word.as_str(), " ");
            }
        }
        text
    }
}

/// Tokenizer state: nothing buffered, or an incomplete token
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    None,
    Bigram(String),
    Word(String),
}

impl State {
    /// Apply one character, pushing any finished token onto `out`
    fn step(self, c: char, out: &mut Vec<Token>) -> State {
        let class = CharClass::of(c);
        match self {
            State::None => match class {
                CharClass::Han => State::Bigram(c.to_string()),
                CharClass::Latin => State::Word(c.to_ascii_lowercase().to_string()),
                CharClass::Other => State::None,
            },
            State::Bigram(buffer) => {
                let next = match class {
                    CharClass::Han => {
                        let last = buffer.chars().last().map(String::from).unwrap_or_default();
                        State::Bigram(last + &c.to_string())
                    }
                    CharClass::Latin => State::Word(c.to_ascii_lowercase().to_string()),
                    CharClass::Other => State::None,
                };
                if buffer.chars().count() >= 2 {
                    out.push(Token::Bigram(buffer));
                }
                next
            }
            State::Word(mut buffer) => match class {
                CharClass::Latin => {
                    buffer.push(c.to_ascii_lowercase());
                    State::Word(buffer)
                }
                CharClass::Han => {
                    out.push(Token::English(buffer));
                    State::Bigram(c.to_string())
                }
                CharClass::Other => {
                    out.push(Token::English(buffer));
                    State::None
                }
            },
        }
    }
}

/// Run the state machine over already-scrubbed text
pub fn tokenize_clean(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut state = State::None;
    for c in text.chars().chain(std::iter::once(TERMINATOR)) {
        state = state.step(c, &mut tokens);
    }
    tokens
}

/// Strip stop words, then tokenize
pub fn tokenize_with(text: &str, stop_words: &StopWords) -> Vec<Token> {
    tokenize_clean(&stop_words.strip(text))
}

/// Tokenize `text`, treating mentions of any name in `aliases` as stop words
pub fn tokenize(text: &str, aliases: &AliasRegistry) -> Vec<Token> {
    tokenize_with(text, &StopWords::from_registry(aliases))
}
