//! Identity cleaning
//!
//! Drops every message from blacklisted identities and from bots. The
//! blacklist stores salted SHA-256 digests rather than the identities
//! themselves, so the table can be shipped without revealing who is on it.
//! Interactive bots answer commands, so the command message before each bot
//! reply goes too.

use base64::Engine as _;
use sha2::Digest;
use sha2::Sha256;
use tracing::debug;
use tracing::info;

use crate::models::AliasRegistry;
use crate::models::Message;

const SALT_PREFIX: &str = "🐕";
const SALT_SUFFIX: &str = "🐶";

/// Digests of identities that are always dropped
pub const BLACKLIST: &[&str] = &["k9URW8fQMo2wan1I7CmyAxX9RBISFj3xoNtcbLvQk5M="];

/// base64(SHA-256(salt prefix + id + salt suffix))
pub fn salted_digest(id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(SALT_PREFIX.as_bytes());
    hasher.update(id.as_bytes());
    hasher.update(SALT_SUFFIX.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(hasher.finalize())
}

/// Who to drop during cleaning
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Bots that reply to a command; the message before each reply is dropped too
    pub interactive_bots: Vec<String>,
    /// Bots that post on their own
    pub non_interactive_bots: Vec<String>,
    /// Digests checked in addition to [`BLACKLIST`]
    pub extra_blacklist: Vec<String>,
}

impl CleanOptions {
    fn is_blacklisted(&self, id: &str) -> bool {
        let digest = salted_digest(id);
        BLACKLIST.contains(&digest.as_str()) || self.extra_blacklist.iter().any(|d| *d == digest)
    }
}

/// Remove every message from `target`.
///
/// With `remove_parent`, each removed message also takes out the closest
/// earlier message not already removed. Bots are sometimes slow, so several
/// replies can pile up behind one command; a reply with nothing left before
/// it removes no parent.
pub fn remove_id(messages: Vec<Message>, target: &str, remove_parent: bool) -> Vec<Message> {
    let mut removed = vec![false; messages.len()];

    for (i, message) in messages.iter().enumerate() {
        if message.id != target {
            continue;
        }
        removed[i] = true;
        if remove_parent {
            if let Some(parent) = (0..i).rev().find(|&j| !removed[j]) {
                removed[parent] = true;
            }
        }
    }

    messages
        .into_iter()
        .zip(removed)
        .filter_map(|(message, removed)| (!removed).then_some(message))
        .collect()
}

/// Drop blacklisted identities, then interactive bots, then other bots.
///
/// Every dropped identity is also removed from `aliases`, so later steps see
/// the earlier removals.
pub fn clean(
    messages: Vec<Message>,
    aliases: &mut AliasRegistry,
    options: &CleanOptions,
) -> Vec<Message> {
    let before = messages.len();
    let mut messages = messages;

    let blacklisted: Vec<String> = aliases
        .ids()
        .filter(|id| options.is_blacklisted(id))
        .cloned()
        .collect();
    for id in &blacklisted {
        messages = remove_id(messages, id, false);
        aliases.remove(id);
    }

    for id in options.interactive_bots.iter().filter(|id| !id.is_empty()) {
        debug!("Removing interactive bot {} and its commands", id);
        messages = remove_id(messages, id, true);
        aliases.remove(id);
    }

    for id in options.non_interactive_bots.iter().filter(|id| !id.is_empty()) {
        debug!("Removing bot {}", id);
        messages = remove_id(messages, id, false);
        aliases.remove(id);
    }

    info!(
        "Cleaning removed {} messages ({} blacklisted identities)",
        before - messages.len(),
        blacklisted.len()
    );

    messages
}
