//! # protocol: the delimiter format shared by request and response
//!
//! Both the combined sources sent to the service and the translations it
//! returns are a single text stream. Every file starts with a line made of
//! [`SEPARATOR`] followed by the file's identifier (its path relative to the
//! source root, `/`-separated, extension stripped). Everything up to the next
//! delimiter line, or the end of the stream, is that file's content.

use std::collections::BTreeMap;
use tracing::debug;

/// Literal prefix of every delimiter line.
pub const SEPARATOR: &str = "// SequalsKclient: NEW FILE: ";

/// Translated files keyed by identifier. Never contains an empty value.
pub type TranslationResult = BTreeMap<String, String>;

/// Appends one file block to `blob`.
pub fn push_block(blob: &mut String, identifier: &str, content: &str) {
    blob.push_str(SEPARATOR);
    blob.push_str(identifier);
    blob.push('\n');
    blob.push_str(content);
    blob.push('\n');
}

/// Returns the identifier if `line` is a delimiter line.
pub fn delimiter_identifier(line: &str) -> Option<&str> {
    line.strip_prefix(SEPARATOR)
}

enum SplitState {
    Idle,
    InBlock { identifier: String, text: String },
}

impl SplitState {
    fn flush_into(self, targets: &mut TranslationResult) {
        if let SplitState::InBlock { identifier, text } = self {
            if text.is_empty() {
                debug!(identifier = %identifier, "Dropping block with empty content");
            } else {
                targets.insert(identifier, text);
            }
        }
    }
}

/// Splits a delimited stream back into identifier → content.
///
/// Lines before the first delimiter are discarded and blocks whose content is
/// empty are dropped. Each content line is terminated with `\n`.
pub fn split_blocks(stream: &str) -> TranslationResult {
    let mut targets = TranslationResult::new();
    let mut state = SplitState::Idle;

    for line in stream.lines() {
        if let Some(identifier) = delimiter_identifier(line) {
            let next = SplitState::InBlock {
                identifier: identifier.to_string(),
                text: String::new(),
            };
            std::mem::replace(&mut state, next).flush_into(&mut targets);
        } else if let SplitState::InBlock { text, .. } = &mut state {
            text.push_str(line);
            text.push('\n');
        }
    }
    state.flush_into(&mut targets);

    targets
}
