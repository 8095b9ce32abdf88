//! Replies and their split into Telegram-sized messages.

/// Longest text Telegram accepts in one `sendMessage`, in UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// A reply ready to be sent to the originating chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Attach the shortcut reply keyboard.
    pub with_shortcuts: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            with_shortcuts: false,
        }
    }

    /// The reply text as one or more messages Telegram will accept.
    pub fn messages(&self) -> Vec<String> {
        split_message(&self.text, MAX_MESSAGE_LEN)
    }
}

fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Split `text` into chunks of at most `limit` UTF-16 code units.
///
/// Chunks break at line boundaries and the newline at a break is dropped, so
/// joining the chunks with `\n` gives the text back. A single line longer
/// than `limit` is cut between characters.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut has_line = false;

    for line in text.split('\n') {
        let line_len = utf16_len(line);

        if has_line && current_len + 1 + line_len > limit {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
            has_line = false;
        }

        if line_len > limit {
            for ch in line.chars() {
                let width = ch.len_utf16();
                if current_len + width > limit {
                    chunks.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(ch);
                current_len += width;
            }
            has_line = true;
            continue;
        }

        if has_line {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
        has_line = true;
    }

    chunks.push(current);
    chunks
}
