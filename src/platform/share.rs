//! Share surface backed by the terminal clipboard (OSC 52)

use std::io::{self, Write};

use base64::Engine;

use crate::error::{BrowserError, Result};

/// Accepts a plain text payload and presents it to the user's share target
pub trait ShareSheet: Send + Sync {
    fn share(&self, message: &str) -> Result<()>;
}

/// Places the message on the system clipboard through the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct ClipboardShare;

/// Build the OSC 52 "set clipboard" sequence for a payload
pub fn osc52_sequence(message: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(message);
    format!("\x1b]52;c;{}\x07", encoded)
}

impl ShareSheet for ClipboardShare {
    fn share(&self, message: &str) -> Result<()> {
        if message.is_empty() {
            return Err(BrowserError::Share("nothing to share".to_string()));
        }
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(osc52_sequence(message).as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| BrowserError::Share(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_payload_is_base64() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_empty_message_is_rejected() {
        let err = ClipboardShare.share("").unwrap_err();
        assert!(matches!(err, BrowserError::Share(_)));
    }
}
