//! Wire frame types for the relay's plain-text protocol.
//!
//! The protocol is deliberately unstructured: one text frame per
//! message, no JSON envelope, no binary frames. The rendered strings
//! below are the wire contract and must stay byte-for-byte stable for
//! compatibility with existing clients.

use std::fmt;

/// A parsed inbound frame: `recipientId:content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inbound<'a> {
    /// Identifier the frame is addressed to.
    pub recipient: &'a str,
    /// Message body. May itself contain `:` characters; only the first
    /// separator is significant.
    pub content: &'a str,
}

impl<'a> Inbound<'a> {
    /// Splits a payload on the first `:` into recipient and content.
    ///
    /// Returns `None` when the payload has no separator at all.
    pub fn parse(payload: &'a str) -> Option<Self> {
        payload
            .split_once(':')
            .map(|(recipient, content)| Self { recipient, content })
    }
}

/// Server → client frames, one of three literal shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound<'a> {
    /// A delivered direct message.
    Delivery { sender: &'a str, content: &'a str },
    /// The addressed recipient is absent or its connection has closed.
    Offline { recipient: &'a str },
    /// The sender's frame had no `recipientId:` separator.
    InvalidFormat,
}

impl fmt::Display for Outbound<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivery { sender, content } => write!(f, "From {sender}: {content}"),
            Self::Offline { recipient } => write!(f, "User {recipient} is offline"),
            Self::InvalidFormat => write!(f, "Invalid format. Use receiverId:message"),
        }
    }
}
