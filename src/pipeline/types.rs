//! Shared types for the mail pipeline.

use serde::{Deserialize, Serialize};

use crate::error::ItemError;

// ── Content ─────────────────────────────────────────────────────────

/// Declared contents of a package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Content {
    /// Free-text label ("gold", "weapons", ...).
    pub label: String,
    /// Declared monetary value.
    pub value: u64,
}

impl Content {
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

// ── Item ────────────────────────────────────────────────────────────

/// A unit of mail in flight: either a message or a package.
///
/// Stages never mutate an item in place. A stage that wants to change
/// what flows downstream builds a new `Item` and returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", try_from = "RawItem")]
pub enum Item {
    /// Letter with a free-text body.
    Message {
        sender: String,
        recipient: String,
        body: String,
    },
    /// Parcel wrapping declared contents.
    Package {
        sender: String,
        recipient: String,
        content: Content,
    },
}

impl Item {
    /// Build a message, rejecting empty identifiers.
    pub fn message(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, ItemError> {
        let (sender, recipient) = validate_parties(sender.into(), recipient.into())?;
        Ok(Self::Message {
            sender,
            recipient,
            body: body.into(),
        })
    }

    /// Build a package, rejecting empty identifiers.
    pub fn package(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        content: Content,
    ) -> Result<Self, ItemError> {
        let (sender, recipient) = validate_parties(sender.into(), recipient.into())?;
        Ok(Self::Package {
            sender,
            recipient,
            content,
        })
    }

    pub fn sender(&self) -> &str {
        match self {
            Self::Message { sender, .. } | Self::Package { sender, .. } => sender,
        }
    }

    pub fn recipient(&self) -> &str {
        match self {
            Self::Message { recipient, .. } | Self::Package { recipient, .. } => recipient,
        }
    }

    /// Package contents, if this is a package.
    pub fn content(&self) -> Option<&Content> {
        match self {
            Self::Package { content, .. } => Some(content),
            Self::Message { .. } => None,
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Message { .. } => "message",
            Self::Package { .. } => "package",
        }
    }
}

/// Wire shape of `Item`, validated on the way in.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawItem {
    Message {
        sender: String,
        recipient: String,
        body: String,
    },
    Package {
        sender: String,
        recipient: String,
        content: Content,
    },
}

impl TryFrom<RawItem> for Item {
    type Error = ItemError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        match raw {
            RawItem::Message {
                sender,
                recipient,
                body,
            } => Self::message(sender, recipient, body),
            RawItem::Package {
                sender,
                recipient,
                content,
            } => Self::package(sender, recipient, content),
        }
    }
}

fn validate_parties(sender: String, recipient: String) -> Result<(String, String), ItemError> {
    if sender.is_empty() {
        return Err(ItemError::EmptySender);
    }
    if recipient.is_empty() {
        return Err(ItemError::EmptyRecipient);
    }
    Ok((sender, recipient))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_equality_is_structural() {
        assert_eq!(Content::new("gold", 5), Content::new("gold", 5));
        assert_ne!(Content::new("gold", 5), Content::new("gold", 6));
        assert_ne!(Content::new("gold", 5), Content::new("silver", 5));
    }

    #[test]
    fn message_never_equals_package() {
        let msg = Item::message("alice", "bob", "hi").unwrap();
        let pkg = Item::package("alice", "bob", Content::new("hi", 0)).unwrap();
        assert_ne!(msg, pkg);
    }

    #[test]
    fn equality_covers_parties() {
        let a = Item::message("alice", "bob", "hi").unwrap();
        let b = Item::message("alice", "carol", "hi").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn rejects_empty_sender() {
        assert_eq!(
            Item::message("", "bob", "hi").unwrap_err(),
            ItemError::EmptySender
        );
    }

    #[test]
    fn rejects_empty_recipient() {
        assert_eq!(
            Item::package("alice", "", Content::new("gold", 1)).unwrap_err(),
            ItemError::EmptyRecipient
        );
    }

    #[test]
    fn accessors() {
        let pkg = Item::package("alice", "bob", Content::new("gold", 7)).unwrap();
        assert_eq!(pkg.sender(), "alice");
        assert_eq!(pkg.recipient(), "bob");
        assert_eq!(pkg.kind(), "package");
        assert_eq!(pkg.content(), Some(&Content::new("gold", 7)));

        let msg = Item::message("alice", "bob", "hi").unwrap();
        assert_eq!(msg.kind(), "message");
        assert!(msg.content().is_none());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let pkg = Item::package("alice", "bob", Content::new("gold", 7)).unwrap();
        let json = serde_json::to_value(&pkg).unwrap();
        assert_eq!(json["kind"], "package");
        assert_eq!(json["content"]["label"], "gold");
        assert_eq!(json["content"]["value"], 7);

        let msg = Item::message("alice", "bob", "hi").unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["kind"], "message");
        assert_eq!(json["body"], "hi");
    }

    #[test]
    fn deserializes_valid_items() {
        let json = r#"{"kind":"package","sender":"a","recipient":"b","content":{"label":"gold","value":3}}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item, Item::package("a", "b", Content::new("gold", 3)).unwrap());
    }

    #[test]
    fn deserialize_rejects_empty_parties() {
        let empty_sender = r#"{"kind":"message","sender":"","recipient":"b","body":"x"}"#;
        let err = serde_json::from_str::<Item>(empty_sender).unwrap_err();
        assert!(err.to_string().contains("Sender must not be empty"));

        let empty_recipient =
            r#"{"kind":"package","sender":"a","recipient":"","content":{"label":"gold","value":1}}"#;
        let err = serde_json::from_str::<Item>(empty_recipient).unwrap_err();
        assert!(err.to_string().contains("Recipient must not be empty"));
    }
}
