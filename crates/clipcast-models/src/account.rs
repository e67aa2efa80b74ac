//! Publishing account model.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The identity clips are published under.
///
/// Persisted verbatim while connected, cleared on disconnect. Everything here
/// is display data; there is no real credential material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct UserAccount {
    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Avatar reference (URL)
    pub avatar: String,

    /// Whether the account is linked and allowed to publish
    pub is_connected: bool,

    /// Channel name on the target platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,

    /// Display subscriber count (e.g. "12K")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribers: Option<String>,

    /// Channel handle, always carrying the leading `@`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// When the account was linked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_at: Option<DateTime<Utc>>,
}

impl UserAccount {
    /// The empty, disconnected account.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Build a connected account from a channel name and optional handle.
    ///
    /// Derives email and avatar from the channel name and normalizes the
    /// handle to carry a leading `@`; an absent handle falls back to a
    /// lowercased underscore form of the channel name.
    pub fn linked(
        channel_name: impl Into<String>,
        handle: Option<&str>,
        subscribers: impl Into<String>,
    ) -> Self {
        let channel_name = channel_name.into();
        let slug = channel_name.to_lowercase().replace(' ', ".");
        let handle = match handle.filter(|h| !h.is_empty()) {
            Some(h) if h.starts_with('@') => h.to_string(),
            Some(h) => format!("@{h}"),
            None => format!("@{}", channel_name.to_lowercase().replace(' ', "_")),
        };

        Self {
            name: channel_name.clone(),
            email: format!("{slug}@gmail.com"),
            avatar: format!(
                "https://ui-avatars.com/api/?name={}",
                channel_name.replace(' ', "+")
            ),
            is_connected: true,
            channel_name: Some(channel_name),
            subscribers: Some(subscribers.into()),
            handle: Some(handle),
            connected_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linked_derives_fields() {
        let account = UserAccount::linked("My Awesome Channel", Some("mychannel"), "14K");
        assert!(account.is_connected);
        assert_eq!(account.email, "my.awesome.channel@gmail.com");
        assert_eq!(account.handle.as_deref(), Some("@mychannel"));
        assert_eq!(account.subscribers.as_deref(), Some("14K"));
    }

    #[test]
    fn linked_keeps_existing_at_prefix_and_falls_back() {
        let account = UserAccount::linked("Tech Lab", Some("@techlab"), "3K");
        assert_eq!(account.handle.as_deref(), Some("@techlab"));

        let account = UserAccount::linked("Tech Lab", None, "3K");
        assert_eq!(account.handle.as_deref(), Some("@tech_lab"));
    }

    #[test]
    fn disconnected_is_empty() {
        let account = UserAccount::disconnected();
        assert!(!account.is_connected);
        assert!(account.channel_name.is_none());
    }
}
