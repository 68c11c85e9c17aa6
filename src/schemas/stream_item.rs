use serde::{Deserialize, Serialize};

// One decoded item from a filtered stream. The feed sends a lot more
// fields than these; everything else is ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamItem {
    pub user: ItemAuthor,
    pub text: String,
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemAuthor {
    pub screen_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_a_minimal_item() {
        let raw = r#"{"user":{"screen_name":"alice"},"text":"hello","id":42}"#;
        let item: StreamItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.user.screen_name, "alice");
        assert_eq!(item.text, "hello");
        assert_eq!(item.id, 42);
        assert_eq!(item.created_at, None);
    }

    #[test]
    fn test_ignores_unknown_fields() {
        let raw = r#"{
            "user": {"screen_name": "bob", "followers_count": 9},
            "text": "hi",
            "id": 7,
            "created_at": "Wed Aug 27 13:08:45 +0000 2008",
            "retweet_count": 3
        }"#;
        let item: StreamItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.user.screen_name, "bob");
        assert_eq!(
            item.created_at.as_deref(),
            Some("Wed Aug 27 13:08:45 +0000 2008")
        );
    }

    #[test]
    fn test_rejects_an_item_without_an_author() {
        let raw = r#"{"text":"hi","id":7}"#;
        assert!(serde_json::from_str::<StreamItem>(raw).is_err());
    }
}
