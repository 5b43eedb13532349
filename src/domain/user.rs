use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, deserialize_with = "id_set")]
    pub followers: BTreeSet<String>,
    #[serde(default, deserialize_with = "id_set")]
    pub following: BTreeSet<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_followed_by(&self, user_id: &str) -> bool {
        self.followers.contains(user_id)
    }

    /// Up to two upper-cased initials, e.g. "Priya Verma" -> "PV".
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();

        if initials.is_empty() {
            "A".to_string()
        } else {
            initials
        }
    }
}

/// Either a bare id or a populated `{ "_id": ... }` document.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRef {
    Id(String),
    Doc {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl IdRef {
    fn into_id(self) -> String {
        match self {
            IdRef::Id(id) | IdRef::Doc { id } => id,
        }
    }
}

/// Deserialize a list of user references into a set of ids, accepting both
/// plain id strings and populated user objects.
pub(crate) fn id_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs = Option::<Vec<IdRef>>::deserialize(deserializer)?;
    Ok(refs
        .unwrap_or_default()
        .into_iter()
        .map(IdRef::into_id)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_followers_accept_ids_and_documents() {
        let json = r#"{
            "_id": "u1",
            "name": "Aarav Sharma",
            "username": "aarav-writes",
            "followers": ["u2", {"_id": "u3", "name": "Priya"}],
            "following": null
        }"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert!(user.is_followed_by("u2"));
        assert!(user.is_followed_by("u3"));
        assert!(user.following.is_empty());
        assert_eq!(user.email, "");
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_initials() {
        let json = r#"{"_id": "u1", "name": "priya verma", "username": "p"}"#;
        let mut user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.initials(), "PV");

        user.name = "Akshar Team Members".into();
        assert_eq!(user.initials(), "AT");

        user.name = "   ".into();
        assert_eq!(user.initials(), "A");
    }
}
