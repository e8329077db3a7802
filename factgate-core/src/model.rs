//! Typed records exchanged with the upstream provider and the clients
//! of the `/me` endpoint.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single fact fetched from the upstream provider.
///
/// Immutable once constructed; the cache replaces a `Fact` wholesale,
/// it never mutates one in place. On the wire the text field is named
/// `fact`, matching the upstream JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(rename = "fact")]
    pub text: String,
    pub length: u64,
}

/// The static profile rendered into every successful response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub stack: String,
}

/// Response envelope for `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEnvelope {
    pub status: String,
    pub user: User,
    pub timestamp: String,
    pub fact: String,
}

impl ProfileEnvelope {
    /// Build a success envelope stamped with the current UTC time (RFC 3339).
    pub fn success(user: User, fact: &Fact) -> Self {
        Self {
            status: "success".to_string(),
            user,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            fact: fact.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_decodes_upstream_shape() {
        let body = r#"{"fact":"Cats sleep 70% of their lives.","length":30}"#;
        let fact: Fact = serde_json::from_str(body).unwrap();
        assert_eq!(fact.text, "Cats sleep 70% of their lives.");
        assert_eq!(fact.length, 30);
    }

    #[test]
    fn test_fact_rejects_wrong_shape() {
        let body = r#"{"quote":"nope"}"#;
        assert!(serde_json::from_str::<Fact>(body).is_err());
    }

    #[test]
    fn test_envelope_carries_fact_text() {
        let user = User {
            name: "Tobi Ade".to_string(),
            email: "tobi@example.com".to_string(),
            stack: "rust".to_string(),
        };
        let fact = Fact { text: "hello".to_string(), length: 5 };
        let envelope = ProfileEnvelope::success(user, &fact);

        assert_eq!(envelope.status, "success");
        assert_eq!(envelope.fact, "hello");
        // RFC 3339 with a trailing Z for UTC
        assert!(envelope.timestamp.ends_with('Z'));
    }
}
