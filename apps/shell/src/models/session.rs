use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account tier of a logged-in user. Determines navigation privileges:
/// only `Superadmin` may enter the admin view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Pro,
    Onetime,
}

/// The persisted record identifying the currently authenticated user.
///
/// Stored as JSON under a fixed key and trusted as-is when it parses:
/// `expires_at` is carried for the account tiers that have one but is not
/// checked against the clock anywhere in the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<u32>,
}

impl Session {
    pub fn is_superadmin(&self) -> bool {
        self.role == Role::Superadmin
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Role::Superadmin),
            "pro" => Ok(Role::Pro),
            "onetime" => Ok(Role::Onetime),
            other => Err(format!(
                "unknown role '{other}' (expected superadmin|pro|onetime)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session(role: Role) -> Session {
        Session {
            email: "user@example.com".to_string(),
            role,
            created_at: Utc::now(),
            expires_at: None,
            usage_count: None,
        }
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::Superadmin).unwrap(),
            "\"superadmin\""
        );
        assert_eq!(serde_json::to_string(&Role::Pro).unwrap(), "\"pro\"");
        assert_eq!(
            serde_json::to_string(&Role::Onetime).unwrap(),
            "\"onetime\""
        );
    }

    #[test]
    fn test_session_round_trip() {
        let session = make_session(Role::Pro);
        let raw = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.email, session.email);
        assert_eq!(back.role, Role::Pro);
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        // A record written for a superadmin carries neither expiry nor usage count.
        let raw = r#"{"email":"admin@example.com","role":"superadmin","created_at":"2024-01-01T00:00:00Z"}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert!(session.is_superadmin());
        assert!(session.expires_at.is_none());
        assert!(session.usage_count.is_none());
    }

    #[test]
    fn test_role_parses_from_str() {
        assert_eq!("pro".parse::<Role>().unwrap(), Role::Pro);
        assert_eq!("superadmin".parse::<Role>().unwrap(), Role::Superadmin);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let raw = r#"{"email":"x@example.com","role":"staff","created_at":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<Session>(raw).is_err());
    }
}
