//! User profile models.

use crate::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Dashboard colour scheme preference.
#[derive(
    Serialize, Deserialize, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, Default, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "theme", rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// The signed-in (or viewed) dashboard user.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// First and last name joined by a space, or the email when neither is set.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(first: Option<&str>, last: Option<&str>) -> UserProfile {
        UserProfile {
            id: UserId::from_u128(1),
            email: "registrar@example.com".into(),
            first_name: first.map(Into::into),
            last_name: last.map(Into::into),
            avatar: None,
            theme: Theme::Dark,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_joins_names() {
        assert_eq!(profile(Some("Ada"), Some("Lovelace")).display_name(), "Ada Lovelace");
        assert_eq!(profile(Some("Ada"), None).display_name(), "Ada");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(profile(None, Some("  ")).display_name(), "registrar@example.com");
    }

    #[test]
    fn test_profile_wire_shape() {
        let value = serde_json::to_value(profile(Some("Ada"), None)).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["lastName"], json!(null));
        assert_eq!(value["theme"], "dark");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_theme_defaults_to_light_when_missing() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "email": "x@example.com",
            "firstName": null,
            "lastName": null,
            "avatar": null,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(profile.theme, Theme::Light);
    }
}
