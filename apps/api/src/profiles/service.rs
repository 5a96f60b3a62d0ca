use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user_profile::UserProfile;

/// Display name stored when the auth provider supplies none.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserProfile {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl NewUserProfile {
    pub fn display_name(&self) -> &str {
        non_blank(self.display_name.as_deref()).unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    pub fn email(&self) -> &str {
        non_blank(self.email.as_deref()).unwrap_or("")
    }

    pub fn photo_url(&self) -> Option<&str> {
        non_blank(self.photo_url.as_deref())
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl UserProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.email.is_none() && self.photo_url.is_none()
    }

    /// Blank is treated like absent, so a blank `photoUrl` leaves the stored one.
    pub fn photo_url(&self) -> Option<&str> {
        non_blank(self.photo_url.as_deref())
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.is_empty() {
            return Err(AppError::Validation(
                "update must set at least one of displayName, email, photoUrl".to_string(),
            ));
        }
        if matches!(self.display_name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(AppError::Validation("displayName cannot be empty".to_string()));
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Creates the profile for `user_id` unless one already exists, in which case
/// the existing record is returned unchanged.
pub async fn create_user_profile(
    pool: &PgPool,
    new_profile: &NewUserProfile,
) -> Result<UserProfile, AppError> {
    let user_id = non_blank(Some(new_profile.user_id.as_str()))
        .ok_or_else(|| AppError::Validation("userId cannot be empty".to_string()))?;

    let inserted = sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO user_profiles (id, user_id, display_name, email, photo_url)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(new_profile.display_name())
    .bind(new_profile.email())
    .bind(new_profile.photo_url())
    .fetch_optional(pool)
    .await?;

    if let Some(profile) = inserted {
        info!("Created user profile {} for user {}", profile.id, user_id);
        return Ok(profile);
    }

    get_user_profile(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {user_id} not found")))
}

pub async fn get_user_profile(pool: &PgPool, user_id: &str) -> Result<Option<UserProfile>, AppError> {
    Ok(
        sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn update_user_profile(
    pool: &PgPool,
    id: Uuid,
    update: &UserProfileUpdate,
) -> Result<UserProfile, AppError> {
    update.validate()?;

    let updated = sqlx::query_as::<_, UserProfile>(
        r#"
        UPDATE user_profiles
        SET display_name = COALESCE($2, display_name),
            email        = COALESCE($3, email),
            photo_url    = COALESCE($4, photo_url),
            updated_at   = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(update.display_name.as_deref().map(str::trim))
    .bind(update.email.as_deref().map(str::trim))
    .bind(update.photo_url())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;

    info!("Updated user profile {id}");
    Ok(updated)
}

pub async fn delete_user_profile(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM user_profiles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Profile {id} not found")));
    }

    info!("Deleted user profile {id}");
    Ok(())
}
