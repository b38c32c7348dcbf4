//! Profile Resolver: the profile row of the signed-in user.

use axum::extract::State;
use axum::Json;
use portal_core::avatar::Avatar;
use portal_core::error::CoreError;
use portal_core::types::{DbId, Timestamp};
use portal_db::models::profile::Profile;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A profile as rendered by profile and dashboard views.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub id: DbId,
    pub full_name: Option<String>,
    pub email: String,
    pub member_since: Timestamp,
    pub avatar: Avatar,
}

impl From<Profile> for ProfileView {
    fn from(profile: Profile) -> Self {
        let avatar = Avatar::from_full_name(profile.full_name.as_deref());
        Self {
            id: profile.id,
            full_name: profile.full_name,
            email: profile.email,
            member_since: profile.created_at,
            avatar,
        }
    }
}

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ProfileView>>> {
    let profile = state
        .store
        .find_profile(auth.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Profile", auth.user_id))?;

    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}
