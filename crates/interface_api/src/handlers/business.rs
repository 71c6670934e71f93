//! Business handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::info;
use validator::Validate;

use domain_business::{BusinessSettings, SettingsList, SettingsPatch};

use crate::auth::{create_token, Claims};
use crate::dto::business::*;
use crate::error::ApiError;
use crate::handlers::tenant;
use crate::AppState;

/// Registers a business and issues its first token
pub async fn register_business(
    State(state): State<AppState>,
    Json(request): Json<RegisterBusinessRequest>,
) -> Result<(StatusCode, Json<RegisterBusinessResponse>), ApiError> {
    request.validate()?;

    let business = state.businesses.register(request.into()).await?;
    let token = create_token(
        business.id,
        &business.owner_email,
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(business_id = %business.id, "Issued registration token");
    Ok((
        StatusCode::CREATED,
        Json(RegisterBusinessResponse {
            business: business.into(),
            token,
        }),
    ))
}

/// Gets the calling business
pub async fn get_business(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<BusinessResponse>, ApiError> {
    let business = state.businesses.get(tenant(&claims)?).await?;
    Ok(Json(business.into()))
}

/// Updates commission rate and timezone
pub async fn update_settings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<BusinessSettings>, ApiError> {
    let patch = SettingsPatch::try_from(request)?;
    let settings = state.businesses.update_settings(tenant(&claims)?, patch).await?;
    Ok(Json(settings))
}

/// Adds a name to one of the settings lists
pub async fn add_settings_entry(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(list): Path<String>,
    Json(request): Json<SettingsEntryRequest>,
) -> Result<Json<BusinessSettings>, ApiError> {
    request.validate()?;
    let list: SettingsList = list.parse()?;

    let settings = state
        .businesses
        .add_entry(tenant(&claims)?, list, &request.name)
        .await?;
    Ok(Json(settings))
}

/// Removes a name from one of the settings lists
pub async fn remove_settings_entry(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((list, name)): Path<(String, String)>,
) -> Result<Json<BusinessSettings>, ApiError> {
    let list: SettingsList = list.parse()?;

    let settings = state
        .businesses
        .remove_entry(tenant(&claims)?, list, &name)
        .await?;
    Ok(Json(settings))
}
