use contracts::shared::api::ApiError;
use contracts::system::account::{
    AccountResponse, ChangePasswordRequest, ChangeUsernameRequest, CHANGE_PASSWORD_PATH,
    CHANGE_USERNAME_PATH,
};
use contracts::system::auth::{LoginRequest, LoginResponse, LOGIN_PATH, LOGOUT_PATH};

use crate::shared::api_utils::{get_json, post_json};

/// Login with username and password; yields the name to display
pub async fn login(request: LoginRequest) -> Result<String, ApiError> {
    let typed = request.username.clone();
    post_json::<_, LoginResponse>(LOGIN_PATH, &request)
        .await?
        .into_result(&typed)
}

/// Ends the server session. The body is a redirect page, so only transport
/// failures are reported.
pub async fn logout() -> Result<(), ApiError> {
    match get_json::<serde_json::Value>(LOGOUT_PATH).await {
        Ok(_) | Err(ApiError::Decode(_)) => Ok(()),
        Err(e) => Err(e),
    }
}

pub async fn change_username(request: &ChangeUsernameRequest) -> Result<String, ApiError> {
    post_json::<_, AccountResponse>(CHANGE_USERNAME_PATH, request)
        .await?
        .into_result()
}

pub async fn change_password(request: &ChangePasswordRequest) -> Result<String, ApiError> {
    post_json::<_, AccountResponse>(CHANGE_PASSWORD_PATH, request)
        .await?
        .into_result()
}
