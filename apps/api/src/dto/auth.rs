use crudbase_application::AuthenticatedUser;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Login credentials, read from the query string or a JSON body.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/auth-login-request.ts"
)]
pub struct AuthLoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Authenticated user together with the issued bearer token.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/auth-login-response.ts"
)]
pub struct AuthLoginResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub active_token: String,
    pub active_token_expires: String,
}

impl From<AuthenticatedUser> for AuthLoginResponse {
    fn from(value: AuthenticatedUser) -> Self {
        Self {
            id: value.user.id().to_string(),
            name: value.user.name().as_str().to_owned(),
            email: value.user.email().as_str().to_owned(),
            created_at: value.user.created_at().to_rfc3339(),
            active_token: value.token,
            active_token_expires: value.expires_at.to_rfc3339(),
        }
    }
}
