use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_ROLE_HEADER: &str = "X-User-Role";

/// Identity of the caller as asserted by the auth gateway in front of this
/// service. Authentication itself is external; this core only scopes queries
/// by the supplied user id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let role = req
            .headers()
            .get(USER_ROLE_HEADER)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("student")
            .to_string();

        ready(match id {
            Some(id) => Ok(CurrentUser { id, role }),
            None => Err(AppError::Unauthorized(format!(
                "Missing {} header",
                USER_ID_HEADER
            ))),
        })
    }
}
