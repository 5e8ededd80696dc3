use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub admin: bool,
    pub csrf: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}

/// The user behind a valid session cookie.
#[derive(Debug, Serialize, Clone)]
pub struct SessionUser {
    pub name: String,
    pub admin: bool,
    pub csrf_token: String,
}
