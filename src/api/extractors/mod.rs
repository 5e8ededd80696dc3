pub mod ajax_json;
pub mod auth;
pub mod maybe_auth;
