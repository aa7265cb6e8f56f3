use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::field::{FieldRule, FieldSpec};
use crate::record::IdStrategy;
use crate::resource::ResourceDef;

pub const PASSWORD_FIELD: &str = "password";
pub const EMAIL_FIELD: &str = "email";
pub const FAV_MOVIES_FIELD: &str = "favMovies";
pub const DEFAULT_PHOTO: &str = "profile.png";
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn spec() -> FieldSpec {
    FieldSpec::new()
        .field("name", FieldRule::string().required())
        .field(EMAIL_FIELD, FieldRule::email().required().unique().trim())
        .field(PASSWORD_FIELD, FieldRule::string().required().min_length(MIN_PASSWORD_LEN))
        .field("photo", FieldRule::string().default_value(json!(DEFAULT_PHOTO)))
        .field(FAV_MOVIES_FIELD, FieldRule::string_array().default_value(json!([])))
}

pub fn definition() -> ResourceDef {
    ResourceDef::new("users", "user", IdStrategy::Uuid, spec()).hidden(&[PASSWORD_FIELD])
}

/// Body of `POST /users/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Body of `POST /users/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /users/add-fav`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavInput {
    #[serde(default)]
    pub movie_id: String,
}
