use serde_json::json;

use crate::field::{FieldRule, FieldSpec};
use crate::record::IdStrategy;
use crate::resource::ResourceDef;

pub const LANGUAGES: &[&str] = &[
    "English", "Arabic", "Spanish", "French", "Hindi", "Chinese", "Japanese", "Korean", "Other",
];

/// Movies list five per page unless the request says otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

pub fn spec() -> FieldSpec {
    FieldSpec::new()
        .field("name", FieldRule::string().required().unique().trim())
        .field("language", FieldRule::string().required().one_of(LANGUAGES))
        .field("description", FieldRule::string().required())
        .field("duration", FieldRule::number().required())
        .field("ratings", FieldRule::number().default_value(json!(1.0)))
        .field("totalRatings", FieldRule::number())
        .field("releaseYear", FieldRule::number().required())
        .field("releaseDate", FieldRule::timestamp())
        .field("createdAt", FieldRule::timestamp().default_now())
        .field("genres", FieldRule::string_array().required())
        .field("directors", FieldRule::string_array().required())
        .field("coverImage", FieldRule::string().required())
        .field("trailerUrl", FieldRule::string())
        .field("actors", FieldRule::string_array().required())
        .field("price", FieldRule::number().required())
        .field("isAvailable", FieldRule::boolean().default_value(json!(true)))
}

pub fn definition() -> ResourceDef {
    ResourceDef::new("movies", "movie", IdStrategy::Uuid, spec()).paginated_by_default(DEFAULT_PAGE_SIZE)
}
