use serde_json::json;

use crate::field::{FieldRule, FieldSpec};
use crate::record::IdStrategy;
use crate::resource::ResourceDef;

pub const STATUS_ACTIVE: &str = "Active";

pub fn spec() -> FieldSpec {
    FieldSpec::new()
        .field("title", FieldRule::string().required())
        .field("status", FieldRule::string().default_value(json!(STATUS_ACTIVE)))
}

pub fn definition() -> ResourceDef {
    ResourceDef::new("tasks", "task", IdStrategy::Sequential, spec())
}
