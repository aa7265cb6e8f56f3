use crate::field::{FieldRule, FieldSpec};
use crate::record::IdStrategy;
use crate::resource::ResourceDef;

pub fn spec() -> FieldSpec {
    FieldSpec::new()
        .field("title", FieldRule::string().required())
        .field("author", FieldRule::string().required())
        .field("year", FieldRule::integer().required())
}

pub fn definition() -> ResourceDef {
    ResourceDef::new("books", "book", IdStrategy::Sequential, spec())
}
