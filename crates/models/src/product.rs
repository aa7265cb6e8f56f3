use crate::field::{FieldRule, FieldSpec};
use crate::record::IdStrategy;
use crate::resource::ResourceDef;

pub fn spec() -> FieldSpec {
    FieldSpec::new()
        .field("productName", FieldRule::string().required())
        .field("price", FieldRule::number().required())
}

pub fn definition() -> ResourceDef {
    ResourceDef::new("products", "product", IdStrategy::Sequential, spec())
}
