use crate::field::FieldSpec;
use crate::record::IdStrategy;
use crate::{book, movie, product, task, user};

/// Static description of one resource type.
#[derive(Clone, Debug)]
pub struct ResourceDef {
    /// Plural noun; route prefix, file name and list key (`movies`).
    pub name: &'static str,
    /// Singular noun; key of single-record payloads (`movie`).
    pub singular: &'static str,
    pub id_strategy: IdStrategy,
    pub spec: FieldSpec,
    /// Fields never rendered to clients.
    pub hidden_fields: &'static [&'static str],
    /// Page size applied to list requests that carry no pagination.
    pub default_page_size: Option<u32>,
}

impl ResourceDef {
    pub fn new(name: &'static str, singular: &'static str, id_strategy: IdStrategy, spec: FieldSpec) -> Self {
        Self { name, singular, id_strategy, spec, hidden_fields: &[], default_page_size: None }
    }

    pub fn hidden(mut self, fields: &'static [&'static str]) -> Self {
        self.hidden_fields = fields;
        self
    }

    pub fn paginated_by_default(mut self, page_size: u32) -> Self {
        self.default_page_size = Some(page_size);
        self
    }
}

/// Resources served through the generic CRUD routes.
pub fn crud_resources() -> Vec<ResourceDef> {
    vec![task::definition(), book::definition(), product::definition(), movie::definition()]
}

/// Every resource, including accounts.
pub fn all_resources() -> Vec<ResourceDef> {
    let mut all = crud_resources();
    all.push(user::definition());
    all
}
