use serde::Deserialize;

/// The `name` every registered configuration object carries.
#[derive(Clone, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn name(&self) -> &str {
        &self.name
    }
}
