use serde::{Deserialize, Serialize};

/// One row of the allow-list table. Only the columns the report shows are
/// decoded; `id`, timestamps and anything else may have any shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowedUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub activo: bool,
}

impl AllowedUser {
    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("N/A")
    }

    pub fn display_name(&self) -> &str {
        self.nombre.as_deref().unwrap_or("no name")
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
