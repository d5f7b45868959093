use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `students` table. `id` is assigned by SQLite and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: Option<String>,
    #[sqlx(rename = "lastName")]
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub telephone: Option<String>,
}

impl Student {
    pub fn fields(&self) -> StudentFields {
        StudentFields {
            name: self.name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            telephone: self.telephone.clone().unwrap_or_default(),
        }
    }
}

/// The four free-text columns, as written by insert and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub telephone: String,
}

impl StudentFields {
    pub fn new(
        name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        telephone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            last_name: last_name.into(),
            address: address.into(),
            telephone: telephone.into(),
        }
    }
}
