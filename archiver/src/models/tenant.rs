//! Tenant model.

use serde::{Deserialize, Serialize};

/// An organizational partition that scopes assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    #[serde(default)]
    pub name: String,
}
