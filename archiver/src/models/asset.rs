//! Asset model representing an inventoried host or device.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An asset as returned by `GET /assets`.
///
/// Only the fields the archiver reasons about are typed. Everything else the
/// server sends is kept in `extra` and written back verbatim on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique asset identifier, also the primary key of the local table.
    pub id: String,
    /// Last update timestamp (ISO-8601), kept untyped until classification
    /// so a null or numeric value fails one asset instead of the whole page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Value>,
    /// Whether the asset is already retired. Null reads as `false`.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub archived: bool,
    /// Owning tenant.
    #[serde(rename = "tenantID", default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Passthrough fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    /// The `updated` value when the server sent a string.
    pub fn updated_str(&self) -> Option<&str> {
        self.updated.as_ref().and_then(Value::as_str)
    }
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n.abs() > f64::EPSILON),
        Value::String(s) => s.eq_ignore_ascii_case("true") || s == "1",
        _ => false,
    })
}

/// Query filters accepted by `GET /assets`. Unset filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFilter {
    pub id: Option<String>,
    pub tenant_id: Option<String>,
    pub name: Option<String>,
    pub fqdn: Option<String>,
    pub ip: Option<String>,
    pub mac: Option<String>,
}

impl AssetFilter {
    /// Filter by tenant.
    pub fn tenant(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: Some(tenant_id.into()),
            ..Self::default()
        }
    }

    /// Convert to query-string pairs in the order the API documents them.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        [
            ("id", &self.id),
            ("tenantID", &self.tenant_id),
            ("name", &self.name),
            ("fqdn", &self.fqdn),
            ("ip", &self.ip),
            ("mac", &self.mac),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone())))
        .collect()
    }
}
