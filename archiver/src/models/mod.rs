//! Data models for remote inventory records.

mod asset;
mod tenant;

pub use asset::{Asset, AssetFilter};
pub use tenant::Tenant;
