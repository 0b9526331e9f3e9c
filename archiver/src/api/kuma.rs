//! Typed operations on the management API.

use serde_json::{json, Value};
use tracing::{debug, info};

use super::paginator::{Fetched, Paginator};
use super::transport::{Query, Transport};
use crate::error::Result;
use crate::models::{Asset, AssetFilter, Tenant};

const WHOAMI: &str = "/users/whoami";
const TENANTS: &str = "/tenants";
const ASSETS: &str = "/assets";
const ASSETS_IMPORT: &str = "/assets/import";

/// The handful of API calls the archiver needs.
pub struct KumaApi<'a, T: ?Sized> {
    transport: &'a T,
    page_limit: usize,
}

impl<'a, T: Transport + ?Sized> KumaApi<'a, T> {
    pub const fn new(transport: &'a T, page_limit: usize) -> Self {
        Self {
            transport,
            page_limit,
        }
    }

    /// Validate credentials and reachability with `GET /users/whoami`.
    pub async fn connect(&self) -> Result<Value> {
        let me = self.transport.get(WHOAMI, &Vec::new()).await?;
        debug!(whoami = %me, "authenticated");
        Ok(me)
    }

    /// List every tenant.
    pub async fn fetch_tenants(&self) -> Fetched<Tenant> {
        self.paginator().fetch_all(TENANTS, &Vec::new()).await
    }

    /// List every asset matching `filter`.
    pub async fn fetch_assets(&self, filter: &AssetFilter) -> Fetched<Asset> {
        let filters: Query = filter.to_query();
        self.paginator().fetch_all(ASSETS, &filters).await
    }

    /// Submit updated asset representations for one tenant.
    pub async fn import_assets(&self, tenant_id: &str, assets: &[&Asset]) -> Result<Value> {
        let body = json!({
            "assets": assets,
            "tenantID": tenant_id,
        });
        info!(tenant_id, count = assets.len(), "importing assets");
        self.transport.post(ASSETS_IMPORT, &body).await
    }

    const fn paginator(&self) -> Paginator<'a, T> {
        Paginator::new(self.transport, self.page_limit)
    }
}
