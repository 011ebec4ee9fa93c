//! Collection endpoints.

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{Collection, NewCollection};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Deserialize)]
struct CollectionListResponse {
    #[serde(default)]
    collections: Vec<Collection>,
}

#[derive(Serialize)]
struct CreateCollectionRequest<'a> {
    collection: CollectionBody<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionBody<'a> {
    name: &'a str,
    description: &'a str,
    category: CategoryRef<'a>,
    privacy_status: &'a str,
}

#[derive(Serialize)]
struct CategoryRef<'a> {
    id: &'a str,
}

impl ApiClient {
    /// `GET /collections/list`
    pub async fn list_collections(&self) -> ApiResult<Vec<Collection>> {
        let builder = self.request(Method::GET, "/collections/list")?;
        let response: CollectionListResponse = self.send_json(builder).await?;
        debug!(count = response.collections.len(), "Fetched collections");
        Ok(response.collections)
    }

    /// `POST /collections/create`
    pub async fn create_collection(&self, collection: &NewCollection) -> ApiResult<()> {
        collection.validate()?;
        let builder = self
            .request(Method::POST, "/collections/create")?
            .json(&CreateCollectionRequest {
                collection: CollectionBody {
                    name: &collection.name,
                    description: &collection.description,
                    category: CategoryRef {
                        id: &collection.category_id,
                    },
                    privacy_status: &collection.privacy_status,
                },
            });
        self.send_unit(builder).await?;
        debug!("Collection created");
        Ok(())
    }
}
