//! Browse endpoints feeding the booking selector

use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::Error;

/// A service category (hair, nails, massage, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A business listed in the marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,

    /// Street address shown on the business card
    pub address: Option<String>,

    /// Average review score
    pub rating: Option<f64>,
}

/// An individual service provider affiliated with a business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub name: String,
}

/// A bookable service offered by a worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: String,
    pub name: String,

    /// Duration in minutes
    pub duration: Option<u32>,

    /// Price in the smallest currency unit
    pub price: Option<i64>,
}

/// Client for the category/business/worker/service browse endpoints
#[derive(Clone)]
pub struct CatalogApi {
    api: ApiClient,
}

impl CatalogApi {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All service categories
    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        self.api.get("/api/categories").await
    }

    /// Businesses offering services in a category
    pub async fn businesses(&self, category_id: &str) -> Result<Vec<Business>, Error> {
        self.api
            .get(&format!("/api/categories/{}/businesses", category_id))
            .await
    }

    /// Workers of a business
    pub async fn workers(&self, business_id: &str) -> Result<Vec<Worker>, Error> {
        self.api
            .get(&format!("/api/businesses/{}/workers", business_id))
            .await
    }

    /// Services a worker offers
    pub async fn services(&self, worker_id: &str) -> Result<Vec<ServiceItem>, Error> {
        self.api
            .get(&format!("/api/workers/{}/services", worker_id))
            .await
    }
}
