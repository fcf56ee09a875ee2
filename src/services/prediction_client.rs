//! HTTP client for the external prediction service
//!
//! Posts the soil sample as JSON to the crop or fertilizer endpoint and
//! parses the typed response. Any transport failure, non-success status or
//! unparseable body is reported as `PredictionUnavailable`; there are no
//! retries and no timeout beyond the transport default.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{AdvisoryError, AdvisoryResult};
use crate::traits::PredictionClient;
use crate::types::{CropPrediction, FertilizerPrediction, SoilSample};

/// Real prediction client backed by reqwest
#[derive(Debug, Clone)]
pub struct RealPredictionClient {
    client: reqwest::Client,
    base_url: String,
}

impl RealPredictionClient {
    /// Create a client against the given prediction service base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post_prediction<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        sample: &SoilSample,
    ) -> AdvisoryResult<T> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .post(&url)
            .json(sample)
            .send()
            .await
            .map_err(|e| AdvisoryError::PredictionUnavailable {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(AdvisoryError::PredictionUnavailable {
                message: format!("{} returned {}", endpoint, response.status()),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AdvisoryError::PredictionUnavailable {
                message: format!("failed to parse {} response: {}", endpoint, e),
            })
    }
}

#[async_trait]
impl PredictionClient for RealPredictionClient {
    async fn predict_crop(&self, sample: &SoilSample) -> AdvisoryResult<CropPrediction> {
        self.post_prediction("predict_crop", sample).await
    }

    async fn predict_fertilizer(&self, sample: &SoilSample) -> AdvisoryResult<FertilizerPrediction> {
        self.post_prediction("predict_fertilizer", sample).await
    }
}
