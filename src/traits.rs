//! Service trait definitions for dependency injection
//!
//! All I/O boundaries are abstracted through these traits so the advisor can
//! be exercised against mocks.

use async_trait::async_trait;

use crate::error::AdvisoryResult;
use crate::types::{AdvisoryRecord, CropPrediction, FertilizerPrediction, NewAdvisoryRecord, SoilSample};

/// External prediction service client trait
#[mockall::automock]
#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Request a crop prediction for a soil sample
    async fn predict_crop(&self, sample: &SoilSample) -> AdvisoryResult<CropPrediction>;

    /// Request a fertilizer prediction for a soil sample
    async fn predict_fertilizer(&self, sample: &SoilSample) -> AdvisoryResult<FertilizerPrediction>;
}

/// Advisory history store trait
#[mockall::automock]
#[async_trait]
pub trait AdvisoryStore: Send + Sync {
    /// Create the schema if it does not exist yet
    async fn initialize(&self) -> AdvisoryResult<()>;

    /// Append a record, assigning its id and creation timestamp
    async fn save(&self, record: NewAdvisoryRecord) -> AdvisoryResult<AdvisoryRecord>;

    /// All records for one farmer, in insertion order
    async fn find_by_farmer(&self, farmer_uid: &str) -> AdvisoryResult<Vec<AdvisoryRecord>>;

    /// Check whether the backend is reachable
    async fn is_healthy(&self) -> bool;
}
