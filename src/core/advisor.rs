//! Recommendation orchestration
//!
//! The advisor relays a soil sample to the external prediction service, maps
//! the typed response into the uniform `Recommendation` shape, and attempts a
//! best-effort history write. Neither operation ever fails from the caller's
//! point of view: prediction failures degrade to an `ERROR`-kind result, and
//! persistence failures are logged and counted but never surfaced.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{AdvisoryError, AdvisoryResult};
use crate::state::AdvisoryState;
use crate::traits::{AdvisoryStore, PredictionClient};
use crate::types::{AdvisoryRecord, NewAdvisoryRecord, Recommendation, SoilSample};

/// Recommendation orchestrator with injected collaborators
pub struct Advisor<P, S>
where
    P: PredictionClient,
    S: AdvisoryStore,
{
    prediction: Arc<P>,
    store: Arc<S>,
    state: AdvisoryState,
}

impl<P, S> Advisor<P, S>
where
    P: PredictionClient,
    S: AdvisoryStore,
{
    /// Create a new advisor with injected prediction client and store
    pub fn new(prediction: P, store: S) -> Self {
        Self {
            prediction: Arc::new(prediction),
            store: Arc::new(store),
            state: AdvisoryState::new(),
        }
    }

    /// Runtime counters, read by the status endpoint
    pub fn state(&self) -> &AdvisoryState {
        &self.state
    }

    /// Check whether the history store backend is reachable
    pub async fn store_healthy(&self) -> bool {
        self.store.is_healthy().await
    }

    /// Recommend crops for a soil sample.
    ///
    /// Always yields a result of kind `CROP` or `ERROR`.
    pub async fn recommend_crop(&self, sample: &SoilSample) -> Recommendation {
        self.state.record_crop_request();

        match self.crop_recommendation(sample).await {
            Ok(recommendation) => {
                self.record_history(sample, &recommendation).await;
                recommendation
            }
            Err(e) => {
                warn!("crop recommendation degraded: {e}");
                Recommendation::degraded(e)
            }
        }
    }

    /// Recommend fertilizers for a soil sample.
    ///
    /// Always yields a result of kind `FERTILIZER` or `ERROR`.
    pub async fn recommend_fertilizer(&self, sample: &SoilSample) -> Recommendation {
        self.state.record_fertilizer_request();

        match self.fertilizer_recommendation(sample).await {
            Ok(recommendation) => {
                self.record_history(sample, &recommendation).await;
                recommendation
            }
            Err(e) => {
                warn!("fertilizer recommendation degraded: {e}");
                Recommendation::degraded(e)
            }
        }
    }

    /// Advisory history for one farmer, in insertion order
    pub async fn history(&self, farmer_uid: &str) -> AdvisoryResult<Vec<AdvisoryRecord>> {
        self.store.find_by_farmer(farmer_uid).await
    }

    async fn crop_recommendation(&self, sample: &SoilSample) -> AdvisoryResult<Recommendation> {
        let prediction = self.prediction.predict_crop(sample).await?;

        let alternatives = prediction
            .alternatives
            .ok_or_else(|| missing_field("predict_crop", "alternatives"))?;
        let best_crop = prediction
            .recommended_crop
            .ok_or_else(|| missing_field("predict_crop", "recommended_crop"))?;

        Ok(Recommendation::crop(alternatives, &best_crop))
    }

    async fn fertilizer_recommendation(&self, sample: &SoilSample) -> AdvisoryResult<Recommendation> {
        let prediction = self.prediction.predict_fertilizer(sample).await?;

        let fertilizers = prediction
            .recommended_fertilizer
            .ok_or_else(|| missing_field("predict_fertilizer", "recommended_fertilizer"))?;

        Ok(Recommendation::fertilizer(fertilizers))
    }

    /// Best-effort history write. Skipped without a farmer uid; failure is
    /// logged and counted, never returned.
    async fn record_history(&self, sample: &SoilSample, recommendation: &Recommendation) {
        let Some(farmer_uid) = sample.farmer_uid.clone() else {
            debug!("no farmer uid on sample, skipping history write");
            return;
        };

        let data = match serde_json::to_string(recommendation) {
            Ok(data) => data,
            Err(e) => {
                warn!("failed to serialize recommendation for history: {e}");
                self.state.record_persistence_failure();
                return;
            }
        };

        let record = NewAdvisoryRecord {
            farmer_uid,
            land_parcel_id: sample.land_parcel_id,
            kind: recommendation.kind,
            recommendation_data: data,
        };

        match self.store.save(record).await {
            Ok(saved) => {
                debug!("saved advisory record {} ({})", saved.id, saved.kind);
                self.state.record_persisted();
            }
            Err(e) => {
                warn!("failed to save advisory record: {e}");
                self.state.record_persistence_failure();
            }
        }
    }
}

fn missing_field(endpoint: &str, field: &str) -> AdvisoryError {
    AdvisoryError::UnexpectedResponseShape {
        endpoint: endpoint.to_string(),
        field: field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockAdvisoryStore, MockPredictionClient};
    use crate::types::{CropPrediction, FertilizerPrediction, RecommendationKind};
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_with_farmer(farmer_uid: Option<&str>) -> SoilSample {
        SoilSample {
            farmer_uid: farmer_uid.map(|uid| uid.to_string()),
            land_parcel_id: Some(12),
            nitrogen: Some(90.0),
            phosphorus: Some(42.0),
            potassium: Some(43.0),
            ph_level: Some(6.5),
            rainfall: Some(200.0),
            temperature: Some(25.0),
            humidity: Some(70.0),
        }
    }

    fn saved_record(record: NewAdvisoryRecord) -> AdvisoryRecord {
        AdvisoryRecord {
            id: Uuid::new_v4(),
            farmer_uid: record.farmer_uid,
            land_parcel_id: record.land_parcel_id,
            kind: record.kind,
            recommendation_data: record.recommendation_data,
            created_at: Utc::now(),
        }
    }

    fn crop_prediction() -> CropPrediction {
        CropPrediction {
            recommended_crop: Some("Rice".to_string()),
            alternatives: Some(vec!["Rice".to_string(), "Maize".to_string()]),
            message: Some("Success".to_string()),
        }
    }

    #[tokio::test]
    async fn test_crop_recommendation_maps_prediction_fields() {
        let mut prediction = MockPredictionClient::new();
        prediction
            .expect_predict_crop()
            .times(1)
            .returning(|_| Ok(crop_prediction()));

        let mut store = MockAdvisoryStore::new();
        store.expect_save().times(1).returning(|record| Ok(saved_record(record)));

        let advisor = Advisor::new(prediction, store);
        let result = advisor.recommend_crop(&sample_with_farmer(Some("farmer-1"))).await;

        assert_eq!(result.kind, RecommendationKind::Crop);
        assert_eq!(
            result.recommendations,
            Some(vec!["Rice".to_string(), "Maize".to_string()])
        );
        assert_eq!(result.advice, "AI suggests Rice based on your soil profile.");
    }

    #[tokio::test]
    async fn test_fertilizer_recommendation_uses_fixed_advice() {
        let mut prediction = MockPredictionClient::new();
        prediction.expect_predict_fertilizer().times(1).returning(|_| {
            Ok(FertilizerPrediction {
                recommended_fertilizer: Some(vec!["Urea".to_string(), "DAP".to_string()]),
                message: None,
            })
        });

        let mut store = MockAdvisoryStore::new();
        store.expect_save().times(1).returning(|record| Ok(saved_record(record)));

        let advisor = Advisor::new(prediction, store);
        let result = advisor
            .recommend_fertilizer(&sample_with_farmer(Some("farmer-1")))
            .await;

        assert_eq!(result.kind, RecommendationKind::Fertilizer);
        assert_eq!(
            result.recommendations,
            Some(vec!["Urea".to_string(), "DAP".to_string()])
        );
        assert_eq!(result.advice, "Nutrient based recommendation.");
    }

    #[tokio::test]
    async fn test_prediction_failure_degrades_to_error_kind() {
        let mut prediction = MockPredictionClient::new();
        prediction.expect_predict_crop().times(1).returning(|_| {
            Err(AdvisoryError::PredictionUnavailable {
                message: "connection refused".to_string(),
            })
        });

        let mut store = MockAdvisoryStore::new();
        store.expect_save().times(0);

        let advisor = Advisor::new(prediction, store);
        let result = advisor.recommend_crop(&sample_with_farmer(Some("farmer-1"))).await;

        assert_eq!(result.kind, RecommendationKind::Error);
        assert_eq!(result.recommendations, None);
        assert!(
            result.advice.contains("connection refused"),
            "advice should embed the failure description, got: {}",
            result.advice
        );
    }

    #[tokio::test]
    async fn test_missing_alternatives_key_degrades_without_history_write() {
        let mut prediction = MockPredictionClient::new();
        prediction.expect_predict_crop().times(1).returning(|_| {
            Ok(CropPrediction {
                recommended_crop: Some("Rice".to_string()),
                alternatives: None,
                message: Some("Success".to_string()),
            })
        });

        let mut store = MockAdvisoryStore::new();
        store.expect_save().times(0);

        let advisor = Advisor::new(prediction, store);
        let result = advisor.recommend_crop(&sample_with_farmer(Some("farmer-1"))).await;

        assert_eq!(result.kind, RecommendationKind::Error);
        assert!(result.advice.contains("alternatives"));
    }

    #[tokio::test]
    async fn test_missing_fertilizer_key_degrades() {
        let mut prediction = MockPredictionClient::new();
        prediction.expect_predict_fertilizer().times(1).returning(|_| {
            Ok(FertilizerPrediction {
                recommended_fertilizer: None,
                message: Some("Based on NPK soil analysis".to_string()),
            })
        });

        let mut store = MockAdvisoryStore::new();
        store.expect_save().times(0);

        let advisor = Advisor::new(prediction, store);
        let result = advisor
            .recommend_fertilizer(&sample_with_farmer(Some("farmer-1")))
            .await;

        assert_eq!(result.kind, RecommendationKind::Error);
        assert!(result.advice.contains("recommended_fertilizer"));
    }

    #[tokio::test]
    async fn test_no_farmer_uid_skips_history_write() {
        let mut prediction = MockPredictionClient::new();
        prediction
            .expect_predict_crop()
            .times(1)
            .returning(|_| Ok(crop_prediction()));

        let mut store = MockAdvisoryStore::new();
        store.expect_save().times(0);

        let advisor = Advisor::new(prediction, store);
        let result = advisor.recommend_crop(&sample_with_farmer(None)).await;

        // The recommendation itself is unaffected
        assert_eq!(result.kind, RecommendationKind::Crop);
        assert_eq!(advisor.state().snapshot().records_persisted, 0);
    }

    #[tokio::test]
    async fn test_successful_call_persists_exactly_one_round_trippable_record() {
        let mut prediction = MockPredictionClient::new();
        prediction
            .expect_predict_crop()
            .times(1)
            .returning(|_| Ok(crop_prediction()));

        let mut store = MockAdvisoryStore::new();
        store
            .expect_save()
            .times(1)
            .withf(|record| {
                let stored: Recommendation =
                    serde_json::from_str(&record.recommendation_data).expect("stored data should deserialize");
                record.farmer_uid == "farmer-1"
                    && record.land_parcel_id == Some(12)
                    && record.kind == RecommendationKind::Crop
                    && stored.kind == RecommendationKind::Crop
                    && stored.advice == "AI suggests Rice based on your soil profile."
            })
            .returning(|record| Ok(saved_record(record)));

        let advisor = Advisor::new(prediction, store);
        let result = advisor.recommend_crop(&sample_with_farmer(Some("farmer-1"))).await;

        assert_eq!(result.kind, RecommendationKind::Crop);
        let snapshot = advisor.state().snapshot();
        assert_eq!(snapshot.records_persisted, 1);
        assert_eq!(snapshot.persistence_failures, 0);
    }

    #[tokio::test]
    async fn test_store_failure_never_surfaces() {
        let mut prediction = MockPredictionClient::new();
        prediction
            .expect_predict_crop()
            .times(1)
            .returning(|_| Ok(crop_prediction()));

        let mut store = MockAdvisoryStore::new();
        store
            .expect_save()
            .times(1)
            .returning(|_| Err(AdvisoryError::persistence("store unavailable")));

        let advisor = Advisor::new(prediction, store);
        let result = advisor.recommend_crop(&sample_with_farmer(Some("farmer-1"))).await;

        assert_eq!(result.kind, RecommendationKind::Crop);
        assert_eq!(advisor.state().snapshot().persistence_failures, 1);
    }

    #[tokio::test]
    async fn test_history_delegates_to_store() {
        let prediction = MockPredictionClient::new();

        let mut store = MockAdvisoryStore::new();
        store
            .expect_find_by_farmer()
            .times(1)
            .withf(|uid| uid == "farmer-9")
            .returning(|_| Ok(vec![]));

        let advisor = Advisor::new(prediction, store);
        let records = advisor.history("farmer-9").await.expect("history should succeed");
        assert!(records.is_empty());
    }
}
