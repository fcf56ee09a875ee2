//! Advisory data types
//!
//! Wire shapes follow the external prediction service (camelCase JSON for
//! soil samples, `type`/`recommendations`/`advice` for recommendations).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One batch of soil sensor readings submitted by a caller.
///
/// Every field is optional: prediction proceeds with whatever is present, and
/// `farmer_uid` is only required for the advisory history to be persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilSample {
    pub farmer_uid: Option<String>,
    pub land_parcel_id: Option<i64>,

    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub ph_level: Option<f64>,
    pub rainfall: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

/// Kind tag distinguishing crop, fertilizer and degraded results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendationKind {
    Crop,
    Fertilizer,
    Error,
}

impl RecommendationKind {
    /// Tag string as stored in the history table
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Crop => "CROP",
            RecommendationKind::Fertilizer => "FERTILIZER",
            RecommendationKind::Error => "ERROR",
        }
    }

    /// Parse a stored tag string back into a kind
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "CROP" => Some(RecommendationKind::Crop),
            "FERTILIZER" => Some(RecommendationKind::Fertilizer),
            "ERROR" => Some(RecommendationKind::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform advisory response returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub recommendations: Option<Vec<String>>,
    pub advice: String,
}

impl Recommendation {
    /// Crop recommendation with the advice template naming the best crop
    pub fn crop(alternatives: Vec<String>, best_crop: &str) -> Self {
        Recommendation {
            kind: RecommendationKind::Crop,
            recommendations: Some(alternatives),
            advice: format!("AI suggests {} based on your soil profile.", best_crop),
        }
    }

    /// Fertilizer recommendation with the fixed nutrient advice string
    pub fn fertilizer(fertilizers: Vec<String>) -> Self {
        Recommendation {
            kind: RecommendationKind::Fertilizer,
            recommendations: Some(fertilizers),
            advice: "Nutrient based recommendation.".to_string(),
        }
    }

    /// Degraded result embedding the failure description
    pub fn degraded(message: impl std::fmt::Display) -> Self {
        Recommendation {
            kind: RecommendationKind::Error,
            recommendations: None,
            advice: format!("AI service failed: {}", message),
        }
    }
}

/// Typed response expected from `POST {base_url}/predict_crop`.
///
/// Both fields are optional at the wire level; the advisor raises
/// an unexpected-shape error when a required one is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CropPrediction {
    pub recommended_crop: Option<String>,
    pub alternatives: Option<Vec<String>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Typed response expected from `POST {base_url}/predict_fertilizer`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FertilizerPrediction {
    pub recommended_fertilizer: Option<Vec<String>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Record contents as handed to the store, before id/timestamp assignment
#[derive(Debug, Clone, PartialEq)]
pub struct NewAdvisoryRecord {
    pub farmer_uid: String,
    pub land_parcel_id: Option<i64>,
    pub kind: RecommendationKind,
    /// Recommendation serialized as a JSON text blob
    pub recommendation_data: String,
}

/// One durable advisory history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryRecord {
    pub id: Uuid,
    pub farmer_uid: String,
    pub land_parcel_id: Option<i64>,
    pub kind: RecommendationKind,
    pub recommendation_data: String,
    pub created_at: DateTime<Utc>,
}
