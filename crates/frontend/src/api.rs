use meshplanner_shared::models::{FeatureCollection, PredictionRequest};
use meshplanner_shared::predict::{PredictError, PredictionService};

const DEFAULT_PREDICT_URL: &str = "http://meshtastic.mpatrick.dev/predict";

/// Prediction endpoint, overridable at build time with `MESHPLANNER_PREDICT_URL`.
pub fn predict_url() -> &'static str {
    resolve_predict_url(option_env!("MESHPLANNER_PREDICT_URL"))
}

fn resolve_predict_url(configured: Option<&'static str>) -> &'static str {
    match configured {
        Some(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_PREDICT_URL,
    }
}

/// [`PredictionService`] that POSTs the request as JSON.
pub struct HttpPredictor {
    client: reqwest::Client,
    url: String,
}

impl HttpPredictor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for HttpPredictor {
    fn default() -> Self {
        Self::new(predict_url())
    }
}

impl PredictionService for HttpPredictor {
    async fn predict(&self, request: &PredictionRequest) -> Result<FeatureCollection, PredictError> {
        let resp = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| PredictError::Network(e.to_string()))?;

        check_status(resp.status())?;

        let body = resp
            .text()
            .await
            .map_err(|e| PredictError::Network(e.to_string()))?;
        parse_feature_collection(&body)
    }
}

/// Any non-2xx status fails the prediction before the body is read.
fn check_status(status: reqwest::StatusCode) -> Result<(), PredictError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(PredictError::Status(status.as_u16()))
    }
}

/// Decode a prediction response body.
pub fn parse_feature_collection(body: &str) -> Result<FeatureCollection, PredictError> {
    serde_json::from_str(body).map_err(|e| PredictError::Decode(e.to_string()))
}
