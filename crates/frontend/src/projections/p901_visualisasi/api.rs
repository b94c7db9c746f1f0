use contracts::projections::p901_visualisasi::dto::{
    VisualisasiQuery, VisualisasiResponse, VISUALISASI_DEFAULT_PATH, VISUALISASI_PATH,
};
use contracts::shared::api::ApiError;

use crate::shared::api_utils::{get_json, get_with_query};

pub async fn fetch_series(query: &VisualisasiQuery) -> Result<VisualisasiResponse, ApiError> {
    get_with_query(VISUALISASI_PATH, query).await
}

/// Server-chosen recent window; the caller derives the range from its dates
pub async fn fetch_default() -> Result<VisualisasiResponse, ApiError> {
    get_json(VISUALISASI_DEFAULT_PATH).await
}
