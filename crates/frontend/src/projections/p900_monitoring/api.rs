use contracts::projections::p900_monitoring::dto::{
    MandorRow, MonitoringSummary, PenyadapRow, SearchQuery, SearchResponse, SEARCH_PATH,
};
use contracts::shared::api::ApiError;
use serde::de::DeserializeOwned;

use crate::shared::api_utils::get_with_query;

async fn search<T: DeserializeOwned + Default>(
    query: &SearchQuery,
) -> Result<(Vec<T>, MonitoringSummary), ApiError> {
    get_with_query::<_, SearchResponse<T>>(SEARCH_PATH, query)
        .await?
        .into_result()
}

pub async fn search_penyadap(
    query: &SearchQuery,
) -> Result<(Vec<PenyadapRow>, MonitoringSummary), ApiError> {
    search(query).await
}

pub async fn search_mandor(
    query: &SearchQuery,
) -> Result<(Vec<MandorRow>, MonitoringSummary), ApiError> {
    search(query).await
}
