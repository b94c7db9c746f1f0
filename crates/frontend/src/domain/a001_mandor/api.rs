use contracts::domain::a001_mandor::aggregate::{Mandor, MandorDto};
use contracts::domain::common::{AggregateRoot, WriteTarget};
use contracts::shared::api::{ApiError, ListResponse};
use contracts::shared::autocomplete::{normalize_records, Candidate, CandidateKind};
use serde_json::Value;

use crate::shared::api_utils::{delete, get_json, save_record};

pub async fn fetch_all() -> Result<Vec<Mandor>, ApiError> {
    get_json::<ListResponse<Mandor>>(&Mandor::collection_path())
        .await?
        .into_result()
}

/// Same list, normalized for the autocomplete from the raw records
pub async fn fetch_candidates() -> Result<Vec<Candidate>, ApiError> {
    let raw = get_json::<ListResponse<Value>>(&Mandor::collection_path())
        .await?
        .into_result()?;
    Ok(normalize_records(&raw, CandidateKind::Mandor))
}

pub async fn save(target: WriteTarget<u64>, dto: &MandorDto) -> Result<String, ApiError> {
    save_record::<Mandor, _>(target, dto).await
}

pub async fn remove(id: u64) -> Result<String, ApiError> {
    delete(&Mandor::item_path(id)).await
}
