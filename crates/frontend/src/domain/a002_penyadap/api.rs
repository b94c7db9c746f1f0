use contracts::domain::a002_penyadap::aggregate::{Penyadap, PenyadapDto};
use contracts::domain::common::{AggregateRoot, WriteTarget};
use contracts::shared::api::{ApiError, ListResponse};
use contracts::shared::autocomplete::{normalize_records, Candidate, CandidateKind};
use serde_json::Value;

use crate::shared::api_utils::{delete, encode_param, get_json, save_record};

pub async fn fetch_all() -> Result<Vec<Penyadap>, ApiError> {
    get_json::<ListResponse<Penyadap>>(&Penyadap::collection_path())
        .await?
        .into_result()
}

pub async fn fetch_candidates() -> Result<Vec<Candidate>, ApiError> {
    let raw = get_json::<ListResponse<Value>>(&Penyadap::collection_path())
        .await?
        .into_result()?;
    Ok(normalize_records(&raw, CandidateKind::Penyadap))
}

/// Server-side typeahead, `GET /api/penyadap/search?nama=`
pub async fn search(nama: &str) -> Result<Vec<Candidate>, ApiError> {
    let path = format!(
        "{}/search?nama={}",
        Penyadap::collection_path(),
        encode_param(nama.trim())
    );
    let raw = get_json::<ListResponse<Value>>(&path).await?.into_result()?;
    Ok(normalize_records(&raw, CandidateKind::Penyadap))
}

pub async fn save(target: WriteTarget<u64>, dto: &PenyadapDto) -> Result<String, ApiError> {
    save_record::<Penyadap, _>(target, dto).await
}

pub async fn remove(id: u64) -> Result<String, ApiError> {
    delete(&Penyadap::item_path(id)).await
}
