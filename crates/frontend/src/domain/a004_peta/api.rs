use contracts::domain::a004_peta::aggregate::{
    by_code_path, Peta, PetaDto, PetaUpdateResponse, ALL_PETA_PATH,
};
use contracts::domain::common::AggregateRoot;
use contracts::shared::api::ApiError;

use crate::shared::api_utils::{encode_param, get_json, put_json};

/// `/api/all/peta` answers a bare array
pub async fn fetch_all() -> Result<Vec<Peta>, ApiError> {
    get_json::<Vec<Peta>>(ALL_PETA_PATH).await
}

/// Block by map code; a 404 means no such block
pub async fn find_by_code(code: &str) -> Result<Option<Peta>, ApiError> {
    match get_json::<Peta>(&by_code_path(&encode_param(code.trim()))).await {
        Ok(peta) => Ok(Some(peta)),
        Err(ApiError::Http { status: 404, .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn update(id: u64, dto: &PetaDto) -> Result<(Peta, String), ApiError> {
    put_json::<_, PetaUpdateResponse>(&Peta::item_path(id), dto)
        .await?
        .into_result()
}
