use chrono::NaiveDate;
use contracts::domain::a003_baku::aggregate::{
    detail_path, BakuDetail, BakuDto, BakuEntry, REKAP_TODAY_PATH,
};
use contracts::domain::common::{AggregateRoot, WriteTarget};
use contracts::shared::api::{ApiError, ListResponse};

use crate::shared::api_utils::{delete, get_json, save_record};

/// Today's entries with their mandor and penyadap embedded
pub async fn fetch_today_entries() -> Result<Vec<BakuEntry>, ApiError> {
    get_json::<ListResponse<BakuEntry>>(REKAP_TODAY_PATH)
        .await?
        .into_result()
}

/// Per-mandor recap of `date`
pub async fn fetch_details(date: NaiveDate) -> Result<Vec<BakuDetail>, ApiError> {
    get_json::<ListResponse<BakuDetail>>(&detail_path(date))
        .await?
        .into_result()
}

pub async fn save(target: WriteTarget<u64>, dto: &BakuDto) -> Result<String, ApiError> {
    save_record::<BakuEntry, _>(target, dto).await
}

pub async fn remove(id: u64) -> Result<String, ApiError> {
    delete(&BakuEntry::item_path(id)).await
}
