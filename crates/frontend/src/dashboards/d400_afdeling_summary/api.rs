use contracts::dashboards::d400_afdeling_summary::dto::{dashboard_path, DashboardData};
use contracts::enums::AfdelingKey;
use contracts::shared::api::ApiError;

use crate::shared::api_utils::get_json;

/// Today and to-date totals; the endpoint answers the bare object
pub async fn fetch_summary(afdeling: AfdelingKey) -> Result<DashboardData, ApiError> {
    get_json::<DashboardData>(&dashboard_path(afdeling)).await
}
