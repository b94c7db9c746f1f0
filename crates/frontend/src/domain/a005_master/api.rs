use contracts::domain::a005_master::aggregate::{Master, UploadResponse, UPLOAD_PATH};
use contracts::domain::common::AggregateRoot;
use contracts::shared::api::ApiError;
use web_sys::{File, FormData};

use crate::shared::api_utils::{delete, get_json, post_form};

/// `GET /api/master` answers a bare array
pub async fn fetch_all() -> Result<Vec<Master>, ApiError> {
    get_json::<Vec<Master>>(&Master::collection_path()).await
}

pub async fn remove(id: u64) -> Result<String, ApiError> {
    delete(&Master::item_path(id)).await
}

fn upload_body(tanggal: &str, afdeling: &str, file: &File) -> Result<FormData, ApiError> {
    let to_err = |e: wasm_bindgen::JsValue| ApiError::Transport(format!("{:?}", e));
    let form = FormData::new().map_err(to_err)?;
    form.append_with_str("tanggal", tanggal).map_err(to_err)?;
    form.append_with_str("afdeling", afdeling).map_err(to_err)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(to_err)?;
    Ok(form)
}

/// Multipart upload; the server keeps processing after it answers
pub async fn upload(tanggal: &str, afdeling: &str, file: &File) -> Result<UploadResponse, ApiError> {
    let body = upload_body(tanggal, afdeling, file)?;
    post_form::<UploadResponse>(UPLOAD_PATH, body)
        .await?
        .into_result()
}
