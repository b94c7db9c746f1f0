//! Blocking browser dialogs used by the form controllers

use contracts::shared::api::ApiError;

pub fn alert(message: &str) {
    match web_sys::window() {
        Some(win) => {
            if win.alert_with_message(message).is_err() {
                log::warn!("alert failed: {}", message);
            }
        }
        None => log::warn!("no window for alert: {}", message),
    }
}

/// Logs the error and shows the operator-facing text
pub fn alert_error(context: &str, error: &ApiError) {
    if error.is_validation() {
        log::debug!("{}: {}", context, error);
    } else {
        log::error!("{}: {}", context, error);
    }
    alert(&error.alert_text());
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}
