use web_sys::window;

const USERNAME_KEY: &str = "baku_username";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Remember who is logged in across reloads
pub fn save_username(username: &str) {
    if let Some(storage) = get_local_storage() {
        if storage.set_item(USERNAME_KEY, username).is_err() {
            log::warn!("localStorage: could not save username");
        }
    }
}

pub fn get_username() -> Option<String> {
    get_local_storage()?
        .get_item(USERNAME_KEY)
        .ok()?
        .filter(|u| !u.is_empty())
}

pub fn clear_username() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(USERNAME_KEY);
    }
}
