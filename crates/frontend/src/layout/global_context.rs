//! Open tabs, the active tab and the side panel toggles, shared through
//! Leptos context. The active tab key is mirrored into `?active=` so a
//! reload lands on the same page.

use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use super::tabs::tab_label_for_key;

/// Tabs opened right after login: the block map first so it can answer the
/// dashboard handshake, then the dashboard itself.
pub const STARTUP_TABS: &[&str] = &["a004_peta", "d400_afdeling_summary"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
    pub right_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(Vec::new()),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
            right_open: RwSignal::new(false),
        }
    }

    /// Opens the startup tabs, then honours `?active=` and keeps it in sync
    pub fn init_router_integration(&self) {
        if self.opened.with_untracked(Vec::is_empty) {
            for key in STARTUP_TABS {
                self.open_tab(key, tab_label_for_key(key));
            }
        }

        if let Some(key) = active_param(&current_search()) {
            match tab_label_for_key(&key) {
                "" => log::warn!("ignoring unknown tab in url: {}", key),
                label => self.open_tab(&key, label),
            }
        }

        let active = self.active;
        Effect::new(move |_| {
            if let Some(key) = active.get() {
                replace_search(&active_query(&key));
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        let is_new = self.opened.with_untracked(|tabs| tabs.iter().all(|t| t.key != key));
        if is_new {
            log::debug!("open tab {} ({})", key, title);
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                })
            });
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    /// Closing the active tab activates its left neighbour
    pub fn close_tab(&self, key: &str) {
        let mut next = None;
        self.opened.update(|tabs| {
            if let Some(pos) = tabs.iter().position(|t| t.key == key) {
                tabs.remove(pos);
                next = neighbour(tabs, pos);
            }
        });
        let was_active = self.active.with_untracked(|a| a.as_deref() == Some(key));
        if was_active {
            self.active.set(next);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }

    pub fn toggle_right(&self) {
        self.right_open.update(|open| *open = !*open);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

fn neighbour(tabs: &[Tab], removed_at: usize) -> Option<String> {
    tabs.get(removed_at.saturating_sub(1))
        .or_else(|| tabs.first())
        .map(|t| t.key.clone())
}

fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn replace_search(search: &str) {
    if current_search() == search {
        return;
    }
    let Some(history) = window().and_then(|w| w.history().ok()) else {
        return;
    };
    if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(search)) {
        log::warn!("history.replaceState failed: {:?}", e);
    }
}

/// `?active=a001_mandor` -> `Some("a001_mandor")`
fn active_param(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").filter(|k| !k.is_empty()).cloned()
}

fn active_query(key: &str) -> String {
    let query = serde_qs::to_string(&HashMap::from([("active", key)])).unwrap_or_default();
    format!("?{}", query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(keys: &[&str]) -> Vec<Tab> {
        keys.iter()
            .map(|k| Tab {
                key: k.to_string(),
                title: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_active_param_round_trip() {
        assert_eq!(active_query("p900_monitoring"), "?active=p900_monitoring");
        assert_eq!(
            active_param("?active=p900_monitoring"),
            Some("p900_monitoring".to_string())
        );
        assert_eq!(active_param(""), None);
        assert_eq!(active_param("?active="), None);
    }

    #[test]
    fn test_neighbour_after_close() {
        let left = tabs(&["a004_peta", "p900_monitoring"]);
        assert_eq!(neighbour(&left, 2), Some("p900_monitoring".to_string()));
        assert_eq!(neighbour(&left, 0), Some("a004_peta".to_string()));
        assert_eq!(neighbour(&[], 0), None);
    }
}
