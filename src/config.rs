//! Client Configuration
//!
//! API base resolution and the persisted navigation state.

use record_manager::ClientConfig;
use serde::{Deserialize, Serialize};

/// Compile-time override for the API base, e.g. `http://localhost:8000/api/`
const API_BASE: Option<&str> = option_env!("POTATO_API_BASE");

const STORAGE_KEY: &str = "potato_records_nav_v1";

/// Config for the HTTP service: the build-time base, else `<origin>/api/`
pub fn client_config() -> ClientConfig {
    if let Some(base) = API_BASE {
        return ClientConfig::new(base);
    }
    match window_origin() {
        Some(origin) => ClientConfig::new(format!("{}/api/", origin.trim_end_matches('/'))),
        None => ClientConfig::default(),
    }
}

fn window_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct PersistedNav {
    /// Collection name of the last open tab; empty for home
    tab: String,
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Last open tab, if one was saved
pub fn load_last_tab() -> Option<String> {
    let raw = storage()?.get_item(STORAGE_KEY).ok().flatten()?;
    serde_json::from_str::<PersistedNav>(&raw).ok().map(|nav| nav.tab)
}

pub fn save_last_tab(tab: &str) {
    let Some(storage) = storage() else { return };
    let Ok(raw) = serde_json::to_string(&PersistedNav { tab: tab.to_string() }) else { return };
    if storage.set_item(STORAGE_KEY, &raw).is_err() {
        log::warn!("[config] could not persist tab {:?}", tab);
    }
}
