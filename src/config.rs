use serde::{Deserialize, Serialize};

use crate::util::cwarn;

/// localStorage key holding a JSON override of [`ClientConfig`].
pub const CONFIG_STORAGE_KEY: &str = "tt_client_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub cookie_name: String,
    pub cookie_expire_days: u32,
    /// How long a transient notice stays up.
    pub notice_delay_ms: u32,
    /// WebSocket endpoint path on the page's host.
    pub socket_path: String,
    /// Full WebSocket URL; wins over `socket_path` when set.
    pub socket_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cookie_name: "tt_session".to_owned(),
            cookie_expire_days: 7,
            notice_delay_ms: 5000,
            socket_path: "/endpoint".to_owned(),
            socket_url: None,
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Defaults, overlaid with whatever the browser has stored.
    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(CONFIG_STORAGE_KEY) {
                    match Self::from_json(&raw) {
                        Ok(cfg) => return cfg,
                        Err(e) => cwarn(&format!("ignoring stored client config: {}", e)),
                    }
                }
            }
        }
        Self::default()
    }

    /// `ws://` or `wss://` URL matching the page's own scheme and host.
    pub fn socket_url_for(&self, protocol: &str, host: &str) -> String {
        if let Some(url) = &self.socket_url {
            return url.clone();
        }
        let scheme = if protocol == "https:" { "wss" } else { "ws" };
        format!("{}://{}{}", scheme, host, self.socket_path)
    }

    pub fn socket_url(&self) -> Option<String> {
        let location = web_sys::window()?.location();
        let protocol = location.protocol().ok()?;
        let host = location.host().ok()?;
        Some(self.socket_url_for(&protocol, &host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg = ClientConfig::from_json(r#"{"notice_delay_ms": 1500}"#).unwrap();
        assert_eq!(cfg.notice_delay_ms, 1500);
        assert_eq!(cfg.cookie_name, ClientConfig::default().cookie_name);
    }

    #[test]
    fn socket_url_follows_page_scheme() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.socket_url_for("https:", "tt.example:8000"), "wss://tt.example:8000/endpoint");
        assert_eq!(cfg.socket_url_for("http:", "localhost"), "ws://localhost/endpoint");
        let fixed = ClientConfig { socket_url: Some("ws://other/ws".to_owned()), ..cfg };
        assert_eq!(fixed.socket_url_for("http:", "localhost"), "ws://other/ws");
    }
}
