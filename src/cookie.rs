// Session cookie access. Parsing and formatting are kept apart from the
// document bindings so they can be exercised without a browser.

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::config::ClientConfig;
use crate::rust_error;
use crate::util::JsResult;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Value of cookie `name` in a `document.cookie` string.
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_owned())
    })
}

pub fn set_cookie_string(name: &str, value: &str, expire_days: u32, path: &str) -> String {
    format!(
        "{}={}; max-age={}; path={}",
        name,
        value,
        u64::from(expire_days) * SECONDS_PER_DAY,
        path
    )
}

pub fn delete_cookie_string(name: &str, path: &str) -> String {
    format!("{}=; max-age=0; path={}", name, path)
}

fn html_document() -> JsResult<HtmlDocument> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| rust_error!("No document"))?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| rust_error!("Document is not an HTML document"))
}

#[derive(Clone, Debug, PartialEq)]
pub struct CookieStore {
    name: String,
    expire_days: u32,
}

impl CookieStore {
    pub fn new(cfg: &ClientConfig) -> Self {
        Self { name: cfg.cookie_name.clone(), expire_days: cfg.cookie_expire_days }
    }

    pub fn get(&self) -> Option<String> {
        let cookies = html_document().ok()?.cookie().ok()?;
        find_cookie(&cookies, &self.name)
    }

    pub fn set(&self, value: &str) -> JsResult<()> {
        html_document()?.set_cookie(&set_cookie_string(&self.name, value, self.expire_days, "/"))
    }

    pub fn delete(&self) -> JsResult<()> {
        html_document()?.set_cookie(&delete_cookie_string(&self.name, "/"))
    }
}
