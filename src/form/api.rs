//! Client side of `/api/prefill` and `/api/fiche-avenir`.
//!
//! The form talks to the server through [`Backend`] so its logic can be
//! tested with a canned implementation. In the browser, [`XhrBackend`]
//! issues synchronous `XMLHttpRequest`s from the input handler.

use thiserror::Error;

use crate::data::{FicheAvenir, PrefillPayload, UploadReceipt};

pub const PREFILL_PATH: &str = "/api/prefill";
pub const FICHE_AVENIR_PATH: &str = "/api/fiche-avenir";

/// `id` of the `<input type="file">` in `index.html`.
pub const FILE_INPUT_ID: &str = "fiche-avenir";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("requête impossible : {0}")]
    Network(String),

    #[error("réponse HTTP {0}")]
    Status(u16),

    #[error("JSON invalide : {0}")]
    Json(#[from] serde_json::Error),
}

pub trait Backend {
    fn prefill(&self) -> Result<PrefillPayload, ApiError>;

    fn upload_fiche(&self, fiche: &FicheAvenir) -> Result<UploadReceipt, ApiError>;

    /// Metadata of the file currently chosen in the page, if any.
    fn selected_fiche(&self) -> Option<FicheAvenir>;
}

#[cfg(target_arch = "wasm32")]
pub use browser::XhrBackend;

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{HtmlInputElement, XmlHttpRequest};

    use super::*;

    fn js_err(e: JsValue) -> ApiError {
        ApiError::Network(format!("{e:?}"))
    }

    /// Same-origin backend: the server that serves the page answers the API.
    pub struct XhrBackend {
        base_url: String,
    }

    impl XhrBackend {
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into(),
            }
        }

        fn request(&self, method: &str, path: &str, body: Option<&str>) -> Result<String, ApiError> {
            let xhr = XmlHttpRequest::new().map_err(js_err)?;
            xhr.open_with_async(method, &format!("{}{path}", self.base_url), false)
                .map_err(js_err)?;
            if body.is_some() {
                xhr.set_request_header("Content-Type", "application/json")
                    .map_err(js_err)?;
            }
            xhr.send_with_opt_str(body).map_err(js_err)?;

            let status = xhr.status().map_err(js_err)?;
            if !(200..300).contains(&status) {
                return Err(ApiError::Status(status));
            }
            Ok(xhr.response_text().map_err(js_err)?.unwrap_or_default())
        }
    }

    impl Backend for XhrBackend {
        fn prefill(&self) -> Result<PrefillPayload, ApiError> {
            let text = self.request("GET", PREFILL_PATH, None)?;
            Ok(serde_json::from_str(&text)?)
        }

        fn upload_fiche(&self, fiche: &FicheAvenir) -> Result<UploadReceipt, ApiError> {
            let body = serde_json::to_string(fiche)?;
            let text = self.request("POST", FICHE_AVENIR_PATH, Some(&body))?;
            Ok(serde_json::from_str(&text)?)
        }

        fn selected_fiche(&self) -> Option<FicheAvenir> {
            let input = web_sys::window()?
                .document()?
                .get_element_by_id(FILE_INPUT_ID)?
                .dyn_into::<HtmlInputElement>()
                .ok()?;
            let file = input.files()?.get(0)?;
            Some(FicheAvenir {
                name: file.name(),
                size: file.size() as u64,
            })
        }
    }
}
