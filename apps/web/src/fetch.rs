use exodo_core::CatalogError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

fn fetch_error(resource: &str, error: &JsValue) -> CatalogError {
    CatalogError::Fetch {
        resource: resource.to_string(),
        reason: error
            .as_string()
            .unwrap_or_else(|| format!("{error:?}")),
    }
}

/// GETs a same-origin resource and returns its body as text.
pub async fn fetch_text(resource: &str) -> Result<String, CatalogError> {
    let window = web_sys::window().ok_or_else(|| CatalogError::Fetch {
        resource: resource.to_string(),
        reason: "no window".to_string(),
    })?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(resource, &opts)
        .map_err(|e| fetch_error(resource, &e))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| fetch_error(resource, &e))?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|e| fetch_error(resource, &e))?;

    if !response.ok() {
        return Err(CatalogError::Status {
            resource: resource.to_string(),
            status: format!("{} {}", response.status(), response.status_text()),
        });
    }

    let body = response.text().map_err(|e| fetch_error(resource, &e))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|e| fetch_error(resource, &e))?;
    text.as_string().ok_or_else(|| CatalogError::Fetch {
        resource: resource.to_string(),
        reason: "response body is not text".to_string(),
    })
}
