use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Window};

use crate::domain::{EndpointSource, FetchedCatalog};
use crate::drops::decode_products;
use crate::error::DropsError;

const PRIMARY_ENDPOINT: &str = "/api/new-drops";
const FALLBACK_ENDPOINT: &str = "/api/products";

/// Retrieves the new-drops listing.
///
/// The curated endpoint is tried first; a non-success status there sends
/// the request to the full-catalog route instead. If that also refuses,
/// the error carries its status code. No retries beyond that single
/// step, and no timeout beyond the browser's own.
pub async fn fetch_drops(window: &Window) -> Result<FetchedCatalog, DropsError> {
    let primary = request(window, PRIMARY_ENDPOINT).await?;

    let (response, source) = if primary.ok() {
        (primary, EndpointSource::Primary)
    } else {
        let fallback = request(window, FALLBACK_ENDPOINT).await?;
        if !fallback.ok() {
            return Err(DropsError::Retrieval {
                status: fallback.status(),
            });
        }
        (fallback, EndpointSource::Fallback)
    };

    let body = read_text(&response).await?;
    let products = decode_products(&body)?;
    Ok(FetchedCatalog { source, products })
}

async fn request(window: &Window, path: &str) -> Result<Response, DropsError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request =
        Request::new_with_str_and_init(path, &opts).map_err(|err| transport(path, &err))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|err| transport(path, &err))?;

    response_value
        .dyn_into::<Response>()
        .map_err(|err| transport(path, &err))
}

async fn read_text(response: &Response) -> Result<String, DropsError> {
    let pending = response
        .text()
        .map_err(|err| transport("response body", &err))?;
    let body = JsFuture::from(pending)
        .await
        .map_err(|err| transport("response body", &err))?;
    Ok(body.as_string().unwrap_or_default())
}

fn transport(context: &str, err: &JsValue) -> DropsError {
    let detail = err
        .as_string()
        .unwrap_or_else(|| format!("{err:?}"));
    DropsError::Transport {
        detail: format!("{context}: {detail}"),
    }
}
