//! HTTP side of the server contract: endpoint URLs, payload helpers and the
//! `fetch` calls.

#[cfg(test)]
#[path = "net_test.rs"]
mod net_test;

use js_sys::Uint8Array;
use url::Url;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response, Window};

use pixelplace_shared::{decode_canvas, CanvasBitmap, PackedColor, Pixel};

use crate::error::ClientError;

#[derive(Clone, Debug, PartialEq)]
pub struct Endpoints {
    pub events: Url,
    pub canvas: Url,
    pub palette: Url,
    pub pixel: Url,
}

impl Endpoints {
    /// Resolves the endpoints under `base`, treating it as a directory.
    pub fn new(base: &Url) -> Result<Self, ClientError> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            events: base.join("events")?,
            canvas: base.join("canvas")?,
            palette: base.join("palette")?,
            pixel: base.join("pixel")?,
        })
    }
}

pub fn pixel_body(pixel: &Pixel) -> Result<String, ClientError> {
    Ok(serde_json::to_string(pixel)?)
}

pub fn parse_pixel(text: &str) -> Result<Pixel, ClientError> {
    Ok(serde_json::from_str(text)?)
}

pub fn parse_palette(text: &str) -> Result<Vec<PackedColor>, ClientError> {
    Ok(serde_json::from_str(text)?)
}

async fn send(window: &Window, url: &Url, init: &RequestInit) -> Result<Response, ClientError> {
    let request = Request::new_with_str_and_init(url.as_str(), init)?;
    let value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let response: Response = value.dyn_into()?;
    if !response.ok() {
        return Err(ClientError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    Ok(response)
}

fn get_init(accept: &str) -> Result<RequestInit, ClientError> {
    let headers = Headers::new()?;
    headers.set("Accept", accept)?;
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_headers(&headers);
    Ok(init)
}

async fn response_text(response: &Response) -> Result<String, ClientError> {
    let text = JsFuture::from(response.text()?).await?;
    text.as_string()
        .ok_or_else(|| ClientError::Js("response body is not text".to_string()))
}

pub async fn fetch_canvas(window: &Window, url: &Url) -> Result<CanvasBitmap, ClientError> {
    let init = get_init("application/octet-stream")?;
    let response = send(window, url, &init).await?;
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(decode_canvas(bytes)?)
}

pub async fn fetch_palette(window: &Window, url: &Url) -> Result<Vec<PackedColor>, ClientError> {
    let init = get_init("application/json")?;
    let response = send(window, url, &init).await?;
    parse_palette(&response_text(&response).await?)
}

pub async fn post_pixel(window: &Window, url: &Url, pixel: &Pixel) -> Result<(), ClientError> {
    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&pixel_body(pixel)?.into());
    send(window, url, &init).await?;
    Ok(())
}
