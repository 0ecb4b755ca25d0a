//! fetch 传输层
//!
//! 使用 `web_sys::fetch` 实现客户端核心的 `HttpClient`，不引入额外的 HTTP crate。

use housekeeper_client::{HttpClient, HttpError, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// 浏览器 fetch 客户端
#[derive(Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    fn build(req: &HttpRequest) -> Result<Request, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("Headers: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("header {}: {:?}", key, e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))
    }

    async fn read_text(response: &Response) -> Result<String, HttpError> {
        let promise = response
            .text()
            .map_err(|e| HttpError::ResponseReadFailed(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ResponseReadFailed(format!("{:?}", e)))?;

        text.as_string()
            .ok_or_else(|| HttpError::ResponseReadFailed("body is not a string".to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let request = Self::build(&req)?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::Network("window is not available".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::Network(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::ResponseReadFailed(format!("not a Response: {:?}", e)))?;

        let status = response.status();
        let body = Self::read_text(&response).await?;
        Ok(HttpResponse::new(status, body))
    }
}
