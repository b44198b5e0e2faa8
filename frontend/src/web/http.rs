//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 实现核心库的 [`HttpClient`] 特性。
//! 非 2xx 响应照常返回，由 API 层解析错误信息；只有请求未能发出时才返回错误。

use atelier::{ClientError, HttpClient, HttpRequest, HttpResponse, MultipartFile, RequestBody};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, FormData, Headers, Request, RequestInit, Response};

type Result<T> = std::result::Result<T, ClientError>;

fn js_error(context: &str, e: JsValue) -> ClientError {
    ClientError::network(format!("{context}: {e:?}"))
}

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    fn build_body(body: &RequestBody) -> Result<JsValue> {
        match body {
            RequestBody::Json(text) => Ok(JsValue::from_str(text)),
            RequestBody::Multipart(file) => {
                let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                let parts = js_sys::Array::of1(&bytes);
                let options = BlobPropertyBag::new();
                options.set_type(&file.content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                    .map_err(|e| js_error("创建 Blob 失败", e))?;

                let form = FormData::new().map_err(|e| js_error("创建 FormData 失败", e))?;
                form.append_with_blob_and_filename(&file.field, &blob, &file.file_name)
                    .map_err(|e| js_error("添加上传文件失败", e))?;
                Ok(form.into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let headers = Headers::new().map_err(|e| js_error("创建 Headers 失败", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| js_error("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&Self::build_body(body)?);
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| js_error("构建请求失败", e))?;

        let window =
            web_sys::window().ok_or_else(|| ClientError::network("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("网络错误", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_error("Response 类型转换失败", e))?;

        let status = response.status();
        let promise = response
            .text()
            .map_err(|e| js_error("读取响应失败", e))?;
        let body = JsFuture::from(promise)
            .await
            .map_err(|e| js_error("读取响应失败", e))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}

/// 读取 `<input type="file">` 选中的文件
///
/// 字段名由上传接口统一设置，这里留空。
pub async fn read_file(file: File) -> Result<MultipartFile> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| js_error("读取文件失败", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(MultipartFile {
        field: String::new(),
        file_name: file.name(),
        content_type: file.type_(),
        bytes,
    })
}
