// レスポンス生成
//
// 成功時はペルソナJSON、失敗時は { kind, message, path } 形式のエラーJSONを返す。
// どちらもContent-Type: application/jsonを付与し、
// CORS許可オリジンが設定されている場合はAccess-Control-Allow-Originも付与する。

use lambda_http::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use lambda_http::http::{HeaderValue, StatusCode};
use lambda_http::{Body, Response};
use serde::{Deserialize, Serialize};

use crate::application::LookupError;

/// エラー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    InternalServerError,
}

/// エラーレスポンスのボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
    /// リクエストパス
    pub path: String,
}

impl ErrorBody {
    pub fn from_error(error: &LookupError, path: &str) -> Self {
        Self {
            kind: error.kind(),
            message: error.public_message().to_string(),
            path: path.to_string(),
        }
    }
}

/// レスポンスヘッダーの設定
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseOptions {
    cors_allow_origin: Option<HeaderValue>,
}

impl ResponseOptions {
    pub fn new(cors_allow_origin: Option<HeaderValue>) -> Self {
        Self { cors_allow_origin }
    }

    pub fn cors_allow_origin(&self) -> Option<&HeaderValue> {
        self.cors_allow_origin.as_ref()
    }
}

/// 200レスポンスを生成
pub fn success_response(body: String, options: &ResponseOptions) -> Response<Body> {
    build_response(StatusCode::OK, body, options)
}

/// エラーレスポンスを生成
pub fn error_response(error: &LookupError, path: &str, options: &ResponseOptions) -> Response<Body> {
    // 文字列と単純なenumだけなのでシリアライズは失敗しない
    let body = serde_json::to_string(&ErrorBody::from_error(error, path)).unwrap_or_default();
    build_response(error.status_code(), body, options)
}

fn build_response(status: StatusCode, body: String, options: &ResponseOptions) -> Response<Body> {
    let mut response = Response::new(Body::Text(body));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(origin) = options.cors_allow_origin() {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    }

    response
}
