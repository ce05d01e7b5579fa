// API Gatewayリクエストの正規化
//
// REST API（v1プロキシ統合）とHTTP API（v2）のイベントはlambda_httpが
// 同じhttp::Requestに変換するため、抽出処理は1つだけ持つ。
// ただしuri()のパスはv1だとステージ付き・エンコード済みになるので、
// エラーボディのパスはイベント本来のパスをデコードして使う。

use lambda_http::request::RequestContext;
use lambda_http::{Request, RequestExt};
use percent_encoding::percent_decode_str;

use crate::application::LookupError;
use crate::domain::PersonaName;

/// ペルソナ名のパスパラメータ名
pub const PERSONA_NAME_PARAM: &str = "personaName";

/// リクエストを配送したゲートウェイの種別（ログ用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayKind {
    /// API Gateway REST API（ペイロードv1）
    RestApi,
    /// API Gateway HTTP API（ペイロードv2）
    HttpApi,
    /// その他（ALB、テストなど）
    Other,
}

impl GatewayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayKind::RestApi => "rest_api",
            GatewayKind::HttpApi => "http_api",
            GatewayKind::Other => "other",
        }
    }
}

/// 正規化済みの検索リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// パスパラメータの値（未検証）
    persona_name: Option<String>,
    /// リクエストパス（エラーレスポンスに含める）
    path: String,
    gateway: GatewayKind,
}

impl LookupRequest {
    pub fn new(persona_name: Option<String>, path: impl Into<String>) -> Self {
        Self {
            persona_name,
            path: path.into(),
            gateway: GatewayKind::Other,
        }
    }

    /// lambda_httpのリクエストから作成
    pub fn from_http_request(request: &Request) -> Self {
        let persona_name = request
            .path_parameters()
            .first(PERSONA_NAME_PARAM)
            .map(str::to_string);

        let gateway = match request.request_context_ref() {
            Some(RequestContext::ApiGatewayV1(_)) => GatewayKind::RestApi,
            Some(RequestContext::ApiGatewayV2(_)) => GatewayKind::HttpApi,
            _ => GatewayKind::Other,
        };

        Self {
            persona_name,
            path: request_path(request, gateway),
            gateway,
        }
    }

    /// 検証済みのペルソナ名を取得
    ///
    /// 未指定・空文字列・空白のみの場合は`LookupError::InvalidInput`
    pub fn persona_name(&self) -> Result<PersonaName, LookupError> {
        let raw = self.persona_name.as_deref().ok_or_else(|| {
            LookupError::InvalidInput(format!("path parameter {PERSONA_NAME_PARAM} is missing"))
        })?;

        PersonaName::new(raw).map_err(|e| {
            LookupError::InvalidInput(format!("path parameter {PERSONA_NAME_PARAM}: {e}"))
        })
    }

    /// 未検証のペルソナ名（ログ用）
    pub fn raw_persona_name(&self) -> Option<&str> {
        self.persona_name.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn gateway(&self) -> GatewayKind {
        self.gateway
    }
}

/// ステージを含まない、デコード済みのリクエストパス
///
/// - REST API: イベントの`path`はデコード済みなのでそのまま使う
/// - HTTP API: `rawPath`はエンコード済みなのでデコードする
/// - その他: イベント由来のパスがなければ`uri()`のパスをデコードする
fn request_path(request: &Request, gateway: GatewayKind) -> String {
    let raw = request.raw_http_path();
    if gateway == GatewayKind::RestApi && !raw.is_empty() {
        return raw.to_string();
    }

    let encoded = if raw.is_empty() { request.uri().path() } else { raw };
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}
