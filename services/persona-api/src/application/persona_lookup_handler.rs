// ペルソナ検索ハンドラー
//
// 名前の検証 -> インデックス検索 -> レスポンス生成を順に行う。
// 失敗はすべてここでステータスコード付きのレスポンスに変換し、
// Lambda関数自体はエラーを返さない。

use lambda_http::{Body, Response};
use tracing::{error, info, warn};

use crate::application::{
    error_response, success_response, LookupError, LookupRequest, ResponseOptions,
};
use crate::infrastructure::PersonaRepository;

/// ペルソナ名で1件取得するハンドラー
pub struct PersonaLookupHandler<PR>
where
    PR: PersonaRepository,
{
    /// ペルソナリポジトリ
    repository: PR,
    /// レスポンスヘッダー設定
    options: ResponseOptions,
}

impl<PR> PersonaLookupHandler<PR>
where
    PR: PersonaRepository,
{
    pub fn new(repository: PR, options: ResponseOptions) -> Self {
        Self {
            repository,
            options,
        }
    }

    /// 検索リクエストを処理してHTTPレスポンスを返す
    pub async fn handle(&self, request: &LookupRequest) -> Response<Body> {
        match self.lookup(request).await {
            Ok(body) => {
                info!(path = request.path(), status = 200, "ペルソナ取得成功");
                success_response(body, &self.options)
            }
            Err(err) => failure_response(&err, request, &self.options),
        }
    }

    /// ペルソナを検索してJSON文字列を返す
    ///
    /// # 処理フロー
    /// 1. personaNameを検証（不正ならストアに問い合わせない）
    /// 2. セカンダリインデックスを検索
    /// 3. 0件ならNotFound
    /// 4. 最初の1件をJSONにシリアライズ
    pub async fn lookup(&self, request: &LookupRequest) -> Result<String, LookupError> {
        let name = request.persona_name()?;

        let persona = self
            .repository
            .find_first_by_name(&name)
            .await?
            .ok_or_else(|| LookupError::NotFound(name.to_string()))?;

        serde_json::to_string(&persona).map_err(|e| LookupError::Serialization(e.to_string()))
    }
}

/// 失敗をログに出力し、エラーレスポンスを生成
///
/// 500系は原因をerrorレベルで記録する（レスポンスには含めない）。
pub fn failure_response(
    err: &LookupError,
    request: &LookupRequest,
    options: &ResponseOptions,
) -> Response<Body> {
    let status = err.status_code().as_u16();
    match err {
        LookupError::InvalidInput(_) => {
            warn!(path = request.path(), status, error = %err, "不正なリクエスト");
        }
        LookupError::NotFound(_) => {
            info!(path = request.path(), status, error = %err, "ペルソナが見つからない");
        }
        _ => {
            error!(path = request.path(), status, error = %err, "ペルソナ取得失敗");
        }
    }

    error_response(err, request.path(), options)
}
