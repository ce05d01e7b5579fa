/// ペルソナ名検索 HTTP Lambdaエントリポイント
///
/// API Gateway（REST API / HTTP API）経由の `GET /personas/{personaName}` を処理し、
/// DynamoDBのセカンダリインデックスから取得したペルソナ情報をJSONで返す。
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use persona_api::application::{
    failure_response, LookupError, LookupRequest, PersonaLookupHandler, ResponseOptions,
};
use persona_api::infrastructure::{
    init_logging, ConfigError, DynamoDbConfig, DynamoPersonaRepository,
};
use tokio::sync::OnceCell;
use tracing::{error, info};

/// ハンドラーの静的インスタンス
///
/// Lambda warm start時に設定とDynamoDBクライアントを再利用するため、
/// 一度初期化したハンドラーを静的に保持する。
/// 初期化に失敗した場合は保持せず、次の呼び出しで再試行する。
static LOOKUP_HANDLER: OnceCell<PersonaLookupHandler<DynamoPersonaRepository>> =
    OnceCell::const_new();

/// ハンドラーを取得（初期化されていなければ初期化）
async fn lookup_handler() -> Result<&'static PersonaLookupHandler<DynamoPersonaRepository>, ConfigError>
{
    LOOKUP_HANDLER
        .get_or_try_init(|| async {
            let config = DynamoDbConfig::from_env().await?;
            let settings = config.settings();

            info!(
                table_name = settings.table_name(),
                index_name = settings.index_name(),
                cors_enabled = settings.cors_allow_origin().is_some(),
                "ペルソナ検索ハンドラーを初期化"
            );

            let options = ResponseOptions::new(settings.cors_allow_origin().cloned());
            Ok(PersonaLookupHandler::new(
                DynamoPersonaRepository::from_config(&config),
                options,
            ))
        })
        .await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("ペルソナ検索Lambda関数を初期化");

    run(service_fn(handler)).await
}

/// HTTPリクエストハンドラー
///
/// # 処理フロー
/// 1. リクエストからpersonaNameとパスを抽出
/// 2. ハンドラーを取得（初回のみ設定読み込みとクライアント作成）
/// 3. 検索してレスポンスを返却
///
/// personaNameが不正な場合は、設定の不備より優先して400を返す。
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    let lookup = LookupRequest::from_http_request(&request);

    let request_id = request
        .lambda_context_ref()
        .map(|ctx| ctx.request_id.as_str())
        .unwrap_or("unknown");

    info!(
        request_id = request_id,
        persona_name = lookup.raw_persona_name().unwrap_or_default(),
        path = lookup.path(),
        gateway = lookup.gateway().as_str(),
        "ペルソナ取得リクエスト受信"
    );

    let lookup_handler = match lookup_handler().await {
        Ok(lookup_handler) => lookup_handler,
        Err(err) => {
            error!(request_id = request_id, error = %err, "ペルソナ検索ハンドラーの初期化失敗");

            let failure = match lookup.persona_name() {
                Err(invalid) => invalid,
                Ok(_) => LookupError::from(err),
            };
            return Ok(failure_response(&failure, &lookup, &ResponseOptions::default()));
        }
    };

    Ok(lookup_handler.handle(&lookup).await)
}
