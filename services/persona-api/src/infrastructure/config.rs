/// ペルソナ検索用のDynamoDB接続設定
///
/// 環境変数:
/// - DYNAMODB_TABLE_NAME: ペルソナテーブル名（必須）
/// - PERSONA_INDEX_NAME: ペルソナ名のセカンダリインデックス名（省略時: PersonaIndex）
/// - CORS_ALLOW_ORIGIN: Access-Control-Allow-Originに設定する値（省略時はヘッダーを付与しない）
use aws_sdk_dynamodb::Client as DynamoDbClient;
use lambda_http::http::HeaderValue;
use thiserror::Error;

/// テーブル名の環境変数
pub const TABLE_NAME_ENV: &str = "DYNAMODB_TABLE_NAME";
/// インデックス名の環境変数
pub const INDEX_NAME_ENV: &str = "PERSONA_INDEX_NAME";
/// CORS許可オリジンの環境変数
pub const CORS_ALLOW_ORIGIN_ENV: &str = "CORS_ALLOW_ORIGIN";
/// デフォルトのセカンダリインデックス名
pub const DEFAULT_INDEX_NAME: &str = "PersonaIndex";

/// 設定読み込みのエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment variable {name}: {reason}")]
    InvalidEnvVar { name: String, reason: String },
}

/// 環境変数から読み込む検索設定
#[derive(Debug, Clone, PartialEq)]
pub struct LookupSettings {
    table_name: String,
    index_name: String,
    cors_allow_origin: Option<HeaderValue>,
}

impl LookupSettings {
    /// 明示的な値で作成（CORSヘッダーなし）
    pub fn new(table_name: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            index_name: index_name.into(),
            cors_allow_origin: None,
        }
    }

    /// プロセスの環境変数から読み込み
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// 任意の変数ソースから読み込み
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|value| !value.trim().is_empty());

        let table_name = non_empty(TABLE_NAME_ENV)
            .ok_or_else(|| ConfigError::MissingEnvVar(TABLE_NAME_ENV.to_string()))?;

        let index_name =
            non_empty(INDEX_NAME_ENV).unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());

        let cors_allow_origin = non_empty(CORS_ALLOW_ORIGIN_ENV)
            .map(|origin| {
                HeaderValue::from_str(&origin).map_err(|e| ConfigError::InvalidEnvVar {
                    name: CORS_ALLOW_ORIGIN_ENV.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            table_name,
            index_name,
            cors_allow_origin,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn cors_allow_origin(&self) -> Option<&HeaderValue> {
        self.cors_allow_origin.as_ref()
    }
}

/// DynamoDBクライアントと検索設定
///
/// Lambdaのwarm start間で再利用するため、プロセスにつき1度だけ作成する。
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    settings: LookupSettings,
}

impl DynamoDbConfig {
    /// 環境変数から設定を読み込み、DynamoDBクライアントを作成
    ///
    /// テーブル名が未設定の場合はAWS設定を読み込む前にエラーを返す。
    pub async fn from_env() -> Result<Self, ConfigError> {
        let settings = LookupSettings::from_env()?;

        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        Ok(Self { client, settings })
    }

    /// 明示的な値で作成（テスト用）
    pub fn new(client: DynamoDbClient, settings: LookupSettings) -> Self {
        Self { client, settings }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    pub fn settings(&self) -> &LookupSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    unsafe fn cleanup_env() {
        unsafe {
            remove_env(TABLE_NAME_ENV);
            remove_env(INDEX_NAME_ENV);
            remove_env(CORS_ALLOW_ORIGIN_ENV);
        }
    }

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn settings_from(pairs: &[(&str, &str)]) -> Result<LookupSettings, ConfigError> {
        let vars = vars(pairs);
        LookupSettings::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_missing_env_var_error_display() {
        let error = ConfigError::MissingEnvVar("DYNAMODB_TABLE_NAME".to_string());
        assert_eq!(
            error.to_string(),
            "Missing environment variable: DYNAMODB_TABLE_NAME"
        );
    }

    #[test]
    fn test_invalid_env_var_error_display() {
        let error = ConfigError::InvalidEnvVar {
            name: "CORS_ALLOW_ORIGIN".to_string(),
            reason: "bad byte".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid environment variable CORS_ALLOW_ORIGIN: bad byte"
        );
    }

    #[test]
    fn test_table_name_only_uses_defaults() {
        let settings = settings_from(&[(TABLE_NAME_ENV, "p3r-personas")]).unwrap();

        assert_eq!(settings.table_name(), "p3r-personas");
        assert_eq!(settings.index_name(), DEFAULT_INDEX_NAME);
        assert!(settings.cors_allow_origin().is_none());
    }

    #[test]
    fn test_missing_table_name() {
        let result = settings_from(&[(INDEX_NAME_ENV, "PersonaIndex")]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingEnvVar(TABLE_NAME_ENV.to_string())
        );
    }

    /// 空文字列のテーブル名は未設定扱い
    #[test]
    fn test_empty_table_name_is_missing() {
        let result = settings_from(&[(TABLE_NAME_ENV, "")]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingEnvVar(TABLE_NAME_ENV.to_string())
        );
    }

    #[test]
    fn test_all_values_set() {
        let settings = settings_from(&[
            (TABLE_NAME_ENV, "p3r-personas"),
            (INDEX_NAME_ENV, "NameIndex"),
            (CORS_ALLOW_ORIGIN_ENV, "https://compendium.example.com"),
        ])
        .unwrap();

        assert_eq!(settings.table_name(), "p3r-personas");
        assert_eq!(settings.index_name(), "NameIndex");
        assert_eq!(
            settings.cors_allow_origin().unwrap(),
            "https://compendium.example.com"
        );
    }

    #[test]
    fn test_invalid_cors_origin() {
        let result = settings_from(&[
            (TABLE_NAME_ENV, "p3r-personas"),
            (CORS_ALLOW_ORIGIN_ENV, "https://example.com\n"),
        ]);

        match result.unwrap_err() {
            ConfigError::InvalidEnvVar { name, .. } => assert_eq!(name, CORS_ALLOW_ORIGIN_ENV),
            other => panic!("Expected InvalidEnvVar, got {other:?}"),
        }
    }

    #[test]
    #[serial(persona_env)]
    fn test_from_env_reads_process_environment() {
        unsafe {
            cleanup_env();
            set_env(TABLE_NAME_ENV, "env-personas");
            set_env(CORS_ALLOW_ORIGIN_ENV, "*");
        }

        let settings = LookupSettings::from_env().unwrap();
        assert_eq!(settings.table_name(), "env-personas");
        assert_eq!(settings.index_name(), DEFAULT_INDEX_NAME);
        assert_eq!(settings.cors_allow_origin().unwrap(), "*");

        unsafe { cleanup_env() };
    }

    #[tokio::test]
    #[serial(persona_env)]
    async fn test_dynamodb_config_from_env_missing_table() {
        unsafe { cleanup_env() };

        let result = DynamoDbConfig::from_env().await;
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingEnvVar(TABLE_NAME_ENV.to_string())
        );
    }

    #[tokio::test]
    async fn test_dynamodb_config_new() {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        let config = DynamoDbConfig::new(client, LookupSettings::new("test-personas", "TestIndex"));

        assert_eq!(config.settings().table_name(), "test-personas");
        assert_eq!(config.settings().index_name(), "TestIndex");
        let _client_ref = config.client();
    }
}
