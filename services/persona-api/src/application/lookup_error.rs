// ペルソナ検索のエラー分類
//
// すべての失敗はハンドラー境界でHTTPレスポンスに変換する。
// 500系は内部情報を漏らさないよう固定メッセージを返し、詳細はログにのみ出す。

use lambda_http::http::StatusCode;
use thiserror::Error;

use crate::application::ErrorKind;
use crate::infrastructure::{ConfigError, RepositoryError};

/// 400応答のメッセージ
pub const MISSING_NAME_MESSAGE: &str = "Path parameter personaName is required";
/// 404応答のメッセージ
pub const NOT_FOUND_MESSAGE: &str = "There is no Persona with that name";
/// 500応答のメッセージ
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

/// ペルソナ検索のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    /// personaNameが未指定・空
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 該当するペルソナが存在しない
    #[error("Persona not found: {0}")]
    NotFound(String),

    /// 環境設定の不備
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// DynamoDBへの接続失敗
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// DynamoDBのクエリ失敗
    #[error("Store error: {0}")]
    Store(String),

    /// アイテムのデシリアライズ、またはレスポンスのシリアライズ失敗
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<RepositoryError> for LookupError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ConnectionFailed(msg) => LookupError::Connectivity(msg),
            RepositoryError::ReadError(msg) => LookupError::Store(msg),
            RepositoryError::SerializationError(msg) => LookupError::Serialization(msg),
        }
    }
}

impl LookupError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
            LookupError::Configuration(_)
            | LookupError::Connectivity(_)
            | LookupError::Store(_)
            | LookupError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::InvalidInput(_) => ErrorKind::BadRequest,
            LookupError::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::InternalServerError,
        }
    }

    /// クライアントに返すメッセージ
    pub fn public_message(&self) -> &'static str {
        match self {
            LookupError::InvalidInput(_) => MISSING_NAME_MESSAGE,
            LookupError::NotFound(_) => NOT_FOUND_MESSAGE,
            _ => INTERNAL_ERROR_MESSAGE,
        }
    }
}
