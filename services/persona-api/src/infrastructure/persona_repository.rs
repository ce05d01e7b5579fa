/// DynamoDBのセカンダリインデックスからペルソナを検索するリポジトリ
///
/// ペルソナ名はテーブル上で一意である保証がないため、
/// 複数ヒットした場合はDynamoDBが最初に返した1件を採用する。
/// 同名アイテム間の順序は未定義。
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;
use tracing::debug;

use crate::domain::{Persona, PersonaName};
use crate::infrastructure::DynamoDbConfig;

/// インデックスのパーティションキー属性名
pub const PERSONA_NAME_ATTRIBUTE: &str = "PersonaName";

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBへの接続に失敗（送信失敗・タイムアウト）
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// アイテムのデシリアライズに失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// ペルソナ検索用トレイト
///
/// 実際のDynamoDB実装とテスト用モックを差し替えられるようにする。
#[async_trait]
pub trait PersonaRepository: Send + Sync {
    /// ペルソナ名で検索し、最初に見つかった1件を返す
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(Persona))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * 失敗時は`Err(RepositoryError)`
    async fn find_first_by_name(&self, name: &PersonaName)
        -> Result<Option<Persona>, RepositoryError>;
}

/// PersonaRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoPersonaRepository {
    client: DynamoDbClient,
    table_name: String,
    index_name: String,
}

impl DynamoPersonaRepository {
    pub fn new(client: DynamoDbClient, table_name: String, index_name: String) -> Self {
        Self {
            client,
            table_name,
            index_name,
        }
    }

    /// 共有設定からリポジトリを作成
    pub fn from_config(config: &DynamoDbConfig) -> Self {
        Self::new(
            config.client().clone(),
            config.settings().table_name().to_string(),
            config.settings().index_name().to_string(),
        )
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }
}

#[async_trait]
impl PersonaRepository for DynamoPersonaRepository {
    async fn find_first_by_name(
        &self,
        name: &PersonaName,
    ) -> Result<Option<Persona>, RepositoryError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.index_name)
            .key_condition_expression(format!("{PERSONA_NAME_ATTRIBUTE} = :personaName"))
            .expression_attribute_values(":personaName", AttributeValue::S(name.to_string()))
            .limit(1)
            .send()
            .await
            .map_err(classify_sdk_error)?;

        let items = result.items.unwrap_or_default();
        debug!(
            table_name = %self.table_name,
            index_name = %self.index_name,
            persona_name = %name,
            item_count = items.len(),
            "ペルソナ検索完了"
        );

        items.into_iter().next().map(decode_persona).transpose()
    }
}

/// DynamoDBアイテムをペルソナに変換
pub fn decode_persona(item: HashMap<String, AttributeValue>) -> Result<Persona, RepositoryError> {
    serde_dynamo::from_item(item).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

/// SDKエラーを分類
///
/// 送信失敗とタイムアウトは接続エラー、それ以外（サービスエラー、
/// リクエスト構築失敗、レスポンス解析失敗）は読み取りエラーとする。
fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> RepositoryError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            RepositoryError::ConnectionFailed(message)
        }
        _ => RepositoryError::ReadError(message),
    }
}
