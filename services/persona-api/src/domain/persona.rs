/// ペルソナ情報モデル
///
/// DynamoDBのアイテム（PascalCase属性名）からデシリアライズし、
/// APIレスポンス（camelCaseフィールド名）としてシリアライズする。
/// 値の変換は行わず、フィールドを1対1で対応付けるだけ。
use serde::{Deserialize, Serialize};

/// 相性が未設定の場合の値
pub const NEUTRAL_AFFINITY: &str = "-";

/// ペルソナ1件分の情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "PascalCase"))]
pub struct Persona {
    /// テーブルのパーティションキー
    #[serde(rename(serialize = "id", deserialize = "ID"))]
    pub id: String,
    /// ペルソナ名（セカンダリインデックスのキー）
    pub persona_name: String,
    /// アルカナ
    pub arcana: String,
    /// 初期レベル
    pub level: u32,
    /// 継承系統
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits: Option<String>,
    #[serde(default)]
    pub stats: PersonaStats,
    #[serde(default)]
    pub affinities: Affinities,
    #[serde(default)]
    pub skills: Vec<PersonaSkill>,
}

/// 基礎パラメータ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "PascalCase"))]
#[serde(default)]
pub struct PersonaStats {
    pub strength: u32,
    pub magic: u32,
    pub endurance: u32,
    pub agility: u32,
    pub luck: u32,
}

/// 属性ごとの相性（"Weak", "Resist", "Null", "Repel", "Drain", "-"）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "PascalCase"))]
#[serde(default)]
pub struct Affinities {
    pub slash: String,
    pub strike: String,
    pub pierce: String,
    pub fire: String,
    pub ice: String,
    pub electric: String,
    pub wind: String,
    pub light: String,
    pub dark: String,
    pub almighty: String,
}

impl Default for Affinities {
    fn default() -> Self {
        let neutral = || NEUTRAL_AFFINITY.to_string();
        Self {
            slash: neutral(),
            strike: neutral(),
            pierce: neutral(),
            fire: neutral(),
            ice: neutral(),
            electric: neutral(),
            wind: neutral(),
            light: neutral(),
            dark: neutral(),
            almighty: neutral(),
        }
    }
}

/// 習得スキル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "PascalCase"))]
pub struct PersonaSkill {
    /// スキル名
    pub name: String,
    /// 習得レベル（初期習得は初期レベルと同じ）
    pub level: u32,
}
