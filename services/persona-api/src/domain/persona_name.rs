/// ペルソナ名
///
/// 空文字列や空白のみの名前はストアへの問い合わせ前に弾く。
/// 値はトリムせず、受け取ったままの文字列で検索に使う。
use std::fmt;
use thiserror::Error;

/// ペルソナ名の検証エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersonaNameError {
    #[error("persona name is blank")]
    Blank,
}

/// 検証済みのペルソナ名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaName(String);

impl PersonaName {
    /// 名前を検証して作成
    ///
    /// # Returns
    /// * 空白以外の文字を含む場合は`Ok(PersonaName)`
    /// * 空文字列・空白のみの場合は`Err(PersonaNameError::Blank)`
    pub fn new(value: impl Into<String>) -> Result<Self, PersonaNameError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PersonaNameError::Blank);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        let name = PersonaName::new("Joker").unwrap();
        assert_eq!(name.as_str(), "Joker");
        assert_eq!(name.to_string(), "Joker");
    }

    #[test]
    fn test_empty_name_is_blank() {
        assert_eq!(PersonaName::new(""), Err(PersonaNameError::Blank));
    }

    #[test]
    fn test_whitespace_name_is_blank() {
        assert_eq!(PersonaName::new("   "), Err(PersonaNameError::Blank));
        assert_eq!(PersonaName::new("\t\n"), Err(PersonaNameError::Blank));
    }

    /// 前後の空白は保持される（検索には受け取った値をそのまま使う）
    #[test]
    fn test_name_is_not_trimmed() {
        let name = PersonaName::new(" Jack Frost ").unwrap();
        assert_eq!(name.as_str(), " Jack Frost ");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(PersonaNameError::Blank.to_string(), "persona name is blank");
    }
}
