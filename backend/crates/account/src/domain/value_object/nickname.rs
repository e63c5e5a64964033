//! Nickname Value Object
//!
//! ニックネームはアカウントの**公開表示名**。ログインには使用しない。
//!
//! ## 設計方針
//! - ASCII英数字と `_` `-` のみ許可
//! - 登録時に指定がなければ `形容詞_動物_数字` 形式で自動生成
//! - 一意性はデータベースの UNIQUE 制約で保証（生成側は衝突時に再生成）
//!
//! ## 不変条件
//! - 長さ: 3〜30文字
//! - 先頭は英数字

use kernel::error::app_error::{AppError, AppResult};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NICKNAME_MIN_LENGTH: usize = 3;
pub const NICKNAME_MAX_LENGTH: usize = 30;

const RESERVED_NICKNAMES: &[&str] = &["admin", "administrator", "root", "system", "support", "me"];

const ADJECTIVES: &[&str] = &[
    "brave", "calm", "clever", "eager", "fancy", "gentle", "happy", "jolly", "kind", "lively",
    "mighty", "nimble", "proud", "quiet", "rapid", "shiny", "swift", "witty", "zesty", "bold",
];

const ANIMALS: &[&str] = &[
    "badger", "beaver", "falcon", "fox", "gecko", "heron", "koala", "lemur", "lynx", "marten",
    "otter", "panda", "puffin", "raven", "salmon", "tiger", "turtle", "walrus", "wombat", "yak",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(nickname: impl AsRef<str>) -> AppResult<Self> {
        let nickname = nickname.as_ref().trim();
        let len = nickname.chars().count();

        if !(NICKNAME_MIN_LENGTH..=NICKNAME_MAX_LENGTH).contains(&len) {
            return Err(AppError::bad_request(format!(
                "Nickname must be {NICKNAME_MIN_LENGTH}-{NICKNAME_MAX_LENGTH} characters (got {len})"
            )));
        }
        if !nickname
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AppError::bad_request(
                "Nickname may only contain letters, digits, '_' and '-'",
            ));
        }
        if !nickname.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            return Err(AppError::bad_request("Nickname must start with a letter or digit"));
        }
        if RESERVED_NICKNAMES.contains(&nickname.to_ascii_lowercase().as_str()) {
            return Err(AppError::bad_request("This nickname is reserved")
                .with_action("Please choose a different nickname"));
        }

        Ok(Self(nickname.to_string()))
    }

    /// Random `adjective_animal_NNN` nickname; always satisfies [`Nickname::new`]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("brave");
        let animal = ANIMALS.choose(&mut rng).copied().unwrap_or("otter");
        let number: u16 = rng.random_range(0..1000);
        Self(format!("{adjective}_{animal}_{number:03}"))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(nickname: impl Into<String>) -> Self {
        Self(nickname.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
