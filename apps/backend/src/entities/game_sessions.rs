use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SessionMode {
    #[sea_orm(string_value = "letter-guess")]
    LetterGuess,
    #[sea_orm(string_value = "word-guess")]
    WordGuess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SessionStatus {
    #[sea_orm(string_value = "playing")]
    Playing,
    #[sea_orm(string_value = "won")]
    Won,
    #[sea_orm(string_value = "lost")]
    Lost,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "owner_id")]
    pub owner_id: i64,
    pub name: Option<String>,
    #[sea_orm(column_name = "secret_word")]
    pub secret_word: String,
    pub mode: SessionMode,
    #[sea_orm(column_name = "max_attempts")]
    pub max_attempts: i16,
    #[sea_orm(column_name = "remaining_attempts")]
    pub remaining_attempts: i16,
    /// Tried letters in order, concatenated.
    #[sea_orm(column_name = "guessed_letters")]
    pub guessed_letters: String,
    /// JSON array of `{guess, feedback}` records.
    #[sea_orm(column_name = "guessed_words", column_type = "Text")]
    pub guessed_words: String,
    pub status: SessionStatus,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
