use crate::database::error::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("データベースエラー: {0}")]
    Database(#[from] DbError),

    #[error("ルールファイルの読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("ルールファイルの解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}
