use crate::storage::error::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("初期化エラー: {0}")]
    Init(#[from] InitProcessError),

    #[error("ルール検索エラー: {0}")]
    Rule(#[from] RuleError),

    #[error("検索結果の出力に失敗しました: {0}")]
    Output(#[from] serde_json::Error),
}

/// ホスト表記・CIDR表記のどちらとしても解釈できないアドレス式
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("アドレス形式が不正です: {0}")]
pub struct AddressFormatError(pub String);

#[derive(Error, Debug)]
pub enum RuleError {
    // 検索条件側の不正は「0件一致」とは区別して呼び出し元へ返す
    #[error("検索するIPまたはポートの形式を確認してください: {0}")]
    AddressFormat(#[from] AddressFormatError),

    #[error("ルールストアエラー: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum InitProcessError {
    #[error("ロガーのセットアップに失敗しました: {0}")]
    LoggerError(String),

    #[error("環境変数の取得に失敗しました: {0}")]
    EnvVarError(String),

    #[error("環境変数の解析に失敗しました: {0}")]
    EnvVarParseError(String),

    #[error("データベース接続エラー: {0}")]
    DatabaseConnectionError(String),

    #[error("マイグレーションに失敗しました: {0}")]
    MigrationError(String),

    #[error("ルールファイルの読み込みに失敗しました: {0}")]
    RuleFileError(String),
}
