//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::api::SettingsField;

/// xlsxdeckクレート全体で使用するエラー型
///
/// ワークブックの読み込み、設定の検証、スライドの生成、PPTXの書き出しで
/// 発生するすべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `FileAccess`: 入力ファイルが存在しない、読めない、出力先に書き込めない
/// - `Format`: ワークブックの構造が想定と異なる（シートが2枚未満など）
/// - `Validation`: 設定行（A2:D2）のいずれかの値が不正
/// - `Parse`: ワークブックの解析に失敗（calamine由来）
///
/// いずれのエラーもパイプライン全体を中断します。リトライや部分的な成功はありません。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxdeck::{DeckError, DeckGenerator};
///
/// let generator = DeckGenerator::new("data.xlsx", "presentation.pptx");
/// match generator.generate() {
///     Err(DeckError::Validation { field, message }) => {
///         eprintln!("{} is invalid: {}", field, message);
///     }
///     Err(e) => eprintln!("{}", e),
///     Ok(()) => {}
/// }
/// ```
#[derive(Error, Debug)]
pub enum DeckError {
    /// ファイルアクセスエラー
    ///
    /// 入力ファイルが存在しない・読み込めない場合、または出力ファイルを
    /// 作成・書き込みできない場合に発生します。対象のパスを保持します。
    #[error("File access error at '{}': {source}", path.display())]
    FileAccess {
        /// アクセスに失敗したパス
        path: PathBuf,
        /// 元のI/Oエラー
        #[source]
        source: std::io::Error,
    },

    /// ワークブックの構造エラー
    ///
    /// 設定シートとデータシートの2枚が揃っていない場合などに発生します。
    #[error("Invalid workbook format: {0}")]
    Format(String),

    /// 設定値の検証エラー
    ///
    /// 設定行のうち最初に見つかった不正なフィールドを示します。
    /// `field`の表示名は `slide_count` / `font_size` / `color` のいずれかです。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsxdeck::{DeckError, SettingsField};
    ///
    /// let error = DeckError::Validation {
    ///     field: SettingsField::TitleColor,
    ///     message: "expected 6 hex digits, got 'ZZZZZZ'".to_string(),
    /// };
    ///
    /// println!("{}", error);
    /// // 出力: "Validation error in color (C2): expected 6 hex digits, got 'ZZZZZZ'"
    /// ```
    #[error("Validation error in {field} ({}): {message}", field.cell())]
    Validation {
        /// 不正だったフィールド
        field: SettingsField,
        /// 詳細メッセージ
        message: String,
    },

    /// ワークブックの解析中に発生したエラー
    ///
    /// calamineクレートがファイルを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// ZIPアーカイブの書き込みエラー
    ///
    /// PPTXファイル（ZIPアーカイブ）を組み立てる際に発生したエラーです。
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// XMLパーツの生成エラー
    #[error("XML generation error: {0}")]
    Xml(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `GeneratorBuilder::build()`時に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限を超えた場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// メモリ上のI/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeckError {
    /// パス付きのファイルアクセスエラーを生成する
    pub fn file_access(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        DeckError::FileAccess {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// 検証エラーの場合、不正だったフィールドを返す
    pub fn validation_field(&self) -> Option<SettingsField> {
        match self {
            DeckError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for DeckError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io_err) => DeckError::Io(io_err),
            other => DeckError::Zip(other.to_string()),
        }
    }
}

impl From<std::fmt::Error> for DeckError {
    fn from(err: std::fmt::Error) -> Self {
        DeckError::Xml(err.to_string())
    }
}
