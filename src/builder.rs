//! Builder Module
//!
//! Fluent Builder APIを提供し、`DeckGenerator`インスタンスを段階的に構築する。

use std::path::{Path, PathBuf};

use crate::api::DeckText;
use crate::composer::compose_with_text;
use crate::error::DeckError;
use crate::output::write_presentation;
use crate::parser::WorkbookReader;
use crate::security::SecurityConfig;
use crate::slides::PresentationDocument;
use crate::validator::validate_with_security;

/// デフォルトの入力ファイル
pub const DEFAULT_INPUT_PATH: &str = "data.xlsx";

/// デフォルトの出力ファイル
pub const DEFAULT_OUTPUT_PATH: &str = "presentation.pptx";

/// 生成処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct GeneratorConfig {
    /// 入力ワークブックのパス
    pub input_path: PathBuf,

    /// 出力PPTXのパス
    pub output_path: PathBuf,

    /// スライドに載せる定型文言
    pub deck_text: DeckText,

    /// セキュリティ制限
    pub security: SecurityConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            deck_text: DeckText::default(),
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxdeck::{DeckText, GeneratorBuilder};
///
/// # fn main() -> Result<(), xlsxdeck::DeckError> {
/// let generator = GeneratorBuilder::new()
///     .with_input_path("reports/october.xlsx")
///     .with_output_path("reports/october.pptx")
///     .with_deck_text(DeckText {
///         title: "October Report".to_string(),
///         ..DeckText::default()
///     })
///     .build()?;
/// generator.generate()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GeneratorBuilder {
    /// 内部設定（構築中）
    config: GeneratorConfig,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 入力: `data.xlsx`
    /// - 出力: `presentation.pptx`
    /// - 文言: `DeckText::default()`
    /// - 入力サイズ上限: 2GB
    /// - スライド枚数上限: 1,000枚
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }

    /// 入力ワークブックのパスを指定する
    pub fn with_input_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config.input_path = path.as_ref().to_path_buf();
        self
    }

    /// 出力PPTXのパスを指定する（既存ファイルは上書き）
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config.output_path = path.as_ref().to_path_buf();
        self
    }

    /// スライドの定型文言を差し替える
    pub fn with_deck_text(mut self, text: DeckText) -> Self {
        self.config.deck_text = text;
        self
    }

    /// 入力ファイルサイズの上限（バイト）を指定する
    pub fn with_max_input_file_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定行A2で許可するコンテンツスライド枚数の上限を指定する
    ///
    /// 上限を超える値は`DeckError::Validation`（`slide_count`）になります。
    pub fn with_max_slide_count(mut self, count: u32) -> Self {
        self.config.security.max_slide_count = count;
        self
    }

    /// 設定を検証し、`DeckGenerator`を生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `DeckError::Config(String)`: 設定の検証に失敗した場合
    ///   * 入力または出力のパスが空
    ///   * 入力サイズ上限またはスライド枚数上限が0
    pub fn build(self) -> Result<DeckGenerator, DeckError> {
        // 1. パスの検証
        if self.config.input_path.as_os_str().is_empty() {
            return Err(DeckError::Config("Input path must not be empty".to_string()));
        }
        if self.config.output_path.as_os_str().is_empty() {
            return Err(DeckError::Config("Output path must not be empty".to_string()));
        }

        // 2. セキュリティ設定の検証
        if self.config.security.max_input_file_size == 0 {
            return Err(DeckError::Config(
                "Maximum input file size must be greater than zero".to_string(),
            ));
        }
        if self.config.security.max_slide_count == 0 {
            return Err(DeckError::Config(
                "Maximum slide count must be greater than zero".to_string(),
            ));
        }

        Ok(DeckGenerator::from_config(self.config))
    }
}

/// 生成処理のファサード
///
/// ワークブックを読み込み、設定を検証し、スライドを組み立て、PPTXとして書き出します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxdeck::DeckGenerator;
///
/// # fn main() -> Result<(), xlsxdeck::DeckError> {
/// DeckGenerator::new("data.xlsx", "presentation.pptx").generate()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeckGenerator {
    /// 生成設定
    config: GeneratorConfig,
}

impl DeckGenerator {
    /// 入力と出力のパスを指定して生成する（その他はデフォルト設定）
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self::from_config(GeneratorConfig {
            input_path: input.as_ref().to_path_buf(),
            output_path: output.as_ref().to_path_buf(),
            ..GeneratorConfig::default()
        })
    }

    pub(crate) fn from_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// 入力ワークブックのパス
    pub fn input_path(&self) -> &Path {
        &self.config.input_path
    }

    /// 出力PPTXのパス
    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }

    /// パイプライン全体を実行する
    ///
    /// # 処理フロー
    ///
    /// 1. ワークブックを開く（FileAccess / Parse / Format）
    /// 2. 設定行を読み込んで検証する（Validation）
    /// 3. データシートを読み込む
    /// 4. スライドを組み立てる
    /// 5. PPTXを書き出す（FileAccess）
    ///
    /// 出力ファイルには手順5まで一切触れません。検証に失敗した場合は
    /// 出力ファイルは作成されません。
    pub fn generate(&self) -> Result<(), DeckError> {
        let document = self.build_document()?;
        write_presentation(&document, &self.config.output_path)
    }

    /// 書き出しの手前まで実行し、メモリ上の文書を返す
    pub fn build_document(&self) -> Result<PresentationDocument, DeckError> {
        let input = &self.config.input_path;

        // 1. ワークブックを開く
        let mut reader = WorkbookReader::open_with_security(input, &self.config.security)?;
        tracing::info!(
            path = %input.display(),
            sheets = reader.sheet_names().len(),
            "workbook opened"
        );

        // 2. 設定の検証
        let raw_settings = reader.read_settings_row()?;
        let settings = validate_with_security(&raw_settings, &self.config.security)?;
        tracing::info!(
            slide_count = settings.slide_count,
            title_font_size = settings.title_font_size,
            title_color = %settings.title_color,
            body_font_size = settings.body_font_size,
            "settings validated"
        );

        // 3. データシート
        let table = reader.read_data_grid()?;
        tracing::info!(
            rows = table.row_count(),
            columns = table.column_count(),
            "data grid read"
        );

        // 4. 文書の組み立て
        let document = compose_with_text(&settings, &table, &self.config.deck_text);
        tracing::info!(slides = document.len(), "presentation composed");

        Ok(document)
    }
}
