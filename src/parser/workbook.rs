//! Workbook Reader
//!
//! calamineのラッパーとして、設定行とデータグリッドの読み込みを提供します。

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::api::SettingsField;
use crate::error::DeckError;
use crate::formatter::CellFormatter;
use crate::grid::DataTable;
use crate::security::SecurityConfig;
use crate::types::{CellCoord, RawSettingsRow, SETTINGS_ROW};

/// 設定シートのインデックス（1枚目）
const SETTINGS_SHEET: usize = 0;

/// データシートのインデックス（2枚目）
const DATA_SHEET: usize = 1;

/// ワークブックリーダー
///
/// ファイル全体をメモリに読み込んでから解析するため、ファイルハンドルは
/// `open()`の中で閉じられます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxdeck::WorkbookReader;
///
/// # fn main() -> Result<(), xlsxdeck::DeckError> {
/// let mut reader = WorkbookReader::open("data.xlsx")?;
/// let settings_row = reader.read_settings_row()?;
/// let table = reader.read_data_grid()?;
/// println!("{:?} / {} rows", settings_row, table.row_count());
/// # Ok(())
/// # }
/// ```
pub struct WorkbookReader {
    /// calamineのワークブック（形式は自動判別）
    workbook: Sheets<Cursor<Vec<u8>>>,

    /// シート名（ワークブック内の順序）
    sheet_names: Vec<String>,

    /// セルフォーマッター
    formatter: CellFormatter,
}

impl WorkbookReader {
    /// ファイルパスからワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookReader)` - 読み込みに成功した場合
    /// * `Err(DeckError::FileAccess)` - ファイルが存在しない、または読み込めない場合
    /// * `Err(DeckError::Parse)` - ワークブックとして解析できない場合
    /// * `Err(DeckError::Format)` - ワークシートが2枚未満の場合
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        Self::open_with_security(path, &SecurityConfig::default())
    }

    /// セキュリティ設定を指定してワークブックを開く
    pub(crate) fn open_with_security(
        path: impl AsRef<Path>,
        security_config: &SecurityConfig,
    ) -> Result<Self, DeckError> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| DeckError::file_access(path, e))?;

        // 読み込み前にサイズ上限を確認
        let file_size = file
            .metadata()
            .map_err(|e| DeckError::file_access(path, e))?
            .len();
        security_config
            .check_input_size(file_size)
            .map_err(DeckError::SecurityViolation)?;

        let mut buffer = Vec::with_capacity(file_size as usize);
        file.read_to_end(&mut buffer)
            .map_err(|e| DeckError::file_access(path, e))?;
        drop(file);

        tracing::debug!(path = %path.display(), bytes = buffer.len(), "workbook loaded");

        Self::from_bytes(buffer, security_config)
    }

    /// 任意のリーダーからワークブックを開く（メモリ上のデータ用）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::io::Cursor;
    /// use xlsxdeck::WorkbookReader;
    ///
    /// # fn main() -> Result<(), xlsxdeck::DeckError> {
    /// let excel_data: Vec<u8> = vec![]; // Excelファイルのバイト列
    /// let reader = WorkbookReader::from_reader(Cursor::new(excel_data))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DeckError> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Self::from_bytes(buffer, &SecurityConfig::default())
    }

    fn from_bytes(buffer: Vec<u8>, security_config: &SecurityConfig) -> Result<Self, DeckError> {
        security_config
            .check_input_size(buffer.len() as u64)
            .map_err(DeckError::SecurityViolation)?;

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        let sheet_names = workbook.sheet_names();

        if sheet_names.len() < 2 {
            return Err(DeckError::Format(format!(
                "Workbook must contain at least 2 sheets (settings + data), found {}",
                sheet_names.len()
            )));
        }

        Ok(Self {
            workbook,
            sheet_names,
            formatter: CellFormatter::new(),
        })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// 設定シートの2行目（A2:D2）を読み込む
    ///
    /// 値は文字列に正規化されるだけで、検証は行いません。
    pub fn read_settings_row(&mut self) -> Result<RawSettingsRow, DeckError> {
        let range = self.sheet_range(SETTINGS_SHEET)?;

        let values = SettingsField::ALL.map(|field| {
            let coord = CellCoord::new(SETTINGS_ROW, field.column());
            range
                .get_value(coord.as_calamine())
                .and_then(|cell| self.formatter.format_cell(cell))
        });

        tracing::debug!(sheet = %self.sheet_names[SETTINGS_SHEET], ?values, "settings row read");

        Ok(RawSettingsRow::new(values))
    }

    /// データシートの全セルを読み込む
    ///
    /// 行・列の順序は保持され、末尾の空行・空列は除外されます。
    pub fn read_data_grid(&mut self) -> Result<DataTable, DeckError> {
        let range = self.sheet_range(DATA_SHEET)?;
        let table = DataTable::from_range(&range, &self.formatter);

        if table.is_empty() {
            tracing::warn!(sheet = %self.sheet_names[DATA_SHEET], "data sheet is empty");
        }

        Ok(table)
    }

    /// シートのセル範囲を取得（内部ヘルパー）
    fn sheet_range(&mut self, index: usize) -> Result<Range<Data>, DeckError> {
        match self.workbook.worksheet_range_at(index) {
            Some(range) => Ok(range?),
            None => Err(DeckError::Format(format!(
                "Worksheet at index {} is missing (total: {})",
                index,
                self.sheet_names.len()
            ))),
        }
    }
}

impl std::fmt::Debug for WorkbookReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkbookReader")
            .field("sheet_names", &self.sheet_names)
            .finish_non_exhaustive()
    }
}
