//! Grid Module
//!
//! データシートの内容を表示テキストの稠密なグリッド（`DataTable`）に変換するモジュール。
//! 1行目はヘッダーとして描画されます。

use calamine::{Data, Range};
use unicode_width::UnicodeWidthStr;

use crate::formatter::CellFormatter;
use crate::types::CellCoord;

/// 表示テキストの表
///
/// 行の長さは揃っていなくても構いません。行が0件の空の表も有効です。
///
/// # 使用例
///
/// ```rust
/// use xlsxdeck::DataTable;
///
/// let table = DataTable::from_rows(vec![
///     vec!["Name".to_string(), "Score".to_string()],
///     vec!["Alice".to_string(), "90".to_string()],
/// ]);
/// assert_eq!(table.row_count(), 2);
/// assert_eq!(table.header().unwrap()[0], "Name");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    /// グリッドデータ（行 × 列）
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// 行データから表を生成する
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// 空の表を生成する
    pub fn empty() -> Self {
        Self::default()
    }

    /// calamineのセル範囲から表を構築する
    ///
    /// A1を原点とした絶対座標で読み込み、使用範囲内の先頭の空行・空列は空文字列として残します。
    /// 末尾の完全に空の行と列は除外します。
    pub(crate) fn from_range(range: &Range<Data>, formatter: &CellFormatter) -> Self {
        let Some((end_row, end_col)) = range.end() else {
            return Self::empty();
        };

        let mut rows: Vec<Vec<String>> = (0..=end_row)
            .map(|row| {
                (0..=end_col)
                    .map(|col| {
                        range
                            .get_value(CellCoord::new(row, col).as_calamine())
                            .map(|cell| formatter.format_or_empty(cell))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self::trim_trailing_empty(&mut rows);
        Self { rows }
    }

    /// 末尾の空行と空列を除去する（内部ヘルパー）
    ///
    /// 空白文字だけのセルは値があるものとして残します。
    fn trim_trailing_empty(rows: &mut Vec<Vec<String>>) {
        let is_blank = |s: &String| s.is_empty();

        while rows.last().is_some_and(|row| row.iter().all(is_blank)) {
            rows.pop();
        }

        let used_cols = rows
            .iter()
            .filter_map(|row| row.iter().rposition(|cell| !is_blank(cell)))
            .max()
            .map_or(0, |last| last + 1);

        for row in rows.iter_mut() {
            row.truncate(used_cols);
        }
    }

    /// すべての行
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// 行数（ヘッダー行を含む）
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数（最も長い行の長さ）
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// 表が空かどうか
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// ヘッダー行（1行目）
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// ヘッダーを除いた本文の行
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// 各列の最大表示幅を計算する
    ///
    /// 全角文字は2、半角文字は1として数えます。空の列も最低幅1とします。
    pub fn column_display_widths(&self) -> Vec<usize> {
        let mut widths = vec![1; self.column_count()];

        for row in &self.rows {
            for (col_idx, cell) in row.iter().enumerate() {
                widths[col_idx] = widths[col_idx].max(cell.trim().width());
            }
        }

        widths
    }
}
