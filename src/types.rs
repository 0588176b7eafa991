//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use crate::api::SettingsField;

/// 設定行の行インデックス（0始まり、Excel上の2行目）
pub(crate) const SETTINGS_ROW: u32 = 1;

/// 設定シートの生の値（A2:D2）
///
/// Reader境界で文字列に正規化された値を保持します。型付けと検証は
/// `validate_settings`が担当し、この段階では一切解釈しません。
/// 空セルは`None`です。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSettingsRow {
    values: [Option<String>; 4],
}

impl RawSettingsRow {
    /// A2からD2の順で値を受け取って生成する
    pub fn new(values: [Option<String>; 4]) -> Self {
        Self { values }
    }

    /// すべてのセルが埋まっている設定行を文字列から生成する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxdeck::{RawSettingsRow, SettingsField};
    ///
    /// let row = RawSettingsRow::from_values(["3", "32", "#1F4E79", "18"]);
    /// assert_eq!(row.get(SettingsField::TitleColor), Some("#1F4E79"));
    /// ```
    pub fn from_values(values: [&str; 4]) -> Self {
        Self::new(values.map(|v| Some(v.to_string())))
    }

    /// フィールドに対応する値を取得する
    pub fn get(&self, field: SettingsField) -> Option<&str> {
        self.values[field.column() as usize].as_deref()
    }
}

/// セル座標（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// A1形式の文字列に変換（例: (0, 0) -> "A1"）
    #[allow(clippy::wrong_self_convention)]
    pub fn to_a1_notation(&self) -> String {
        let col_str = Self::col_index_to_letter(self.col);
        format!("{}{}", col_str, self.row + 1)
    }

    /// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
    fn col_index_to_letter(mut col: u32) -> String {
        let mut result = String::new();
        loop {
            let remainder = col % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        result
    }

    /// calamineの絶対座標形式 `(row, col)` に変換
    pub fn as_calamine(&self) -> (u32, u32) {
        (self.row, self.col)
    }
}
