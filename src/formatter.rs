//! Formatter Module
//!
//! セル値を表示用文字列に正規化するモジュール。
//! セルはテキスト・数値・日付・空など動的に型付けされているため、Reader境界で
//! すべて文字列に揃え、以降の段階では不透明な表示テキストとして扱います。

use calamine::{Data, ExcelDateTime};
use chrono::{NaiveDateTime, Timelike};

/// セルフォーマッター
///
/// セル値のフォーマット処理のファサードとして機能します。
#[derive(Debug, Default)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,

    /// 数値フォーマッター
    number_formatter: NumberFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new() -> Self {
        Self {
            date_formatter: DateFormatter,
            number_formatter: NumberFormatter,
        }
    }

    /// セル値をフォーマット
    ///
    /// # 戻り値
    ///
    /// * `Some(String)` - 表示文字列
    /// * `None` - 空セルの場合
    pub fn format_cell(&self, cell: &Data) -> Option<String> {
        let formatted = match cell {
            Data::Empty => return None,
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => self.number_formatter.format(*f),
            Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Data::DateTime(dt) => self.date_formatter.format(dt),
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            Data::Error(e) => e.to_string(),
        };

        Some(formatted)
    }

    /// セル値をフォーマットし、空セルは空文字列にする（データグリッド用）
    pub fn format_or_empty(&self, cell: &Data) -> String {
        self.format_cell(cell).unwrap_or_default()
    }
}

/// 日付フォーマッター
///
/// calamineが解釈したExcelの日付シリアル値をISO 8601文字列に変換します。
/// 1900年/1904年エポックの差異はcalamine側で吸収済みです。
#[derive(Debug, Default)]
pub(crate) struct DateFormatter;

impl DateFormatter {
    /// 日付・時間セルをフォーマット
    ///
    /// - 日時: 時刻部分がなければ `YYYY-MM-DD`、あれば `YYYY-MM-DD HH:MM:SS`
    /// - 経過時間: `H:MM:SS`
    /// - chronoで表現できない値はシリアル値のまま出力
    pub fn format(&self, value: &ExcelDateTime) -> String {
        if value.is_duration() {
            return match value.as_duration() {
                Some(duration) => Self::format_duration_seconds(duration.num_seconds()),
                None => value.as_f64().to_string(),
            };
        }

        match value.as_datetime() {
            Some(datetime) => Self::format_datetime(&datetime),
            None => value.as_f64().to_string(),
        }
    }

    /// 日時をISO 8601形式にする
    pub fn format_datetime(datetime: &NaiveDateTime) -> String {
        let time = datetime.time();
        if time.hour() == 0 && time.minute() == 0 && time.second() == 0 {
            datetime.format("%Y-%m-%d").to_string()
        } else {
            datetime.format("%Y-%m-%d %H:%M:%S").to_string()
        }
    }

    /// 経過秒数を `H:MM:SS` 形式にする
    pub fn format_duration_seconds(total_seconds: i64) -> String {
        let sign = if total_seconds < 0 { "-" } else { "" };
        let total = total_seconds.unsigned_abs();
        format!(
            "{}{}:{:02}:{:02}",
            sign,
            total / 3600,
            (total % 3600) / 60,
            total % 60
        )
    }
}

/// 数値フォーマッター
///
/// Excelは整数も浮動小数点数として保存するため、小数部がない値は整数表記にします。
/// 例: `90.0` → `"90"`、`2.5` → `"2.5"`
#[derive(Debug, Default)]
pub(crate) struct NumberFormatter;

impl NumberFormatter {
    /// i64で正確に表現できる範囲（2^53）
    const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

    /// 数値をフォーマット
    pub fn format(&self, value: f64) -> String {
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= Self::MAX_EXACT_INTEGER {
            // -0.0 も "0" になる
            (value as i64).to_string()
        } else {
            value.to_string()
        }
    }
}
