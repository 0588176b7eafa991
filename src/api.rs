//! Public API Types
//!
//! 公開APIで使用する設定値・色・固定文言の型を定義するモジュール。

use std::fmt;

use crate::types::CellCoord;

/// RGBカラー（各チャンネル0-255）
///
/// 設定シートのC2セルに書かれた16進カラーコード（`#RRGGBB` または `RRGGBB`）を
/// 分解したものです。
///
/// # 使用例
///
/// ```rust
/// use xlsxdeck::RgbColor;
///
/// let color = RgbColor::from_hex("#1F4E79").unwrap();
/// assert_eq!((color.red, color.green, color.blue), (31, 78, 121));
/// assert_eq!(color.to_hex(), "1F4E79");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    /// 赤チャンネル
    pub red: u8,
    /// 緑チャンネル
    pub green: u8,
    /// 青チャンネル
    pub blue: u8,
}

impl RgbColor {
    /// 白（表ヘッダーの文字色に使用）
    pub const WHITE: RgbColor = RgbColor::new(0xFF, 0xFF, 0xFF);

    /// 新しい色を生成
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// 16進カラーコードを解析する
    ///
    /// 前後の空白を除去し、先頭の `#` を1つだけ許容します。
    /// 残りがちょうど6桁の16進数字でない場合は `None` を返します。
    pub fn from_hex(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// 大文字6桁の16進文字列（`#`なし）に変換する
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// 検証済みのプレゼンテーション設定
///
/// 境界（`validate_settings`）で一度だけ検証され、以降のコードは再検証しません。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationSettings {
    /// コンテンツスライドの枚数（1以上、上限以下）
    pub slide_count: u32,

    /// タイトルのフォントサイズ（ポイント、正の数）
    pub title_font_size: f64,

    /// タイトルの文字色
    pub title_color: RgbColor,

    /// 本文のフォントサイズ（ポイント、正の数）
    pub body_font_size: f64,
}

/// 設定行のフィールド
///
/// 検証エラーでどのセルが不正だったかを示すために使用します。
/// 表示名は `slide_count` / `font_size` / `color` です（フォントサイズ2項目は同名）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SettingsField {
    /// A2: コンテンツスライド枚数
    SlideCount,

    /// B2: タイトルのフォントサイズ
    TitleFontSize,

    /// C2: タイトルの文字色
    TitleColor,

    /// D2: 本文のフォントサイズ
    BodyFontSize,
}

impl SettingsField {
    /// 設定行の読み込み順（A列からD列）
    pub const ALL: [SettingsField; 4] = [
        SettingsField::SlideCount,
        SettingsField::TitleFontSize,
        SettingsField::TitleColor,
        SettingsField::BodyFontSize,
    ];

    /// エラーメッセージで使用する名前
    pub fn name(&self) -> &'static str {
        match self {
            SettingsField::SlideCount => "slide_count",
            SettingsField::TitleFontSize | SettingsField::BodyFontSize => "font_size",
            SettingsField::TitleColor => "color",
        }
    }

    /// 設定シート上の列インデックス（0始まり）
    pub fn column(&self) -> u32 {
        match self {
            SettingsField::SlideCount => 0,
            SettingsField::TitleFontSize => 1,
            SettingsField::TitleColor => 2,
            SettingsField::BodyFontSize => 3,
        }
    }

    /// 設定シート上のセル（A1記法、例: "B2"）
    pub fn cell(&self) -> String {
        CellCoord::new(crate::types::SETTINGS_ROW, self.column()).to_a1_notation()
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// デッキに埋め込む固定文言
///
/// スタイルではなく文言のみを保持します。デフォルト値は英語の定型文です。
///
/// # 使用例
///
/// ```rust
/// use xlsxdeck::DeckText;
///
/// let text = DeckText {
///     title: "Monthly Report".to_string(),
///     ..DeckText::default()
/// };
/// assert_eq!(text.table_title, "Final Results");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckText {
    /// タイトルスライドの文言
    pub title: String,

    /// コンテンツスライドの見出しの接頭辞（後ろに番号が付く）
    pub content_title_prefix: String,

    /// コンテンツスライドのプレースホルダー本文
    pub content_body: String,

    /// 表スライドの見出し
    pub table_title: String,

    /// 表の下に置く脚注（`None`の場合は出力しない）
    pub footnote: Option<String>,
}

impl Default for DeckText {
    fn default() -> Self {
        Self {
            title: "Presentation".to_string(),
            content_title_prefix: "Slide".to_string(),
            content_body: "Content goes here…".to_string(),
            table_title: "Final Results".to_string(),
            footnote: Some("* The values are estimated.".to_string()),
        }
    }
}
