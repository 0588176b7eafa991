//! Composer Module
//!
//! 検証済みの設定とデータグリッドからプレゼンテーション文書を組み立てるモジュール。
//!
//! 出力順は常に「タイトル1枚 → コンテンツN枚 → 表1枚」です。
//! 入力はすべて検証済みのため、この段階で失敗することはありません。

use crate::api::{DeckText, PresentationSettings};
use crate::grid::DataTable;
use crate::slides::{ContentSlide, Footnote, PresentationDocument, Slide, TableSlide, TitleSlide};

/// 脚注フォントサイズの下限（ポイント）
const MIN_FOOTNOTE_FONT_SIZE: f64 = 8.0;

/// 脚注は本文より2ポイント小さくする
const FOOTNOTE_SIZE_REDUCTION: f64 = 2.0;

/// デフォルトの文言で文書を組み立てる
///
/// # 使用例
///
/// ```rust
/// use xlsxdeck::{compose, validate_settings, DataTable, RawSettingsRow};
///
/// let settings = validate_settings(&RawSettingsRow::from_values(["3", "32", "#1F4E79", "18"])).unwrap();
/// let document = compose(&settings, &DataTable::empty());
/// assert_eq!(document.len(), 5);
/// ```
pub fn compose(settings: &PresentationSettings, table: &DataTable) -> PresentationDocument {
    compose_with_text(settings, table, &DeckText::default())
}

/// 文言を指定して文書を組み立てる
pub fn compose_with_text(
    settings: &PresentationSettings,
    table: &DataTable,
    text: &DeckText,
) -> PresentationDocument {
    let mut document = PresentationDocument::new();

    // 1. タイトルスライド
    document.push(Slide::Title(TitleSlide {
        text: text.title.clone(),
        font_size: settings.title_font_size,
        color: settings.title_color,
    }));

    // 2. コンテンツスライド（1..=N）
    for index in 1..=settings.slide_count {
        document.push(Slide::Content(ContentSlide {
            index,
            title: format!("{} {}", text.content_title_prefix, index),
            body: text.content_body.clone(),
            font_size: settings.body_font_size,
        }));
    }

    // 3. 表スライド
    let footnote = text.footnote.as_ref().map(|footnote| Footnote {
        text: footnote.clone(),
        font_size: footnote_font_size(settings.body_font_size),
    });
    document.push(Slide::Table(TableSlide {
        title: text.table_title.clone(),
        table: table.clone(),
        font_size: settings.body_font_size,
        header_fill: settings.title_color,
        footnote,
    }));

    document
}

/// 脚注のフォントサイズ
fn footnote_font_size(body_font_size: f64) -> f64 {
    (body_font_size - FOOTNOTE_SIZE_REDUCTION).max(MIN_FOOTNOTE_FONT_SIZE)
}
