//! Slides Module
//!
//! メモリ上のプレゼンテーション文書を表す型を定義するモジュール。
//! 文書は1回の実行で一度だけ構築され、一度だけ書き出されます。

use crate::api::RgbColor;
use crate::grid::DataTable;

/// タイトルスライド
#[derive(Debug, Clone, PartialEq)]
pub struct TitleSlide {
    /// タイトル文言
    pub text: String,
    /// フォントサイズ（ポイント）
    pub font_size: f64,
    /// 文字色
    pub color: RgbColor,
}

/// コンテンツスライド（データに依存しない定型スライド）
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSlide {
    /// 1始まりの通し番号
    pub index: u32,
    /// 見出し（例: "Slide 1"）
    pub title: String,
    /// プレースホルダー本文
    pub body: String,
    /// 本文のフォントサイズ（ポイント）
    pub font_size: f64,
}

/// 表の下に置く脚注
#[derive(Debug, Clone, PartialEq)]
pub struct Footnote {
    /// 脚注の文言
    pub text: String,
    /// フォントサイズ（ポイント）
    pub font_size: f64,
}

/// 最終スライド（データシートの表）
#[derive(Debug, Clone, PartialEq)]
pub struct TableSlide {
    /// 見出し
    pub title: String,
    /// データシート全体（1行目はヘッダー）
    pub table: DataTable,
    /// セルのフォントサイズ（ポイント）
    pub font_size: f64,
    /// ヘッダー行の塗りつぶし色
    pub header_fill: RgbColor,
    /// 脚注
    pub footnote: Option<Footnote>,
}

/// スライド
#[derive(Debug, Clone, PartialEq)]
pub enum Slide {
    /// タイトルスライド
    Title(TitleSlide),
    /// コンテンツスライド
    Content(ContentSlide),
    /// 表スライド
    Table(TableSlide),
}

impl Slide {
    /// スライドの見出し
    pub fn title(&self) -> &str {
        match self {
            Slide::Title(slide) => &slide.text,
            Slide::Content(slide) => &slide.title,
            Slide::Table(slide) => &slide.title,
        }
    }
}

/// プレゼンテーション文書
///
/// スライドは文書が排他的に所有し、出力順は追加順と一致します。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentationDocument {
    slides: Vec<Slide>,
}

impl PresentationDocument {
    /// 空の文書を生成
    pub fn new() -> Self {
        Self::default()
    }

    /// スライドを末尾に追加
    pub(crate) fn push(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// すべてのスライド（出力順）
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// スライド枚数
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// スライドがないかどうか
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// 最後の表スライド
    pub fn table_slide(&self) -> Option<&TableSlide> {
        self.slides.iter().rev().find_map(|slide| match slide {
            Slide::Table(table) => Some(table),
            _ => None,
        })
    }
}
