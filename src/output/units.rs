//! EMU Units and Layout
//!
//! DrawingMLの座標系（EMU: English Metric Unit）と、表スライドのレイアウト計算。

/// 1インチあたりのEMU
pub(crate) const EMU_PER_INCH: i64 = 914_400;

/// スライド幅（10インチ、4:3）
pub(crate) const SLIDE_WIDTH: i64 = 9_144_000;

/// スライド高さ（7.5インチ、4:3）
pub(crate) const SLIDE_HEIGHT: i64 = 6_858_000;

/// `a:rPr@sz`の許容範囲（1/100ポイント単位）
const MIN_FONT_SZ: i64 = 100;
const MAX_FONT_SZ: i64 = 400_000;

/// 表の左右マージン（0.7インチ）
const TABLE_SIDE_MARGIN: i64 = EMU_PER_INCH * 7 / 10;

/// 表の上端（1.6インチ）
const TABLE_TOP: i64 = EMU_PER_INCH * 16 / 10;

/// 表の下に確保する余白（1.0インチ）
const TABLE_BOTTOM_MARGIN: i64 = EMU_PER_INCH;

/// 1行あたりの高さ（0.35インチ）
const ROW_HEIGHT: i64 = EMU_PER_INCH * 35 / 100;

/// 表と脚注の間隔（0.2インチ）
const FOOTNOTE_GAP: i64 = EMU_PER_INCH * 2 / 10;

/// 脚注テキストボックスの高さ（0.4インチ）
const FOOTNOTE_HEIGHT: i64 = EMU_PER_INCH * 4 / 10;

/// 図形の位置とサイズ（EMU）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    pub const fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }

    pub fn as_tuple(&self) -> (i64, i64, i64, i64) {
        (self.x, self.y, self.cx, self.cy)
    }

    /// 下端のY座標
    pub fn bottom(&self) -> i64 {
        self.y + self.cy
    }
}

/// タイトルプレースホルダーの位置
pub(crate) const TITLE_FRAME: Frame = Frame::new(457_200, 274_638, 8_229_600, 1_143_000);

/// 本文プレースホルダーの位置
pub(crate) const BODY_FRAME: Frame = Frame::new(457_200, 1_600_200, 8_229_600, 4_525_963);

/// ポイントを`sz`属性値（1/100ポイント）に変換する
///
/// DrawingMLが受け付ける範囲に丸めます。
pub(crate) fn font_sz(points: f64) -> i64 {
    let hundredths = (points * 100.0).round();
    if hundredths.is_nan() {
        return MIN_FONT_SZ;
    }
    (hundredths as i64).clamp(MIN_FONT_SZ, MAX_FONT_SZ)
}

/// 表スライドのレイアウト
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableLayout {
    /// 表全体の位置
    pub frame: Frame,
    /// 列幅（合計は`frame.cx`と一致）
    pub column_widths: Vec<i64>,
    /// 行の高さ（合計は`frame.cy`と一致）
    pub row_heights: Vec<i64>,
}

impl TableLayout {
    /// 列ごとの表示幅から表のレイアウトを計算する
    ///
    /// 列幅は表示幅に比例させ、各列に最低でも均等幅の半分を割り当てます。
    /// 端数は最終列で吸収します。
    pub fn compute(display_widths: &[usize], row_count: usize) -> Self {
        let width = SLIDE_WIDTH - TABLE_SIDE_MARGIN * 2;
        let max_height = SLIDE_HEIGHT - TABLE_TOP - TABLE_BOTTOM_MARGIN;
        let height = (ROW_HEIGHT * row_count as i64).min(max_height);

        Self {
            frame: Frame::new(TABLE_SIDE_MARGIN, TABLE_TOP, width, height),
            column_widths: distribute_widths(display_widths, width),
            row_heights: split_evenly(height, row_count),
        }
    }

    /// 脚注テキストボックスの位置（表の直下）
    pub fn footnote_frame(&self) -> Frame {
        Frame::new(
            self.frame.x,
            self.frame.bottom() + FOOTNOTE_GAP,
            self.frame.cx,
            FOOTNOTE_HEIGHT,
        )
    }
}

fn distribute_widths(display_widths: &[usize], total: i64) -> Vec<i64> {
    let columns = display_widths.len() as i64;
    if columns == 0 {
        return Vec::new();
    }

    let minimum = total / (2 * columns);
    let flexible = total - minimum * columns;
    let weight_sum: i64 = display_widths.iter().map(|w| (*w).max(1) as i64).sum();

    let mut widths: Vec<i64> = display_widths
        .iter()
        .map(|w| minimum + flexible * (*w).max(1) as i64 / weight_sum)
        .collect();

    let assigned: i64 = widths.iter().sum();
    if let Some(last) = widths.last_mut() {
        *last += total - assigned;
    }
    widths
}

fn split_evenly(total: i64, parts: usize) -> Vec<i64> {
    if parts == 0 {
        return Vec::new();
    }
    let each = total / parts as i64;
    let mut heights = vec![each; parts];
    if let Some(last) = heights.last_mut() {
        *last += total - each * parts as i64;
    }
    heights
}
