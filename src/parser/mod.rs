//! Parser Module
//!
//! calamineを使用したワークブック読み込みの実装。
//! 設定シート（1枚目）とデータシート（2枚目）の2つの論理ビューを提供します。

mod workbook;

pub use workbook::WorkbookReader;
