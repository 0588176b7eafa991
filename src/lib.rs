//! xlsxdeck - Pure-Rust generator of PowerPoint decks from Excel workbooks
//!
//! This crate reads a two-sheet Excel workbook (a settings row plus a data grid)
//! and produces a PPTX presentation: a title slide, a configurable number of
//! content slides, and a final slide that renders the data grid as a table.
//!
//! # Workbook Layout
//!
//! | Sheet | Cell   | Meaning                                   |
//! |-------|--------|-------------------------------------------|
//! | 1     | A2     | number of content slides (integer ≥ 1)    |
//! | 1     | B2     | title font size in points                 |
//! | 1     | C2     | title color, `#RRGGBB` or `RRGGBB`        |
//! | 1     | D2     | body font size in points                  |
//! | 2     | all    | table data, first row is the header       |
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsxdeck::DeckGenerator;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Read data.xlsx and write presentation.pptx
//!     DeckGenerator::new("data.xlsx", "presentation.pptx").generate()?;
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use xlsxdeck::{DeckText, GeneratorBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = GeneratorBuilder::new()
//!         .with_input_path("reports/q3.xlsx")
//!         .with_output_path("reports/q3.pptx")
//!         .with_deck_text(DeckText {
//!             title: "Q3 Results".to_string(),
//!             footnote: None,
//!             ..DeckText::default()
//!         })
//!         .build()?;
//!
//!     generator.generate()?;
//!     Ok(())
//! }
//! ```
//!
//! # Step by Step
//!
//! Each stage of the pipeline is also available on its own:
//!
//! ```rust,no_run
//! use xlsxdeck::{compose, validate_settings, write_presentation, WorkbookReader};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut reader = WorkbookReader::open("data.xlsx")?;
//!     let settings = validate_settings(&reader.read_settings_row()?)?;
//!     let table = reader.read_data_grid()?;
//!
//!     let document = compose(&settings, &table);
//!     write_presentation(&document, "presentation.pptx")?;
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod composer;
mod error;
mod formatter;
mod grid;
mod output;
mod parser;
mod security;
mod slides;
mod types;
mod validator;

// 公開API
pub use api::{DeckText, PresentationSettings, RgbColor, SettingsField};
pub use builder::{DeckGenerator, GeneratorBuilder, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
pub use composer::{compose, compose_with_text};
pub use error::DeckError;
pub use grid::DataTable;
pub use output::{write_presentation, write_presentation_to};
pub use parser::WorkbookReader;
pub use security::DEFAULT_MAX_SLIDE_COUNT;
pub use slides::{ContentSlide, Footnote, PresentationDocument, Slide, TableSlide, TitleSlide};
pub use types::RawSettingsRow;
pub use validator::validate_settings;
