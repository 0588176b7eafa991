//! Output Module
//!
//! `PresentationDocument`をPPTXパッケージ（OOXMLのZIPアーカイブ）として書き出すモジュール。
//!
//! パッケージ全体をメモリ上で組み立ててから出力先に書き込むため、
//! 生成途中で失敗した場合に中途半端なファイルが残ることはありません。

mod parts;
mod slide;
mod units;

use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::DeckError;
use crate::slides::{PresentationDocument, Slide};

use parts::SlideLayout;

/// 文書をPPTXファイルとして書き出す
///
/// 既存のファイルは上書きされます。
///
/// # エラー
///
/// * `DeckError::FileAccess` - 出力ファイルを作成・書き込みできない場合
/// * `DeckError::Zip` / `DeckError::Xml` - パッケージの組み立てに失敗した場合
pub fn write_presentation(
    document: &PresentationDocument,
    path: impl AsRef<Path>,
) -> Result<(), DeckError> {
    let path = path.as_ref();
    let bytes = render_presentation(document)?;

    let mut file = File::create(path).map_err(|e| DeckError::file_access(path, e))?;
    file.write_all(&bytes)
        .and_then(|_| file.flush())
        .map_err(|e| DeckError::file_access(path, e))?;

    tracing::info!(
        path = %path.display(),
        slides = document.len(),
        bytes = bytes.len(),
        "presentation written"
    );
    Ok(())
}

/// 文書をPPTXパッケージとして任意のライターに書き出す
///
/// # 使用例
///
/// ```rust
/// use std::io::Cursor;
/// use xlsxdeck::{compose, validate_settings, write_presentation_to, DataTable, RawSettingsRow};
///
/// let settings = validate_settings(&RawSettingsRow::from_values(["1", "32", "1F4E79", "18"])).unwrap();
/// let document = compose(&settings, &DataTable::empty());
///
/// let mut buffer = Cursor::new(Vec::new());
/// write_presentation_to(&document, &mut buffer).unwrap();
/// assert!(buffer.get_ref().starts_with(b"PK"));
/// ```
pub fn write_presentation_to<W: Write + Seek>(
    document: &PresentationDocument,
    writer: W,
) -> Result<(), DeckError> {
    let created = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let mut package = PackageWriter::new(writer);

    let slide_count = document.len();
    let title = document.slides().first().map(Slide::title).unwrap_or("");

    package.add_part("[Content_Types].xml", &parts::content_types_xml(slide_count)?)?;
    package.add_part("_rels/.rels", &parts::root_rels_xml()?)?;
    package.add_part("docProps/app.xml", &parts::app_properties_xml(slide_count)?)?;
    package.add_part("docProps/core.xml", &parts::core_properties_xml(title, &created)?)?;

    package.add_part("ppt/presentation.xml", &parts::presentation_xml(slide_count)?)?;
    package.add_part(
        "ppt/_rels/presentation.xml.rels",
        &parts::presentation_rels_xml(slide_count)?,
    )?;
    package.add_part("ppt/slideMasters/slideMaster1.xml", &parts::slide_master_xml()?)?;
    package.add_part(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        &parts::slide_master_rels_xml()?,
    )?;
    for layout in SlideLayout::ALL {
        package.add_part(&layout.part_name(), &parts::slide_layout_xml(layout)?)?;
        package.add_part(&layout.rels_part_name(), &parts::slide_layout_rels_xml()?)?;
    }
    package.add_part("ppt/theme/theme1.xml", &parts::theme_xml()?)?;

    for (index, entry) in document.slides().iter().enumerate() {
        let number = index + 1;
        package.add_part(&parts::slide_part_name(number), &slide::render_slide(entry)?)?;
        package.add_part(
            &parts::slide_rels_part_name(number),
            &parts::slide_rels_xml(slide::layout_for(entry))?,
        )?;
        tracing::debug!(slide = number, title = entry.title(), "slide rendered");
    }

    package.finish()?;
    Ok(())
}

/// 文書をメモリ上のPPTXバイト列に変換する
pub(crate) fn render_presentation(document: &PresentationDocument) -> Result<Vec<u8>, DeckError> {
    let mut buffer = Cursor::new(Vec::new());
    write_presentation_to(document, &mut buffer)?;
    Ok(buffer.into_inner())
}

/// ZIPアーカイブにXMLパーツを追加するライター
struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: FileOptions,
}

impl<W: Write + Seek> PackageWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            options: FileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    fn add_part(&mut self, name: &str, xml: &str) -> Result<(), DeckError> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(xml.as_bytes())?;
        Ok(())
    }

    fn finish(mut self) -> Result<W, DeckError> {
        Ok(self.zip.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{PresentationSettings, RgbColor};
    use crate::composer::compose;
    use crate::grid::DataTable;
    use std::io::Read;

    fn document(slide_count: u32, rows: Vec<Vec<&str>>) -> PresentationDocument {
        let settings = PresentationSettings {
            slide_count,
            title_font_size: 32.0,
            title_color: RgbColor::new(0x1F, 0x4E, 0x79),
            body_font_size: 18.0,
        };
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(str::to_string).collect())
            .collect();
        compose(&settings, &DataTable::from_rows(rows))
    }

    fn read_part(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn test_package_contains_required_parts() {
        let bytes = render_presentation(&document(3, vec![vec!["A"], vec!["1"]])).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slideLayouts/slideLayout2.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide5.xml",
            "ppt/slides/_rels/slide5.xml.rels",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part {}", name);
        }
        assert!(archive.by_name("ppt/slides/slide6.xml").is_err());
    }

    #[test]
    fn test_slides_in_order() {
        let bytes = render_presentation(&document(2, vec![vec!["H"], vec!["v"]])).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert!(read_part(&mut archive, "ppt/slides/slide1.xml").contains("<a:t>Presentation</a:t>"));
        assert!(read_part(&mut archive, "ppt/slides/slide2.xml").contains("<a:t>Slide 1</a:t>"));
        assert!(read_part(&mut archive, "ppt/slides/slide3.xml").contains("<a:t>Slide 2</a:t>"));

        let last = read_part(&mut archive, "ppt/slides/slide4.xml");
        assert!(last.contains("<a:t>Final Results</a:t>"));
        assert_eq!(last.matches("<a:tr ").count(), 2);

        let title_rels = read_part(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
        assert!(title_rels.contains("slideLayout1.xml"));
        let table_rels = read_part(&mut archive, "ppt/slides/_rels/slide4.xml.rels");
        assert!(table_rels.contains("slideLayout2.xml"));
    }

    #[test]
    fn test_core_properties_use_title() {
        let bytes = render_presentation(&document(1, vec![])).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let core = read_part(&mut archive, "docProps/core.xml");
        assert!(core.contains("<dc:title>Presentation</dc:title>"));
        let app = read_part(&mut archive, "docProps/app.xml");
        assert!(app.contains("<Slides>3</Slides>"));
    }

    #[test]
    fn test_write_presentation_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("deck.pptx");

        let err = write_presentation(&document(1, vec![]), &path).unwrap_err();
        match err {
            DeckError::FileAccess { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("Expected FileAccess error, got {:?}", other),
        }
        assert!(!path.exists());
    }
}
