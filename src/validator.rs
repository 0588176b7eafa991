//! Validator Module
//!
//! 生の設定行（A2:D2）を型付きの`PresentationSettings`に変換するモジュール。
//! A列からD列の順に検証し、最初に見つかった不正なフィールドで中断します。
//! デフォルト値による補完は行いません。

use crate::api::{PresentationSettings, RgbColor, SettingsField};
use crate::error::DeckError;
use crate::security::SecurityConfig;
use crate::types::RawSettingsRow;

/// 設定行を検証し、`PresentationSettings`を生成する
///
/// # 戻り値
///
/// * `Ok(PresentationSettings)` - 4項目すべてが有効な場合
/// * `Err(DeckError::Validation)` - 最初に見つかった不正なフィールドを含むエラー
///
/// # 検証ルール
///
/// * `slide_count` (A2): 1以上、上限（デフォルト1,000）以下の整数
/// * `font_size` (B2, D2): 0より大きい有限の数値
/// * `color` (C2): 先頭の`#`は任意、16進数字ちょうど6桁
///
/// # 使用例
///
/// ```rust
/// use xlsxdeck::{validate_settings, RawSettingsRow, SettingsField};
///
/// let row = RawSettingsRow::from_values(["3", "32", "#1F4E79", "18"]);
/// let settings = validate_settings(&row).unwrap();
/// assert_eq!(settings.slide_count, 3);
///
/// let row = RawSettingsRow::from_values(["abc", "32", "#1F4E79", "18"]);
/// let err = validate_settings(&row).unwrap_err();
/// assert_eq!(err.validation_field(), Some(SettingsField::SlideCount));
/// ```
pub fn validate_settings(row: &RawSettingsRow) -> Result<PresentationSettings, DeckError> {
    validate_with_security(row, &SecurityConfig::default())
}

/// スライド枚数の上限を指定して設定行を検証する
pub(crate) fn validate_with_security(
    row: &RawSettingsRow,
    security_config: &SecurityConfig,
) -> Result<PresentationSettings, DeckError> {
    let slide_count = parse_slide_count(row, security_config)?;
    let title_font_size = parse_font_size(row, SettingsField::TitleFontSize)?;
    let title_color = parse_color(row)?;
    let body_font_size = parse_font_size(row, SettingsField::BodyFontSize)?;

    Ok(PresentationSettings {
        slide_count,
        title_font_size,
        title_color,
        body_font_size,
    })
}

/// 空でない値を取得する（空白のみのセルも未入力として扱う）
fn required(row: &RawSettingsRow, field: SettingsField) -> Result<&str, DeckError> {
    match row.get(field).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(invalid(field, "missing value".to_string())),
    }
}

fn invalid(field: SettingsField, message: String) -> DeckError {
    DeckError::Validation { field, message }
}

fn parse_slide_count(
    row: &RawSettingsRow,
    security_config: &SecurityConfig,
) -> Result<u32, DeckError> {
    let field = SettingsField::SlideCount;
    let value = required(row, field)?;

    let count = match value.parse::<u32>() {
        Ok(count) if count >= 1 => count,
        Ok(_) => return Err(invalid(field, "must be at least 1, got 0".to_string())),
        // u32に収まらない整数も上限超過として扱う
        Err(_) if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(invalid(
                field,
                format!("must be at most {}, got {}", security_config.max_slide_count, value),
            ))
        }
        Err(_) => {
            return Err(invalid(
                field,
                format!("expected a positive integer, got '{}'", value),
            ))
        }
    };

    security_config
        .check_slide_count(count)
        .map_err(|message| invalid(field, message))?;
    Ok(count)
}

fn parse_font_size(row: &RawSettingsRow, field: SettingsField) -> Result<f64, DeckError> {
    let value = required(row, field)?;

    match value.parse::<f64>() {
        Ok(size) if size.is_finite() && size > 0.0 => Ok(size),
        Ok(_) => Err(invalid(
            field,
            format!("must be a positive number of points, got '{}'", value),
        )),
        Err(_) => Err(invalid(field, format!("expected a number, got '{}'", value))),
    }
}

fn parse_color(row: &RawSettingsRow) -> Result<RgbColor, DeckError> {
    let field = SettingsField::TitleColor;
    let value = required(row, field)?;

    RgbColor::from_hex(value).ok_or_else(|| {
        invalid(
            field,
            format!("expected 6 hex digits optionally prefixed with '#', got '{}'", value),
        )
    })
}
