//! Security Module
//!
//! 入力ファイルと設定値に対するセキュリティ制限を定義するモジュール。

/// デフォルトの入力ファイルサイズ上限（2GB）
pub(crate) const DEFAULT_MAX_INPUT_FILE_SIZE: u64 = 2_147_483_648;

/// デフォルトのコンテンツスライド枚数上限
pub const DEFAULT_MAX_SLIDE_COUNT: u32 = 1_000;

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,

    /// 設定行A2で指定できるコンテンツスライドの最大枚数
    /// デフォルト: 1,000枚
    pub max_slide_count: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: DEFAULT_MAX_INPUT_FILE_SIZE,
            max_slide_count: DEFAULT_MAX_SLIDE_COUNT,
        }
    }
}

impl SecurityConfig {
    /// 入力サイズが上限以内かを検証する
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 上限以内の場合
    /// * `Err(String)` - 上限を超えた場合のメッセージ
    pub fn check_input_size(&self, size: u64) -> Result<(), String> {
        if size > self.max_input_file_size {
            return Err(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                size, self.max_input_file_size
            ));
        }
        Ok(())
    }

    /// スライド枚数が上限以内かを検証する
    pub fn check_slide_count(&self, count: u32) -> Result<(), String> {
        if count > self.max_slide_count {
            return Err(format!(
                "must be at most {}, got {}",
                self.max_slide_count, count
            ));
        }
        Ok(())
    }
}
