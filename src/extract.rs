//! # 提取模块
//!
//! 以与嵌入完全相同的扫描顺序读取最低有效位，边读边解码，遇到定界符即停止。

use crate::error::StegoError;
use crate::grid::PixelGrid;
use crate::payload::{DelimiterScanner, Extraction};

/// 从网格中解码隐藏的载荷。
///
/// 扫描完整个网格仍未找到定界符时，返回 `found == false` 的 [`Extraction`]，
/// 其中的字节只是噪声。
pub fn decode(grid: &PixelGrid) -> Extraction {
    let mut scanner = DelimiterScanner::new();
    for value in grid.scan() {
        if scanner.push_bit(value) {
            log::debug!(
                "delimiter found after {} bytes",
                scanner.bytes_decoded()
            );
            return scanner.finish();
        }
    }

    log::warn!(
        "scanned all {} channel values of {} grid without finding the delimiter",
        grid.dimensions().len(),
        grid.dimensions()
    );
    scanner.finish()
}

/// 解码并只接受找到定界符的结果。
///
/// # Errors
///
/// 未找到定界符时返回 [`StegoError::DelimiterNotFound`]。
pub fn reveal(grid: &PixelGrid) -> Result<Vec<u8>, StegoError> {
    decode(grid).into_payload()
}
