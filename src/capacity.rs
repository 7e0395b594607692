//! # 容量计算模块
//!
//! 每个通道值承载 1 bit，因此容量为 `rows * cols * channels / 8` 字节 (向下取整)。
//! 该容量同时容纳消息与定界符。

use crate::constants::{BITS_PER_BYTE, DELIMITER};
use crate::error::StegoError;
use crate::grid::Dimensions;

/// 给定尺寸的网格最多可嵌入的字节数 (含定界符)。
pub fn max_payload_bytes(rows: usize, cols: usize, channels: usize) -> usize {
    rows.saturating_mul(cols).saturating_mul(channels) / BITS_PER_BYTE
}

/// 与 [`max_payload_bytes`] 相同，直接接受 [`Dimensions`]。
pub fn capacity_of(dims: Dimensions) -> usize {
    max_payload_bytes(dims.rows, dims.cols, dims.channels)
}

/// 扣除定界符后，留给消息本身的最大字节数。
pub fn max_message_bytes(dims: Dimensions) -> usize {
    capacity_of(dims).saturating_sub(DELIMITER.len())
}

/// 嵌入 `message_len` 字节的消息所需的位数 (含定界符)。
pub fn required_bits(message_len: usize) -> usize {
    (message_len + DELIMITER.len()) * BITS_PER_BYTE
}

/// 检查载荷 (含定界符) 的位长度是否能放入容量为 `capacity_bytes` 的图像。
///
/// 必须在修改任何像素之前调用。
///
/// # Errors
///
/// 所需字节数超过容量时返回 [`StegoError::CapacityExceeded`]。
pub fn validate(payload_bits: usize, capacity_bytes: usize) -> Result<(), StegoError> {
    let required_bytes = payload_bits / BITS_PER_BYTE;
    if required_bytes > capacity_bytes {
        return Err(StegoError::CapacityExceeded {
            required_bytes,
            available_bytes: capacity_bytes,
        });
    }
    Ok(())
}
