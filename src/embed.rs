//! # 嵌入模块
//!
//! 按规范扫描顺序遍历网格，将载荷位依次写入每个通道值的最低有效位。

use crate::capacity::{capacity_of, validate};
use crate::error::StegoError;
use crate::grid::PixelGrid;
use crate::payload::payload_bits;

/// 将 `payload` 嵌入 `grid` 的副本并返回，输入网格保持不变。
///
/// # Errors
///
/// 载荷 (含定界符) 超出容量时返回 [`StegoError::CapacityExceeded`]。
pub fn encode(grid: &PixelGrid, payload: &[u8]) -> Result<PixelGrid, StegoError> {
    let mut stego = grid.clone();
    encode_in_place(&mut stego, payload)?;
    Ok(stego)
}

/// 就地嵌入 `payload`，返回被写入的通道值数量。
///
/// 容量检查在任何修改之前完成，失败时 `grid` 不会被改动。
/// 载荷之后的通道值与输入逐位相同。
///
/// # Errors
///
/// 载荷 (含定界符) 超出容量时返回 [`StegoError::CapacityExceeded`]。
pub fn encode_in_place(grid: &mut PixelGrid, payload: &[u8]) -> Result<usize, StegoError> {
    let bits = payload_bits(payload);
    let capacity = capacity_of(grid.dimensions());
    validate(bits.len(), capacity)?;

    log::debug!(
        "embedding {} payload bytes ({} bits) into {} grid, capacity {} bytes",
        payload.len(),
        bits.len(),
        grid.dimensions(),
        capacity
    );

    let mut written = 0;
    for (value, bit) in grid.scan_mut().zip(bits) {
        *value = (*value & 0xFE) | bit;
        written += 1;
    }

    Ok(written)
}
