//! # 像素网格模块
//!
//! [`PixelGrid`] 以 (行, 列, 通道) 为索引，在一块连续的缓冲区中保存 8 位通道值。
//! 缓冲区按行优先、通道交错排列，因此顺序遍历缓冲区即为规范扫描顺序：
//! 行升序，其次列升序，最后通道升序。嵌入与提取都依赖这一顺序。

use crate::error::StegoError;
use std::fmt;

/// 像素网格的尺寸：行数、列数、通道数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
    pub channels: usize,
}

impl Dimensions {
    /// 通道值的总数。
    pub fn len(&self) -> usize {
        self.rows * self.cols * self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.rows, self.cols, self.channels)
    }
}

/// 拥有所有权的像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    dims: Dimensions,
    data: Vec<u8>,
}

impl PixelGrid {
    /// 创建所有通道值为 0 的网格。
    ///
    /// # Errors
    ///
    /// 通道数为 0 或尺寸乘积溢出时返回 [`StegoError::InvalidLayout`]。
    pub fn new(rows: usize, cols: usize, channels: usize) -> Result<Self, StegoError> {
        let len = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(StegoError::InvalidLayout {
                rows,
                cols,
                channels,
                len: 0,
            })?;
        Self::from_raw(rows, cols, channels, vec![0; len])
    }

    /// 创建每个像素都等于 `pixel` 的网格，通道数取 `pixel.len()`。
    ///
    /// # Errors
    ///
    /// `pixel` 为空或尺寸乘积溢出时返回 [`StegoError::InvalidLayout`]。
    pub fn filled(rows: usize, cols: usize, pixel: &[u8]) -> Result<Self, StegoError> {
        let pixels = rows.checked_mul(cols).ok_or(StegoError::InvalidLayout {
            rows,
            cols,
            channels: pixel.len(),
            len: 0,
        })?;
        Self::from_raw(rows, cols, pixel.len(), pixel.repeat(pixels))
    }

    /// 由行优先、通道交错的原始缓冲区构建网格。
    ///
    /// # Errors
    ///
    /// 通道数为 0，或缓冲区长度不等于 `rows * cols * channels` 时返回
    /// [`StegoError::InvalidLayout`]。
    pub fn from_raw(
        rows: usize,
        cols: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, StegoError> {
        let expected = rows.checked_mul(cols).and_then(|n| n.checked_mul(channels));
        if channels == 0 || expected != Some(data.len()) {
            return Err(StegoError::InvalidLayout {
                rows,
                cols,
                channels,
                len: data.len(),
            });
        }

        Ok(Self {
            dims: Dimensions {
                rows,
                cols,
                channels,
            },
            data,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    pub fn channels(&self) -> usize {
        self.dims.channels
    }

    fn offset(&self, row: usize, col: usize, channel: usize) -> Option<usize> {
        (row < self.dims.rows && col < self.dims.cols && channel < self.dims.channels)
            .then(|| (row * self.dims.cols + col) * self.dims.channels + channel)
    }

    /// 读取 (row, col, channel) 处的通道值，越界时返回 `None`。
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        self.offset(row, col, channel).map(|i| self.data[i])
    }

    /// 写入 (row, col, channel) 处的通道值，越界时返回 `false` 且不做修改。
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: u8) -> bool {
        match self.offset(row, col, channel) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// 按规范扫描顺序遍历所有通道值。
    pub fn scan(&self) -> impl ExactSizeIterator<Item = u8> + '_ {
        self.data.iter().copied()
    }

    /// 按规范扫描顺序可变地遍历所有通道值。
    pub fn scan_mut(&mut self) -> impl ExactSizeIterator<Item = &mut u8> + '_ {
        self.data.iter_mut()
    }

    /// 依次取出某一通道在所有像素上的值。
    pub fn channel_values(&self, channel: usize) -> impl Iterator<Item = u8> + '_ {
        let pixels = if channel < self.dims.channels {
            self.dims.rows * self.dims.cols
        } else {
            0
        };
        self.data
            .iter()
            .skip(channel)
            .step_by(self.dims.channels)
            .take(pixels)
            .copied()
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
