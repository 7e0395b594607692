//! # 错误类型模块
//!
//! [`StegoError`] 覆盖了从图像加载、容量检查到消息提取和指标计算的全部失败情形。

use crate::grid::Dimensions;
use std::path::PathBuf;
use thiserror::Error;

/// 隐写库中所有可能发生的错误。
#[derive(Debug, Error)]
pub enum StegoError {
    /// 图像文件无法读取或解码。
    #[error("unable to load image '{}'", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// 图像文件无法编码或写入。
    #[error("unable to save image '{}'", .path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// 目标格式有损、会量化调色板或未被支持，无法原样保存每个通道值。
    #[error("refusing to save '{}': format is unsupported or cannot store pixels losslessly (use png, bmp, tiff, webp or qoi)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// 参与比较的两个像素网格尺寸不一致。
    #[error("grid dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: Dimensions, right: Dimensions },

    /// 载荷 (含定界符) 超过了图像的嵌入容量。
    #[error("payload of {required_bytes} bytes (including delimiter) exceeds capacity of {available_bytes} bytes")]
    CapacityExceeded {
        required_bytes: usize,
        available_bytes: usize,
    },

    /// 扫描完整个图像仍未找到定界符。
    #[error("no hidden message found: delimiter missing")]
    DelimiterNotFound,

    /// 原始缓冲区与声明的尺寸不符，或尺寸无法交给图像编解码器。
    #[error("invalid grid layout {rows}x{cols}x{channels} for buffer of {len} bytes")]
    InvalidLayout {
        rows: usize,
        cols: usize,
        channels: usize,
        len: usize,
    },
}
