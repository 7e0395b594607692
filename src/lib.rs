//! # lsb_veil 库
//!
//! 本库包含 LSB 隐写的核心逻辑：载荷编解码、容量计算、嵌入、提取，
//! 以及衡量嵌入失真的 MSE / PSNR / 直方图相关系数。

// 声明库包含的所有模块。

pub mod capacity;
pub mod cli;
pub mod constants;
pub mod embed;
pub mod error;
pub mod extract;
pub mod grid;
pub mod handler;
pub mod image_io;
pub mod metrics;
pub mod payload;

pub use embed::{encode, encode_in_place};
pub use error::StegoError;
pub use extract::{decode, reveal};
pub use grid::{Dimensions, PixelGrid};
pub use payload::Extraction;
