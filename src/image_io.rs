//! # 图像读写模块
//!
//! 借助 `image` crate 在图像文件与 [`PixelGrid`] 之间转换。
//! 读取时统一转换为 8 位三通道网格，通道顺序为 B, G, R，
//! 与 OpenCV 读取图像时的内存布局一致，因此扫描顺序中的第一个 bit 写入蓝色通道；
//! 写入时换回 R, G, B，并根据扩展名选择格式，拒绝无法无损保存的格式。

use crate::error::StegoError;
use crate::grid::PixelGrid;
use image::{DynamicImage, ImageBuffer, ImageFormat, RgbImage};
use std::fs;
use std::path::Path;

/// 就地交换每个像素的第 0 与第 2 个通道 (RGB <-> BGR，RGBA <-> BGRA)。
fn swap_red_blue(data: &mut [u8], channels: usize) {
    if channels < 3 {
        return;
    }
    for pixel in data.chunks_exact_mut(channels) {
        pixel.swap(0, 2);
    }
}

/// 由 RGB 图像构建 B, G, R 顺序的网格。
impl TryFrom<RgbImage> for PixelGrid {
    type Error = StegoError;

    fn try_from(image: RgbImage) -> Result<Self, Self::Error> {
        let (width, height) = image.dimensions();
        let mut raw = image.into_raw();
        swap_red_blue(&mut raw, 3);
        PixelGrid::from_raw(height as usize, width as usize, 3, raw)
    }
}

/// 将网格转换回图像。三、四通道网格按 B, G, R(, A) 解释。
impl TryFrom<&PixelGrid> for DynamicImage {
    type Error = StegoError;

    fn try_from(grid: &PixelGrid) -> Result<Self, Self::Error> {
        let invalid = || StegoError::InvalidLayout {
            rows: grid.rows(),
            cols: grid.cols(),
            channels: grid.channels(),
            len: grid.as_raw().len(),
        };
        let width = u32::try_from(grid.cols()).map_err(|_| invalid())?;
        let height = u32::try_from(grid.rows()).map_err(|_| invalid())?;
        let mut raw = grid.as_raw().to_vec();
        swap_red_blue(&mut raw, grid.channels());

        let image = match grid.channels() {
            1 => ImageBuffer::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
            2 => ImageBuffer::from_raw(width, height, raw).map(DynamicImage::ImageLumaA8),
            3 => ImageBuffer::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
            4 => ImageBuffer::from_raw(width, height, raw).map(DynamicImage::ImageRgba8),
            _ => None,
        };
        image.ok_or_else(invalid)
    }
}

/// 判断格式是否无损，只有无损格式能保留最低有效位。
fn is_lossless(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::WebP
            | ImageFormat::Qoi
    )
}

/// 读取图像文件并转换为 B, G, R 顺序的像素网格。
///
/// # Errors
///
/// 文件无法读取或解码时返回 [`StegoError::ImageLoad`]。
pub fn load(path: &Path) -> Result<PixelGrid, StegoError> {
    let image = image::open(path).map_err(|source| StegoError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = PixelGrid::try_from(image.to_rgb8())?;
    log::info!("loaded '{}' as {} grid", path.display(), grid.dimensions());
    Ok(grid)
}

/// 将像素网格写入图像文件，格式由扩展名决定。
///
/// 写入失败时会删除残留的不完整文件。
///
/// # Errors
///
/// * 扩展名无法识别或写入失败：[`StegoError::ImageSave`]。
/// * 目标格式有损或不受支持：[`StegoError::UnsupportedFormat`]，不会创建任何文件。
/// * 通道数不是 1 到 4，或尺寸超出 `u32`：[`StegoError::InvalidLayout`]。
pub fn save(grid: &PixelGrid, path: &Path) -> Result<(), StegoError> {
    let format = ImageFormat::from_path(path).map_err(|source| StegoError::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;
    if !is_lossless(format) {
        return Err(StegoError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let image = DynamicImage::try_from(grid)?;
    if let Err(source) = image.save_with_format(path, format) {
        let _ = fs::remove_file(path);
        return Err(StegoError::ImageSave {
            path: path.to_path_buf(),
            source,
        });
    }

    log::info!("saved {} grid to '{}'", grid.dimensions(), path.display());
    Ok(())
}
