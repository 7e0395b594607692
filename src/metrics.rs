//! # 失真指标模块
//!
//! 比较两个尺寸相同的像素网格，计算：
//! - MSE (均方误差)
//! - PSNR (峰值信噪比，单位 dB)
//! - 每个通道的直方图相关系数 (1.0 表示分布完全相同)

use crate::constants::{HISTOGRAM_BINS, MAX_CHANNEL_VALUE};
use crate::error::StegoError;
use crate::grid::PixelGrid;
use std::collections::BTreeMap;

fn ensure_same_dimensions(a: &PixelGrid, b: &PixelGrid) -> Result<(), StegoError> {
    if a.dimensions() != b.dimensions() {
        return Err(StegoError::DimensionMismatch {
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }
    Ok(())
}

/// 计算两个网格的均方误差。空网格的 MSE 为 0。
///
/// 差值在 `i32` 中计算，避免 8 位减法回绕。
///
/// # Errors
///
/// 尺寸不同时返回 [`StegoError::DimensionMismatch`]。
pub fn mse(a: &PixelGrid, b: &PixelGrid) -> Result<f64, StegoError> {
    ensure_same_dimensions(a, b)?;

    let count = a.dimensions().len();
    if count == 0 {
        return Ok(0.0);
    }

    let sum: u64 = a
        .scan()
        .zip(b.scan())
        .map(|(x, y)| {
            let diff = i32::from(x) - i32::from(y);
            (diff * diff) as u64
        })
        .sum();

    Ok(sum as f64 / count as f64)
}

/// 由 MSE 换算 PSNR。MSE 为 0 时返回正无穷。
pub fn psnr_from_mse(mse: f64) -> f64 {
    if mse == 0.0 {
        return f64::INFINITY;
    }
    20.0 * (MAX_CHANNEL_VALUE / mse.sqrt()).log10()
}

/// 计算两个网格的峰值信噪比 (dB)，完全相同时为 `f64::INFINITY`。
///
/// # Errors
///
/// 尺寸不同时返回 [`StegoError::DimensionMismatch`]。
pub fn psnr(a: &PixelGrid, b: &PixelGrid) -> Result<f64, StegoError> {
    mse(a, b).map(psnr_from_mse)
}

/// 单个通道的 256 桶直方图。
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: [f64; HISTOGRAM_BINS],
}

impl Histogram {
    /// 统计 `grid` 中第 `channel` 个通道的取值频数。
    pub fn of_channel(grid: &PixelGrid, channel: usize) -> Self {
        let mut bins = [0.0; HISTOGRAM_BINS];
        for value in grid.channel_values(channel) {
            bins[usize::from(value)] += 1.0;
        }
        Self { bins }
    }

    pub fn bins(&self) -> &[f64; HISTOGRAM_BINS] {
        &self.bins
    }

    /// 最小-最大归一化到 [0, 1]。所有桶相等时全部归零。
    pub fn normalized(&self) -> Self {
        let min = self.bins.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.bins.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        let scale = if range > f64::EPSILON { 1.0 / range } else { 0.0 };

        let mut bins = self.bins;
        for bin in bins.iter_mut() {
            *bin = (*bin - min) * scale;
        }
        Self { bins }
    }

    /// 与另一直方图的 Pearson 相关系数。
    /// 分母为 0 (至少一方方差为 0) 时返回 1.0。
    pub fn correlation(&self, other: &Histogram) -> f64 {
        let n = HISTOGRAM_BINS as f64;
        let mean_a = self.bins.iter().sum::<f64>() / n;
        let mean_b = other.bins.iter().sum::<f64>() / n;

        let (mut num, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
        for (&a, &b) in self.bins.iter().zip(other.bins.iter()) {
            let da = a - mean_a;
            let db = b - mean_b;
            num += da * db;
            var_a += da * da;
            var_b += db * db;
        }

        let den = (var_a * var_b).sqrt();
        if den.abs() > f64::EPSILON {
            num / den
        } else {
            1.0
        }
    }
}

/// 计算每个通道归一化直方图之间的相关系数，键为通道索引。
///
/// # Errors
///
/// 尺寸不同时返回 [`StegoError::DimensionMismatch`]。
pub fn histogram_correlation(
    a: &PixelGrid,
    b: &PixelGrid,
) -> Result<BTreeMap<usize, f64>, StegoError> {
    ensure_same_dimensions(a, b)?;

    Ok((0..a.channels())
        .map(|channel| {
            let hist_a = Histogram::of_channel(a, channel).normalized();
            let hist_b = Histogram::of_channel(b, channel).normalized();
            (channel, hist_a.correlation(&hist_b))
        })
        .collect())
}

/// 一次比较得到的全部失真指标。
#[derive(Debug, Clone, PartialEq)]
pub struct DistortionReport {
    pub mse: f64,
    pub psnr: f64,
    pub histogram_correlation: BTreeMap<usize, f64>,
}

impl DistortionReport {
    /// 各通道直方图相关系数的平均值，没有通道时为 1.0。
    pub fn mean_histogram_correlation(&self) -> f64 {
        if self.histogram_correlation.is_empty() {
            return 1.0;
        }
        self.histogram_correlation.values().sum::<f64>() / self.histogram_correlation.len() as f64
    }
}

/// 一次性计算 MSE、PSNR 与直方图相关系数。
///
/// # Errors
///
/// 尺寸不同时返回 [`StegoError::DimensionMismatch`]。
pub fn compare(a: &PixelGrid, b: &PixelGrid) -> Result<DistortionReport, StegoError> {
    let mse = mse(a, b)?;
    Ok(DistortionReport {
        mse,
        psnr: psnr_from_mse(mse),
        histogram_correlation: histogram_correlation(a, b)?,
    })
}
