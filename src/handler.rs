//! # 命令处理逻辑模块
//!
//! 包含处理各个子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写与指标函数以及向用户报告结果。

use crate::capacity::{capacity_of, max_message_bytes};
use crate::cli::{CapacityArgs, HideArgs, MetricsArgs, RevealArgs, ValidateArgs};
use crate::constants::{
    DEFAULT_OUTPUT_PREFIX, VALIDATION_IMAGE_SIZE, VALIDATION_MESSAGES, VALIDATION_PIXEL,
};
use crate::embed::encode;
use crate::extract::reveal;
use crate::grid::PixelGrid;
use crate::image_io::{load, save};
use crate::metrics::{DistortionReport, compare, mse, psnr_from_mse};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

fn load_image(path: &Path) -> Result<PixelGrid> {
    load(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 未指定输出路径时，在输入图像所在目录生成 `doctored_<name>.png`。
pub fn default_output_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!("{DEFAULT_OUTPUT_PREFIX}{stem}.png"))
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像与消息、检查隐写空间是否足够、嵌入消息并写入目标图像，
/// 最后重新读取写入的文件，报告与原图之间的 MSE 和 PSNR。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 消息为空。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像没有足够的空间来隐藏消息。
/// * 无法写入到目标图像文件 (包括有损或不受支持的格式)。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let cover = load_image(&args.image)?;

    let payload = match (&args.message, &args.text) {
        (Some(message), _) => message.clone().into_bytes(),
        (None, Some(text)) => fs::read(text).with_context(|| {
            format!(
                "Unable to read text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("Either --message or --text must be given."),
    };
    anyhow::ensure!(!payload.is_empty(), "The message to hide is empty.");

    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_output_path(&args.image));
    ensure_writable(&dest, args.force)?;

    let stego = encode(&cover, &payload).with_context(|| {
        format!(
            "Not enough space in the image to hide the text. \nMaximum message length: {} bytes",
            max_message_bytes(cover.dimensions()).to_string().green().bold()
        )
    })?;

    save(&stego, &dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The message has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    if !args.no_metrics {
        let written = load_image(&dest)?;
        let mse = mse(&cover, &written).with_context(|| {
            "The saved image no longer matches the cover dimensions."
        })?;
        println!("MSE:  {}", format!("{mse:.5}").green().bold());
        println!(
            "PSNR: {} dB",
            format!("{:.2}", psnr_from_mse(mse)).green().bold()
        );
    }

    Ok(())
}

/// 处理 'Reveal' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像、提取隐藏的消息，
/// 然后写入目标文件或打印到标准输出。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中没有找到定界符，即不存在隐藏消息。
/// * 目标文件已存在且未指定 `--force`，或无法写入。
pub fn handle_reveal(args: RevealArgs) -> Result<()> {
    let grid = load_image(&args.image)?;

    let payload = reveal(&grid).with_context(|| {
        format!(
            "No hidden message found in '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    match &args.text {
        Some(path) => {
            ensure_writable(path, args.force)?;
            fs::write(path, &payload).with_context(|| {
                format!(
                    "Unable to write to target text file: {}",
                    path.to_string_lossy().red().bold()
                )
            })?;
            println!(
                "The message has been successfully recovered and saved: {}",
                path.to_string_lossy().green().bold()
            );
        }
        None => {
            println!("Hidden message: {}", String::from_utf8_lossy(&payload));
        }
    }

    Ok(())
}

fn print_report(report: &DistortionReport) {
    println!("MSE:  {}", format!("{:.5}", report.mse).green().bold());
    println!("PSNR: {} dB", format!("{:.2}", report.psnr).green().bold());
    for (channel, correlation) in &report.histogram_correlation {
        println!("Histogram correlation (channel {channel}): {correlation:.4}");
    }
    println!(
        "Histogram correlation (mean): {}",
        format!("{:.4}", report.mean_histogram_correlation()).green().bold()
    );
}

/// 处理 'Metrics' 命令的执行逻辑。
///
/// # Errors
///
/// 任一图像无法读取，或两张图像尺寸不同时返回错误。
pub fn handle_metrics(args: MetricsArgs) -> Result<()> {
    let original = load_image(&args.original)?;
    let modified = load_image(&args.modified)?;

    let report = compare(&original, &modified).with_context(|| {
        format!(
            "Unable to compare {} with {}: images must have the same dimensions.",
            args.original.to_string_lossy().red().bold(),
            args.modified.to_string_lossy().red().bold()
        )
    })?;

    print_report(&report);
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑。
///
/// # Errors
///
/// 图像无法读取时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let grid = load_image(&args.image)?;
    let dims = grid.dimensions();

    println!("Dimensions: {dims}");
    println!("Capacity: {} bytes", capacity_of(dims));
    println!(
        "Maximum message length: {} bytes",
        max_message_bytes(dims).to_string().green().bold()
    );
    Ok(())
}

/// 单条消息的自检结果。
#[derive(Debug, Clone)]
pub struct ValidationRow {
    pub message_len: usize,
    pub report: DistortionReport,
    pub round_trip: bool,
}

/// 对每条消息执行 嵌入、提取、比较，返回失真与往返结果。
///
/// # Errors
///
/// 消息超出载体容量时返回错误。
pub fn run_validation(cover: &PixelGrid, messages: &[String]) -> Result<Vec<ValidationRow>> {
    messages
        .iter()
        .map(|message| {
            let stego = encode(cover, message.as_bytes()).with_context(|| {
                format!(
                    "Failed to hide a message of {} bytes.",
                    message.len().to_string().red().bold()
                )
            })?;
            let report = compare(cover, &stego)?;
            let round_trip = reveal(&stego).is_ok_and(|payload| payload == message.as_bytes());
            Ok(ValidationRow {
                message_len: message.len(),
                report,
                round_trip,
            })
        })
        .collect()
}

/// 处理 'Validate' 命令的执行逻辑。
///
/// # Errors
///
/// 载体图像无法读取、消息超出容量，或任一消息往返失败时返回错误。
pub fn handle_validate(args: ValidateArgs) -> Result<()> {
    let cover = match &args.image {
        Some(path) => load_image(path)?,
        None => PixelGrid::filled(
            VALIDATION_IMAGE_SIZE,
            VALIDATION_IMAGE_SIZE,
            &VALIDATION_PIXEL,
        )?,
    };
    let messages: Vec<String> = if args.message.is_empty() {
        VALIDATION_MESSAGES.iter().map(|m| m.to_string()).collect()
    } else {
        args.message.clone()
    };

    let rows = run_validation(&cover, &messages)?;

    println!(
        "{:<15} | {:<10} | {:<10} | {:<15} | Round trip",
        "Message Length", "MSE", "PSNR (dB)", "Hist Corr (Avg)"
    );
    println!("{}", "-".repeat(75));
    for row in &rows {
        let status = if row.round_trip {
            "OK".green().bold()
        } else {
            "FAILED".red().bold()
        };
        println!(
            "{:<15} | {:<10.5} | {:<10.2} | {:<15.4} | {}",
            row.message_len,
            row.report.mse,
            row.report.psnr,
            row.report.mean_histogram_correlation(),
            status
        );
    }

    let failures = rows.iter().filter(|row| !row.round_trip).count();
    anyhow::ensure!(
        failures == 0,
        "Round trip failed for {} message(s).",
        failures.to_string().red().bold()
    );
    Ok(())
}
