//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像中隐藏或恢复消息，并评估嵌入造成的失真。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复消息，并计算 MSE、PSNR 与直方图相关系数。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 在图像中隐藏一段消息，并报告失真指标。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的消息。
    Reveal(RevealArgs),

    /// 比较两张图像，输出 MSE、PSNR 与各通道直方图相关系数。
    Metrics(MetricsArgs),

    /// 显示图像可容纳的最大消息长度。
    Capacity(CapacityArgs),

    /// 在内存中执行往返自检，并列出不同消息长度下的失真。
    Validate(ValidateArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("payload").required(true).args(["message", "text"])))]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 直接在命令行给出的消息。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 要隐藏的内容所在的文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 结果图像的输出路径，默认为输入目录下的 `doctored_<name>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 不计算嵌入后的失真指标。
    #[arg(long)]
    pub no_metrics: bool,
}

/// 'reveal' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RevealArgs {
    /// 已隐藏消息的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 保存恢复内容的路径，省略时直接打印到标准输出。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'metrics' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct MetricsArgs {
    /// 原始图像。
    #[arg(short, long)]
    pub original: PathBuf,

    /// 经过隐写的图像。
    #[arg(short, long)]
    pub modified: PathBuf,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}

/// 'validate' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// 作为载体的图像，省略时合成一张 100x100 的纯色图像。
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// 参与测试的消息，可多次指定；省略时使用内置的三条消息。
    #[arg(short, long)]
    pub message: Vec<String>,
}
