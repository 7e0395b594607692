use clap::Parser;

use lsb_veil::{
    cli::{Cli, Commands},
    handler::{handle_capacity, handle_hide, handle_metrics, handle_reveal, handle_validate},
};

/// 程序的主入口点
///
/// 初始化日志 (由 `RUST_LOG` 控制)，解析命令行参数，
/// 并根据子命令将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 解析命令行参数
    let cli = Cli::parse();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Hide(args) => handle_hide(args),
        Commands::Reveal(args) => handle_reveal(args),
        Commands::Metrics(args) => handle_metrics(args),
        Commands::Capacity(args) => handle_capacity(args),
        Commands::Validate(args) => handle_validate(args),
    }
}
