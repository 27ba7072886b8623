//! # 评论编辑器核心：命令行入口
//!
//! 本文件仅负责日志初始化、配置加载与子命令分派，
//! 便于在没有编辑器宿主的情况下单独检查各条流水线。

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use comment_editor::error::AppError;
use comment_editor::image_intake::{ImageIntake, IntakeProfile, RawAsset};
use comment_editor::paste::{self, ClipboardPayload, SystemClipboard};
use comment_editor::settings::{self, EditorConfig};
use comment_editor::strip::strip;
use serde_json::json;

#[derive(Parser)]
#[command(name = "comment-editor", version, about = "Comment editor image intake and paste cleanup")]
struct Cli {
    /// JSON 配置文件路径
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 对图片文件执行接收流水线，输出结论
    Intake {
        path: PathBuf,
        /// 声明的媒体类型
        #[arg(long, default_value = "image/png")]
        mime: String,
        /// quality / balanced / speed
        #[arg(long)]
        profile: Option<String>,
    },
    /// 清理文件中的富文本标记（按文字处理器内容处理）
    Sanitize { path: PathBuf },
    /// 读取系统剪贴板并输出清理结果
    Paste,
    /// 剥离文件中的全部标记
    Strip { path: PathBuf },
    /// 输出生效配置
    Config,
}

fn load(path: Option<&PathBuf>) -> Result<EditorConfig, AppError> {
    match path {
        Some(path) => settings::load_config(path),
        None => Ok(EditorConfig::default()),
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = load(cli.config.as_ref())?;

    match cli.command {
        Commands::Intake { path, mime, profile } => {
            let intake = ImageIntake::new(config.intake.clone())?;
            if let Some(profile) = profile {
                intake.set_profile(IntakeProfile::parse(&profile)?)?;
            }
            let bytes = fs::read(&path)?;
            log::info!("🖼️ 处理图片: {}（{} 字节）", path.display(), bytes.len());
            let verdict = intake.intake(RawAsset::new(bytes, mime)).await?;
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }
        Commands::Sanitize { path } => {
            let markup = fs::read_to_string(&path)?;
            let result = paste::sanitize(&ClipboardPayload::html(markup));
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Paste => {
            let payload =
                paste::read_payload(&SystemClipboard, config.session.clipboard_read_timeout_ms)
                    .await?;
            let result = paste::sanitize(&payload);
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "origin": payload.origin(),
                    "text": result.text,
                    "was_modified": result.was_modified,
                }))?
            );
        }
        Commands::Strip { path } => {
            let markup = fs::read_to_string(&path)?;
            println!("{}", strip(&markup));
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        log::error!("❌ 执行失败 [{}]: {}", err.code(), err);
        std::process::exit(1);
    }
}
