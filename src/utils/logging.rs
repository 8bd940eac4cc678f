use anyhow::Result;
/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::fs;
use tracing::info;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `exam_mode`: 本次检查使用的模式
pub fn init_log_file(log_file_path: &str, exam_mode: &str) -> Result<()> {
    let log_header = format!(
        "{}\n试卷检查日志 - {} - 模式 {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        exam_mode,
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(max_concurrent: usize, exam_mode: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 试卷校验与评分键生成");
    info!("📊 最大并发数: {} | 模式: {}", max_concurrent, exam_mode);
    info!("{}", "=".repeat(60));
}

/// 记录试卷加载信息
pub fn log_papers_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待检查的试卷", total);
    info!("📋 将以每批 {} 个的方式处理\n", max_concurrent);
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `start`: 起始试卷编号
/// - `end`: 结束试卷编号
/// - `total`: 试卷总数
pub fn log_batch_start(
    batch_num: usize,
    total_batches: usize,
    start: usize,
    end: usize,
    total: usize,
) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批试卷: {}-{} / 共 {} 个", start, end, total);
    info!("{}", "=".repeat(60));
}

pub fn log_batch_complete(batch_num: usize, valid: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 第 {} 批完成: 通过 {}/{}", batch_num, valid, total);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `valid`: 校验通过的试卷数
/// - `invalid`: 存在问题的试卷数
/// - `failed`: 处理失败（读写错误）的试卷数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(valid: usize, invalid: usize, failed: usize, log_file_path: &str) {
    let total = valid + invalid + failed;
    info!("\n{}", "=".repeat(60));
    info!("📊 全部检查完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 通过: {}/{}", valid, total);
    info!("⚠️ 存在问题: {}", invalid);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
