//! 检查报告写入服务
//!
//! 只负责把报告写到磁盘，不关心检查流程

use crate::error::{AppError, AppResult};
use crate::services::paper_service::PaperReport;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 报告写入服务
///
/// - 每张试卷一个 `<名称>.report.json`
/// - 同时向运行日志追加一行摘要
pub struct ReportWriter {
    report_folder: PathBuf,
    log_file_path: String,
}

impl ReportWriter {
    pub fn new(report_folder: impl Into<PathBuf>, log_file_path: impl Into<String>) -> Self {
        Self {
            report_folder: report_folder.into(),
            log_file_path: log_file_path.into(),
        }
    }

    /// 写入 JSON 报告，返回报告路径
    pub async fn write_report(&self, report: &PaperReport, stem: &str) -> AppResult<PathBuf> {
        let path = self.report_folder.join(format!("{}.report.json", stem));
        let path_display = path.display().to_string();

        tokio::fs::create_dir_all(&self.report_folder)
            .await
            .map_err(|e| AppError::file_write_failed(self.report_folder.display().to_string(), e))?;

        let content = serde_json::to_string_pretty(report)
            .map_err(|e| AppError::file_write_failed(&path_display, e))?;

        tokio::fs::write(&path, content)
            .await
            .map_err(|e| AppError::file_write_failed(&path_display, e))?;

        debug!("写入报告: {}", path_display);
        Ok(path)
    }

    /// 向运行日志追加一行摘要
    pub fn append_summary(&self, report: &PaperReport, report_path: &Path) -> AppResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file_path)
            .map_err(|e| AppError::file_write_failed(&self.log_file_path, e))?;

        let status = if report.is_valid() { "通过" } else { "未通过" };
        let line = format!(
            "试卷 {} | {} | 题目 {} | 问题 {} | 报告: {}\n",
            report.title,
            status,
            report.questions.len(),
            report.issue_count(),
            report_path.display()
        );

        file.write_all(line.as_bytes())
            .map_err(|e| AppError::file_write_failed(&self.log_file_path, e))?;

        Ok(())
    }
}
