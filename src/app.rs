//! 批量试卷检查 - 编排层
//!
//! 扫描试卷目录，分批并发检查，每张试卷写出一份报告，最后汇总统计。

use crate::config::Config;
use crate::models::{load_all_papers, QuestionPaper};
use crate::services::{PaperService, ReportWriter};
use crate::utils::logging::{
    init_log_file, log_batch_complete, log_batch_start, log_papers_loaded, log_startup,
    print_final_stats,
};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    paper_service: PaperService,
    writer: Arc<ReportWriter>,
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    /// 全部题目校验通过
    pub valid: usize,
    /// 存在校验问题
    pub invalid: usize,
    /// 读写或契约错误
    pub failed: usize,
}

impl ProcessingStats {
    fn merge(&mut self, other: ProcessingStats) {
        self.valid += other.valid;
        self.invalid += other.invalid;
        self.failed += other.failed;
    }

    pub fn total(&self) -> usize {
        self.valid + self.invalid + self.failed
    }
}

/// 单张试卷的处理结果
enum PaperOutcome {
    Valid,
    Invalid,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file, config.exam_mode.as_str())?;

        log_startup(config.max_concurrent_papers, config.exam_mode.as_str());

        let paper_service = PaperService::new(&config);
        let writer = Arc::new(ReportWriter::new(
            &config.report_folder,
            config.output_log_file.clone(),
        ));

        Ok(Self {
            config,
            paper_service,
            writer,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        info!("\n📁 正在扫描待检查的试卷...");
        let all_papers = load_all_papers(&self.config.paper_folder).await?;

        if all_papers.is_empty() {
            warn!("⚠️ 没有找到待检查的试卷文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        log_papers_loaded(all_papers.len(), self.config.max_concurrent_papers);

        let stats = self.process_all_papers(all_papers).await?;

        print_final_stats(
            stats.valid,
            stats.invalid,
            stats.failed,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 分批处理所有试卷
    async fn process_all_papers(&self, all_papers: Vec<QuestionPaper>) -> Result<ProcessingStats> {
        let batch_size = self.config.max_concurrent_papers.max(1);
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total_papers = all_papers.len();
        let total_batches = total_papers.div_ceil(batch_size);
        let mut stats = ProcessingStats::default();

        for (batch_idx, batch_papers) in all_papers.chunks(batch_size).enumerate() {
            let batch_start = batch_idx * batch_size;
            let batch_end = batch_start + batch_papers.len();

            log_batch_start(
                batch_idx + 1,
                total_batches,
                batch_start + 1,
                batch_end,
                total_papers,
            );

            let batch_stats = self
                .process_batch(batch_papers, batch_start, semaphore.clone())
                .await?;

            log_batch_complete(batch_idx + 1, batch_stats.valid, batch_stats.total());
            stats.merge(batch_stats);
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_papers: &[QuestionPaper],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<ProcessingStats> {
        let mut batch_handles = Vec::new();

        for (idx, paper) in batch_papers.iter().enumerate() {
            let paper_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;
            let service = self.paper_service.clone();
            let writer = Arc::clone(&self.writer);
            let paper = paper.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                check_single_paper(&service, &writer, &paper, paper_index).await
            });
            batch_handles.push((paper_index, handle));
        }

        let mut result = ProcessingStats::default();

        for (paper_index, handle) in batch_handles {
            match handle.await {
                Ok(Ok(PaperOutcome::Valid)) => result.valid += 1,
                Ok(Ok(PaperOutcome::Invalid)) => result.invalid += 1,
                Ok(Err(e)) => {
                    error!("[试卷 {}] ❌ 处理过程中发生错误: {:#}", paper_index, e);
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[试卷 {}] 任务执行失败: {}", paper_index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 检查一张试卷并写出报告
async fn check_single_paper(
    service: &PaperService,
    writer: &ReportWriter,
    paper: &QuestionPaper,
    paper_index: usize,
) -> Result<PaperOutcome> {
    let report = service.check_paper(paper, paper_index)?;
    let report_path = writer.write_report(&report, &paper.report_stem()).await?;
    writer.append_summary(&report, &report_path)?;

    info!("[试卷 {}] 📝 报告已写入: {}", paper_index, report_path.display());

    if report.is_valid() {
        Ok(PaperOutcome::Valid)
    } else {
        Ok(PaperOutcome::Invalid)
    }
}
