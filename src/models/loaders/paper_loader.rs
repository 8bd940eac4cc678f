use crate::models::paper::QuestionPaper;
use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 支持的试卷文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaperFormat {
    Toml,
    Json,
}

fn paper_format(path: &Path) -> Option<PaperFormat> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => Some(PaperFormat::Toml),
        Some("json") => Some(PaperFormat::Json),
        _ => None,
    }
}

/// TOML 值转换为 JSON 值，日期时间转成 RFC 3339 字符串
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

/// 解析试卷文本
///
/// 先解析成 JSON 值，再交给 `QuestionPaper::from_value` 检查题型
fn parse_paper(content: &str, format: PaperFormat) -> Result<QuestionPaper> {
    let value: serde_json::Value = match format {
        PaperFormat::Toml => {
            let table: toml::Table = toml::from_str(content).context("TOML格式错误")?;
            toml_to_json(toml::Value::Table(table))
        }
        PaperFormat::Json => serde_json::from_str(content).context("JSON格式错误")?,
    };
    Ok(QuestionPaper::from_value(value)?)
}

/// 从 TOML 或 JSON 文件加载试卷
pub async fn load_question_paper(paper_file_path: &Path) -> Result<QuestionPaper> {
    let format = paper_format(paper_file_path).with_context(|| {
        format!("不支持的试卷文件格式: {}", paper_file_path.display())
    })?;

    let content = fs::read_to_string(paper_file_path)
        .await
        .with_context(|| format!("无法读取试卷文件: {}", paper_file_path.display()))?;

    let paper = parse_paper(&content, format)
        .with_context(|| format!("无法解析试卷文件: {}", paper_file_path.display()))?;

    Ok(paper.with_file_path(paper_file_path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有试卷文件
///
/// 按文件名排序后并发读取，单个文件失败只记录警告
pub async fn load_all_papers(folder_path: &str) -> Result<Vec<QuestionPaper>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut paper_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if paper_format(&path).is_some() {
            paper_files.push(path);
        }
    }
    paper_files.sort();

    if paper_files.is_empty() {
        tracing::warn!("在文件夹 {} 中没有找到试卷文件", folder_path);
        return Ok(Vec::new());
    }

    let results = join_all(paper_files.iter().map(|path| load_question_paper(path))).await;

    let mut papers = Vec::new();
    for (path, result) in paper_files.iter().zip(results) {
        match result {
            Ok(paper) => {
                tracing::info!(
                    "成功加载 {}: {} 个题目",
                    path.file_name().unwrap_or_default().to_string_lossy(),
                    paper.questions.len()
                );
                papers.push(paper);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_paper() {
        let content = r#"
title = "Algebra quiz"
subject = "Math"

[[questions]]
questionType = "NUMERIC"
questionName = "<p>3 * 3 = ?</p>"
validAnswers = [9]
numericType = "SINGLE_DIGIT_NON_NEGATIVE_INTEGER"

[[questions]]
questionType = "TRUE_FALSE"
questionName = "2 is prime"
trueFalseOptions = [
    { name = "True", isSelected = true },
    { name = "False", isSelected = false },
]
"#;
        let paper = parse_paper(content, PaperFormat::Toml).unwrap();
        assert_eq!(paper.title, "Algebra quiz");
        assert_eq!(paper.questions.len(), 2);
    }

    #[test]
    fn test_parse_toml_native_datetime() {
        let content = r#"
title = "Dated quiz"
createdOn = 2024-03-01T08:30:00Z

[[questions]]
questionType = "ONE_WORD"
questionName = "Capital of Italy?"
subjectiveAnswerText = "Rome"
"#;
        let paper = parse_paper(content, PaperFormat::Toml).unwrap();
        let created_on = paper.created_on.expect("createdOn 应被解析");
        assert_eq!(created_on.to_rfc3339(), "2024-03-01T08:30:00+00:00");
        assert_eq!(paper.questions.len(), 1);
    }

    #[test]
    fn test_parse_rejects_unknown_question_type() {
        let content = r#"{"title":"t","questions":[{"questionType":"DRAG_DROP","questionName":"x"}]}"#;
        let err = parse_paper(content, PaperFormat::Json).unwrap_err();
        assert!(format!("{:#}", err).contains("unsupported question type"));
    }

    #[test]
    fn test_paper_format_by_extension() {
        assert_eq!(paper_format(Path::new("a.toml")), Some(PaperFormat::Toml));
        assert_eq!(paper_format(Path::new("a.json")), Some(PaperFormat::Json));
        assert_eq!(paper_format(Path::new("a.txt")), None);
    }
}
