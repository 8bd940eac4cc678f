use question_paper_check::evaluation::EvaluationAnswer;
use question_paper_check::models::{load_all_papers, load_question_paper};
use question_paper_check::{
    build_evaluation_key, correct_option_keys, logger, validate, App, Config, ExamMode, OptionKey,
    Question, QuestionOption, QuestionType,
};
use serde_json::json;
use std::path::PathBuf;

fn two_plus_two() -> Question {
    Question::from_value(json!({
        "questionType": "MCQS",
        "questionName": "2+2=?",
        "singleChoiceOptions": [
            { "name": "3", "isSelected": false },
            { "name": "4", "isSelected": true },
            { "name": "5", "isSelected": false },
            { "name": "6", "isSelected": false }
        ]
    }))
    .expect("题目解析失败")
}

/// 每个测试使用独立的临时目录
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("qpc_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("创建临时目录失败");
    dir
}

#[test]
fn test_mcqs_exam_scenario() {
    let question = two_plus_two();
    assert!(validate(&question, &ExamMode::Exam).is_empty());

    let correct = correct_option_keys(&question);
    let record = build_evaluation_key(&question, &correct, None, None).unwrap();
    assert_eq!(record.question_type, QuestionType::Mcqs);
    assert_eq!(record.correct_options().unwrap(), &[OptionKey::Index(1)]);
}

#[test]
fn test_mcqs_survey_ignores_selection() {
    let mut question = two_plus_two();
    assert!(validate(&question, &ExamMode::Survey).is_empty());

    if let Some(options) = question.options_mut() {
        options.iter_mut().for_each(|o| o.is_selected = false);
    }
    assert!(validate(&question, &ExamMode::Survey).is_empty());
    assert_eq!(validate(&question, &ExamMode::Exam).len(), 1);
}

#[test]
fn test_numeric_scenario() {
    let question = Question::from_value(json!({
        "questionType": "NUMERIC",
        "questionName": "How many sides does a square have?",
        "validAnswers": []
    }))
    .unwrap();

    let issues = validate(&question, &ExamMode::Exam);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message, "must have at least one valid answer");
    assert!(validate(&question, &ExamMode::Survey).is_empty());
}

#[test]
fn test_round_trip_with_persisted_ids() {
    let question = Question::Mcqs {
        base: Default::default(),
        single_choice_options: vec![
            QuestionOption::new("a").with_id("o1").selected(true),
            QuestionOption::new("b").with_id("o2"),
            QuestionOption::new("c").with_id("o3"),
            QuestionOption::new("d").with_id("o4"),
        ],
    };
    let record = build_evaluation_key(&question, &[OptionKey::from("o1")], None, None).unwrap();

    assert_eq!(record.correct_options().unwrap(), &[OptionKey::from("o1")]);
    match &record.answer {
        EvaluationAnswer::Choice { options, .. } => {
            let ids: Vec<String> = options.iter().map(|o| o.id.to_string()).collect();
            assert_eq!(ids, vec!["\"o1\"", "\"o2\"", "\"o3\"", "\"o4\""]);
        }
        other => panic!("期望选择题评分键, 实际: {:?}", other),
    }
}

#[test]
fn test_load_paper_from_json_file() {
    let dir = scratch_dir("load_json");
    let path = dir.join("week_1.json");
    std::fs::write(
        &path,
        json!({
            "title": "Week 1",
            "questions": [
                { "questionType": "ONE_WORD", "questionName": "Capital of Japan?", "subjectiveAnswerText": "Tokyo" }
            ]
        })
        .to_string(),
    )
    .unwrap();

    let paper = tokio_test::block_on(load_question_paper(&path)).expect("加载试卷失败");
    assert_eq!(paper.title, "Week 1");
    assert_eq!(paper.report_stem(), "week_1.json");
    assert!(validate(&paper.questions[0], &ExamMode::Exam).is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_load_all_papers_skips_broken_files() {
    let dir = scratch_dir("load_all");
    std::fs::write(
        dir.join("a.toml"),
        "title = \"A\"\n\n[[questions]]\nquestionType = \"LONG_ANSWER\"\nquestionName = \"Explain\"\nsubjectiveAnswerText = \"Because\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("b.json"),
        r#"{"title":"B","questions":[{"questionType":"SORTING","questionName":"x"}]}"#,
    )
    .unwrap();
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let papers = load_all_papers(dir.to_str().unwrap()).await.unwrap();
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].title, "A");

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_app_writes_reports() {
    logger::init();

    let dir = scratch_dir("app_run");
    let paper_folder = dir.join("papers");
    std::fs::create_dir_all(&paper_folder).unwrap();
    std::fs::write(
        paper_folder.join("good.json"),
        json!({
            "title": "Good",
            "questions": [{
                "questionType": "TRUE_FALSE",
                "questionName": "Water is wet",
                "trueFalseOptions": [
                    { "name": "True", "isSelected": true },
                    { "name": "False", "isSelected": false }
                ]
            }]
        })
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        paper_folder.join("bad.json"),
        json!({
            "title": "Bad",
            "questions": [{ "questionType": "MCQM", "questionName": "<p><br></p>" }]
        })
        .to_string(),
    )
    .unwrap();

    let config = Config {
        max_concurrent_papers: 1,
        paper_folder: paper_folder.to_string_lossy().to_string(),
        report_folder: dir.join("reports").to_string_lossy().to_string(),
        exam_mode: ExamMode::Exam,
        verbose_logging: false,
        output_log_file: dir.join("output.txt").to_string_lossy().to_string(),
    };

    let stats = App::initialize(config).await.unwrap().run().await.unwrap();
    assert_eq!(stats.valid, 1);
    assert_eq!(stats.invalid, 1);
    assert_eq!(stats.failed, 0);

    let good: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.join("reports").join("good.json.report.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(good["questions"][0]["evaluationKey"]["correctOptions"], json!([0]));

    let bad: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.join("reports").join("bad.json.report.json")).unwrap(),
    )
    .unwrap();
    let paths: Vec<&str> = bad["questions"][0]["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["questionName", "multipleChoiceOptions"]);

    let log = std::fs::read_to_string(dir.join("output.txt")).unwrap();
    assert!(log.contains("试卷 Good | 通过"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_same_stem_papers_get_separate_reports() {
    let dir = scratch_dir("same_stem");
    let paper_folder = dir.join("papers");
    std::fs::create_dir_all(&paper_folder).unwrap();
    std::fs::write(
        paper_folder.join("w.json"),
        json!({
            "title": "W json",
            "questions": [{
                "questionType": "ONE_WORD",
                "questionName": "Opposite of hot?",
                "subjectiveAnswerText": "cold"
            }]
        })
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        paper_folder.join("w.toml"),
        "title = \"W toml\"\n\n[[questions]]\nquestionType = \"NUMERIC\"\nquestionName = \"1+1=?\"\nvalidAnswers = []\n",
    )
    .unwrap();

    let report_folder = dir.join("reports");
    let config = Config {
        max_concurrent_papers: 2,
        paper_folder: paper_folder.to_string_lossy().to_string(),
        report_folder: report_folder.to_string_lossy().to_string(),
        exam_mode: ExamMode::Exam,
        verbose_logging: false,
        output_log_file: dir.join("output.txt").to_string_lossy().to_string(),
    };

    let stats = App::initialize(config).await.unwrap().run().await.unwrap();
    assert_eq!(stats.valid, 1);
    assert_eq!(stats.invalid, 1);

    let mut reports: Vec<String> = std::fs::read_dir(&report_folder)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    reports.sort();
    assert_eq!(reports, vec!["w.json.report.json", "w.toml.report.json"]);

    let _ = std::fs::remove_dir_all(&dir);
}
