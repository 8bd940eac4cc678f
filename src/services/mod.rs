pub mod paper_service;
pub mod report_writer;

pub use paper_service::{PaperReport, PaperService, QuestionReport};
pub use report_writer::ReportWriter;
