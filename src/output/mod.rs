//! Output generation module

pub mod export;
pub mod formatter;
pub mod report;

pub use formatter::{ConsoleFormatter, JsonFormatter, MarkdownFormatter, OutputFormatter, ReportGenerator};
pub use report::{AnalysisReport, ReportAssembler};
