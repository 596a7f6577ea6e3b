//! Document-analysis provider backed by Textract.

mod analyzer;

pub use analyzer::TextractAnalyzer;
