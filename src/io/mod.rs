pub mod output;

pub use output::{
    create_writer, JsonWriter, MarkdownWriter, OutputFormat, Report, ReportWriter, RoasReport,
    SampleSizeReport, TerminalWriter,
};
