pub mod csv_exporter;
pub mod d2l_converter;
pub mod page_renderer;
pub mod question_store;

pub use csv_exporter::CsvExporter;
pub use d2l_converter::ConversionSummary;
pub use question_store::{BatchStats, QuestionStore};
