//! Utility helpers: report serialization and file output.
pub mod serialization;

pub use serialization::FileUtils;
pub use serialization::JsonSerializer;
pub use serialization::ReportWriter;
pub use serialization::Serializer;
