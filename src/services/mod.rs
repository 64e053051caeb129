pub mod conversion;
pub mod extractor;
pub mod staging;
