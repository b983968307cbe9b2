pub mod export;

pub use export::ExportConfig;
