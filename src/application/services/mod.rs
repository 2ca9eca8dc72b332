pub mod context_assembler;
pub mod extraction_service;
pub mod generation_adapter;

pub use context_assembler::ContextAssembler;
pub use extraction_service::ExtractionService;
pub use generation_adapter::GenerationAdapter;
