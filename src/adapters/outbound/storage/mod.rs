mod in_memory_repository;
mod json_file_repository;

pub use in_memory_repository::InMemoryRiskRepository;
pub use json_file_repository::JsonFileRiskRepository;
