/// Use cases module containing application business logic orchestration
mod manage_risks;

pub use manage_risks::{ManageRisksUseCase, DEFAULT_EXPORT_BULK_SIZE};
