mod in_memory_content_repository;
mod json_content_repository;
mod traits;

pub use in_memory_content_repository::InMemoryContentRepository;
pub use json_content_repository::JsonContentRepository;
pub use traits::ContentRepository;
