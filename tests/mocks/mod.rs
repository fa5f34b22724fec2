//! Mock implementations of the repository traits for integration tests.

mod mock_content_repository;

pub use mock_content_repository::MockContentRepository;
