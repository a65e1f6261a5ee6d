pub mod memory;
pub mod post;
pub mod user;

pub use memory::InMemoryRepository;
pub use post::PostgresPostRepository;
pub use user::PostgresUserRepository;
