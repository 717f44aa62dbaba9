pub mod error;
pub mod models;
pub mod urls;
pub mod auth;
pub mod classifier;
pub mod parsers;
pub mod collection;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod export;

// Re-export commonly used items
pub use error::*;
pub use models::*;
pub use urls::*;
pub use auth::*;
pub use classifier::*;
pub use parsers::*;
pub use collection::*;
pub use config::*;
pub use discovery::*;
pub use engine::*;
pub use export::*;
