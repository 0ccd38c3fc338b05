// src/api/http/mod.rs

mod chat;
mod feedback;
mod handlers;
mod router;
mod summary;

pub use chat::chat_handler;
pub use feedback::feedback_handler;
pub use handlers::health_handler;
pub use router::http_router;
pub use summary::summary_handler;
