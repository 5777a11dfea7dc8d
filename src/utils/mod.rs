pub mod content_guard;
pub mod fetch;
pub mod pdf;
