pub mod debug_dump;
pub mod http;
