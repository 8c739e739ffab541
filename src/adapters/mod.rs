// Adapters layer: concrete implementations for external systems (http, payload format, terminal output).

pub mod http;
pub mod json;
pub mod terminal;

pub use http::HttpTransport;
pub use json::JsonDecoder;
pub use terminal::{TextDetailView, TextListView};
