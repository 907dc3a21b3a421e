pub mod http;
pub mod notify;
pub mod token_file;

pub use http::HttpBackend;
pub use notify::LogNotifier;
pub use token_file::FileTokenStore;
