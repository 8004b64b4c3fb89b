mod http;

pub use http::HttpBackend;
pub use http::USER_ID_HEADER;
