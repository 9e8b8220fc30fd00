pub mod curl;
pub mod ipinfo;
pub mod weather;

pub use curl::CurlTool;
pub use ipinfo::IpInfoTool;
pub use weather::WeatherTool;
