// HTTP surface of the calculation service
pub mod http;
