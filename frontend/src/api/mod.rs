//! Browser side of the REST API: session token handling and the HTTP gateway.

pub mod gateway;
pub mod session;

pub use gateway::ApiGateway;
