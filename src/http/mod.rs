pub mod middleware;
pub mod routing;
pub mod types;
