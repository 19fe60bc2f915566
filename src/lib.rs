pub mod calendar;
pub mod mcp;
pub mod model;
pub mod store;
