pub mod analysis;
pub mod server;
