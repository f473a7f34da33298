//! Port traits between the domain and the outside world.

pub mod config_port;
pub mod feed_port;
