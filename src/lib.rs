// Library interface, shared by the binary and the integration tests.

pub mod api_model;
pub mod command_line_interface;
pub mod constants;
pub mod error;
pub mod internal_api;
pub mod item_repository;
pub mod warp_api;
