pub mod activities_api;
pub mod board;
