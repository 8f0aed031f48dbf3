pub mod activities_service;
pub mod activity_board_service;
