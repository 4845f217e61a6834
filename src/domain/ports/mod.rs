pub mod announcement_repository;
pub mod price_source;
pub mod trade_repository;
pub mod user_repository;
