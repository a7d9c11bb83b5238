//! Database schema and repositories

pub mod daily;
pub mod init;
pub mod puzzles;

pub use daily::DailyInfoRepository;
pub use init::init_database;
pub use puzzles::PuzzleRepository;
