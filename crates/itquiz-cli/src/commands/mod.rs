pub mod init;
pub mod leaderboard;
pub mod play;
pub mod validate;
