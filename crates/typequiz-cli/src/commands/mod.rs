pub mod init;
pub mod play;
pub mod questions;
