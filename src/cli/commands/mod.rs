pub mod extract;
pub mod init;
pub mod paste;
pub mod preview;
