pub mod generate;
pub mod grade;
pub mod init;
pub mod show;
pub mod validate;
pub mod verify;
