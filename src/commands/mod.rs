pub mod create;
pub mod delete;
pub mod edit;
pub mod init;
pub mod lifecycle;
pub mod list;
pub mod milestone;
pub mod show;
