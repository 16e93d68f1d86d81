pub mod commands;
pub mod history;
pub mod init;
pub mod manage;
pub mod run;
pub mod status;
