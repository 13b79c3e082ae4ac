pub mod file_path;
pub mod media;
pub mod password;
pub mod token;
pub mod webutils;
