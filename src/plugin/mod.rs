pub mod dir;
pub mod file_name;
pub mod keep;
