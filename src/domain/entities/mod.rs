pub mod application;
pub mod system_info;
