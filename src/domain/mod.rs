pub mod analysis;
pub mod avoid_list;
pub mod common;
pub mod profile;
pub mod storage;
