#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
pub(crate) mod keys;
#[cfg(target_os = "windows")]
pub mod windows;
