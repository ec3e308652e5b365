#![cfg_attr(not(test), no_std)]

pub mod capture;
pub mod report;
#[cfg(feature = "esp-hal-runtime")]
pub mod runtime;
