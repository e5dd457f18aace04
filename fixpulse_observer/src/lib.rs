#![cfg_attr(not(feature = "std"), no_std)]
pub mod blinker;
pub mod subject;
