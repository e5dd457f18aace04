#![cfg_attr(not(feature = "std"), no_std)]
pub mod clarke_transform;
pub mod cordic;
pub mod fixed_point;
pub mod interpolation;
pub mod sqrt;
pub mod trigonometry;
