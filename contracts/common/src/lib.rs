#![no_std]

pub mod codes;
pub mod roles;
