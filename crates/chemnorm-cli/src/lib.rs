//! Library components of the `chemnorm` command-line tool.

#![deny(unsafe_code)]

pub mod logging;
pub mod pipeline;
