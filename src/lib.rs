//! xctestrun - parse `.xctestrun` files into XCTest run configurations
//!
//! Supports format versions 1 and 2 of the property list Xcode writes for
//! `xcodebuild test-without-building`.

pub mod cli;
pub mod commands;
pub mod common;
pub mod testrun;

pub use common::{Error, Result};
pub use testrun::{
    decode, parse_file, FormatVersion, InstalledApp, ResolutionPolicy, SchemeData, TestConfig,
};
