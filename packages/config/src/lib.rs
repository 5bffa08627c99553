// ABOUTME: Configuration constants shared by the calculator binaries
// ABOUTME: Environment variable names and their default values

pub mod constants;
