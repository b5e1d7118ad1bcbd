//! Small utility types shared by SmartLearn crates.

pub mod secret_string;

pub use secret_string::SecretString;
