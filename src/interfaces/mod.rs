pub mod http;
pub mod stdio;
pub mod tools;
