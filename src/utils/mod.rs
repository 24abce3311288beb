pub mod machine_output;
pub mod paths;
pub mod platform;
pub mod sanitize;
