pub mod raw_input;
pub mod shell;
pub mod wheel_sink;
