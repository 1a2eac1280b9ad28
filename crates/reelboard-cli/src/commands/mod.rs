pub mod simulate;
pub mod status;
pub mod submit;
pub mod watch;
