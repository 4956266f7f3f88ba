pub mod alumnus;

pub use alumnus::{alumni, find_by_uname, Alumnus};
