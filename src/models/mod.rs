pub mod career_path;
pub mod course;
pub mod user;

pub use career_path::*;
pub use course::*;
pub use user::*;
