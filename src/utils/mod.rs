pub mod url;

pub use self::url::{ParsedUrl, QueryParam, remove_port};
