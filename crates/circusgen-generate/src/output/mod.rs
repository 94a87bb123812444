pub mod csv;

pub use self::csv::{WriteMode, WriteStats, write_rows};
