pub mod record;
pub mod report;
pub mod runner;

pub use record::ResultRecord;
pub use report::{write_json, write_record};
pub use runner::Scanner;
