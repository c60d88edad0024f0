pub mod csv;
pub mod file;
pub mod sample;
pub mod traits;
pub mod types;

pub use csv::{parse_csv, ParseOutcome, RejectReason, RejectedRow};
pub use file::{CsvFileSource, TextSource, UploadError};
pub use sample::SampleSource;
pub use traits::ListingSource;
pub use types::ListingFilter;
