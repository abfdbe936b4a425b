//! Page probing: the single-URL check and the poll loop that fans it out.

pub mod checker;
pub mod poller;

pub use checker::{check_page_size, CheckOutcome, CheckResult, FetchedPage, HttpFetcher, PageFetcher};
pub use poller::{CycleReport, PollSettings, Poller};
