#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Driver library behind the chibi-pets command-line adapter.

mod session;

pub use session::Session;
