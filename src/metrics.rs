//! Record counters. Nothing is exported unless the host installs a recorder.

use ::metrics::counter;

pub const RECORDS_TOTAL: &str = "resolutions_records_total";

pub fn record_clean() {
    counter!(RECORDS_TOTAL, "outcome" => "clean").increment(1);
}

pub fn record_error() {
    counter!(RECORDS_TOTAL, "outcome" => "error").increment(1);
}
