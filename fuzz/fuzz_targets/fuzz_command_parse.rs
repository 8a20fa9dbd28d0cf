//! Fuzz target: console command parser
//!
//! Feeds arbitrary UTF-8 lines to `Command::from_str` and verifies:
//! - No panics under arbitrary input
//! - Every accepted line has exactly two words
//!
//! cargo fuzz run fuzz_command_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use sewage_monitor::app::commands::Command;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    if line.parse::<Command>().is_ok() {
        assert_eq!(
            line.split_whitespace().count(),
            2,
            "accepted command '{}' is not verb + argument",
            line
        );
    }
});
