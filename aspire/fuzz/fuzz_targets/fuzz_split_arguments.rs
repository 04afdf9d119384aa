#![no_main]

use aspire::split_arguments;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let _ = split_arguments("p", text);
});
