#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfmix::{merge_all, merge_half_pages};

fuzz_target!(|data: &[u8]| {
    // Split the input so both merge modes see two independent documents.
    let mid = data.len() / 2;
    let (first, second) = data.split_at(mid);

    // Arbitrary bytes must fail cleanly or merge; never panic.
    let _ = merge_all(&[first, second]);
    let _ = merge_half_pages(first, second);
});
