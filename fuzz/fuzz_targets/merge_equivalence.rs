#![no_main]
use libfuzzer_sys::fuzz_target;

use cordyceps_splay::model::{run_join_equivalence, run_merge_equivalence};

fuzz_target!(|input: (Vec<u32>, Vec<u32>, u32)| {
    let (a, b, pivot) = input;

    run_join_equivalence(a.clone(), pivot);
    run_merge_equivalence(a, b);
});
