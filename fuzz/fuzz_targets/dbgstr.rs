#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = dbgchan::dbgstr_an(data, data.len() as isize);
    let _ = dbgchan::dbgstr_an(data, -1);

    let wide: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    let _ = dbgchan::dbgstr_wn(wide.as_slice(), wide.len() as isize);
    let _ = dbgchan::dbgstr_wn(wide.as_slice(), -1);
});
