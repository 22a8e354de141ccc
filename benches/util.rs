// Cycle counter for benchmarks. On architectures without a readable
// counter (or where user access must be enabled by the kernel), the
// reported values are meaningless.

#[cfg(target_arch = "x86")]
pub fn core_cycles() -> u64 {
    use core::arch::x86::{_mm_lfence, _rdtsc};
    unsafe {
        _mm_lfence();
        _rdtsc()
    }
}

#[cfg(target_arch = "x86_64")]
pub fn core_cycles() -> u64 {
    use core::arch::x86_64::{_mm_lfence, _rdtsc};
    unsafe {
        _mm_lfence();
        _rdtsc()
    }
}

#[cfg(target_arch = "aarch64")]
pub fn core_cycles() -> u64 {
    use core::arch::asm;
    let mut x: u64;
    unsafe {
        asm!("dsb sy", "mrs {}, pmccntr_el0", out(reg) x);
    }
    x
}

#[cfg(target_arch = "riscv64")]
pub fn core_cycles() -> u64 {
    use core::arch::asm;
    let mut x: u64;
    unsafe {
        asm!("rdcycle {}", out(reg) x);
    }
    x
}

// Run f() 20 times (after 10 warm-up runs) and return the median cost
// in cycles, along with one output byte (to keep the computation live).
pub fn median_cycles<F: FnMut() -> u8>(mut f: F) -> (f64, u8) {
    let mut tt = [0u64; 20];
    let mut x = 0u8;
    for i in 0..30 {
        let begin = core_cycles();
        x ^= f();
        let end = core_cycles();
        if i >= 10 {
            tt[i - 10] = end.wrapping_sub(begin);
        }
    }
    tt.sort();
    (tt[10] as f64, x)
}
