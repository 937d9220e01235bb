/// Greatest common divisor; `gcd(a, 0) == a`.
fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let c = a % b;
        a = b;
        b = c;
    }
    a
}

/// Exchange the block `nonopt_start..nonopt_end` with the block
/// `nonopt_end..opt_end`, keeping the order inside each block.
///
/// The region splits into `gcd(n, m)` cycles; each cycle is walked once,
/// swapping one element into the cycle start at a time.
pub fn permute<T>(args: &mut [T], nonopt_start: usize, nonopt_end: usize, opt_end: usize) {
    let nnonopts = nonopt_end - nonopt_start;
    let nopts = opt_end - nonopt_end;
    if nnonopts == 0 || nopts == 0 {
        return;
    }
    let ncycle = gcd(nnonopts, nopts);
    let cyclelen = (opt_end - nonopt_start) / ncycle;

    for i in 0..ncycle {
        let cstart = nonopt_end + i;
        let mut pos = cstart;
        for _ in 0..cyclelen {
            if pos >= nonopt_end {
                pos -= nnonopts;
            } else {
                pos += nopts;
            }
            args.swap(pos, cstart);
        }
    }
}
