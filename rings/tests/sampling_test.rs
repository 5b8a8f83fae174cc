use rings::poly::Poly;
use rings::ring::{Ring, RingContext, RingRNS};
use sampling::source::Source;

fn sub_test<F: FnOnce()>(name: &str, f: F) {
    println!("Running {}", name);
    f();
}

#[test]
fn sampling_u64() {
    let n: usize = 16;
    let q: u64 = 97;
    let context: RingContext = RingContext::new(n, &[q]).unwrap();
    let ring: RingRNS<u64> = context.validate().unwrap();

    sub_test("test_uniform_chi_square", || {
        test_uniform_chi_square(ring.at(0))
    });
    sub_test("test_uniform_range", || test_uniform_range(ring.at(0)));
    sub_test("test_ternary", || test_ternary(ring.at(0)));
    sub_test("test_normal_bound", || test_normal_bound(ring.at(0)));
    sub_test("test_deterministic_seed", || {
        test_deterministic_seed(ring.at(0))
    });
}

/// Chi-square goodness-of-fit of uniform samples against
/// Uniform[0, q). With q = 97 the statistic has 96 degrees of freedom;
/// 160 corresponds to a significance level well below 1e-4, and the
/// seed is fixed, so the test is deterministic.
fn test_uniform_chi_square(ring: &Ring<u64>) {
    let q: u64 = ring.modulus.q;
    let mut source: Source = Source::new([21u8; 32]);

    let draws: usize = 384 * ring.n();
    let mut counts: Vec<u64> = vec![0; q as usize];
    let mut a: Poly<u64> = ring.new_poly();
    for _ in 0..draws / ring.n() {
        ring.fill_uniform(&mut source, &mut a);
        a.coeffs.iter().for_each(|&v| counts[v as usize] += 1);
    }

    let expected: f64 = draws as f64 / q as f64;
    let chi_square: f64 = counts
        .iter()
        .map(|&c| {
            let d: f64 = c as f64 - expected;
            d * d / expected
        })
        .sum();

    assert!(
        chi_square < 160.0,
        "chi_square = {} >= 160 for {} draws over [0, {})",
        chi_square,
        draws,
        q
    );
}

fn test_uniform_range(ring: &Ring<u64>) {
    let q: u64 = ring.modulus.q;
    let mut source: Source = Source::new([22u8; 32]);
    for _ in 0..64 {
        let a: Poly<u64> = ring.new_uniform_poly(&mut source);
        assert!(a.coeffs.iter().all(|&v| v < q));
    }
}

fn test_ternary(ring: &Ring<u64>) {
    let q: u64 = ring.modulus.q;
    let mut source: Source = Source::new([23u8; 32]);
    let mut seen: [bool; 3] = [false; 3];
    let mut a: Poly<u64> = ring.new_poly();
    for _ in 0..64 {
        ring.fill_ternary(&mut source, &mut a);
        for &v in a.coeffs.iter() {
            match v {
                0 => seen[0] = true,
                1 => seen[1] = true,
                v if v == q - 1 => seen[2] = true,
                v => panic!("non-ternary coefficient {}", v),
            }
        }
    }
    assert!(seen.iter().all(|&s| s));
}

fn test_normal_bound(ring: &Ring<u64>) {
    let q: u64 = ring.modulus.q;
    let sigma: f64 = 3.2;
    let bound: f64 = 19.0;
    let mut source: Source = Source::new([24u8; 32]);
    let mut a: Poly<u64> = ring.new_poly();
    for _ in 0..64 {
        ring.fill_normal(&mut source, sigma, bound, &mut a);
        assert!(a
            .coeffs
            .iter()
            .all(|&v| v <= bound as u64 || v >= q - bound as u64));
    }
}

fn test_deterministic_seed(ring: &Ring<u64>) {
    let mut source_a: Source = Source::new([25u8; 32]);
    let mut source_b: Source = Source::new([25u8; 32]);
    let a: Poly<u64> = ring.new_uniform_poly(&mut source_a);
    let b: Poly<u64> = ring.new_uniform_poly(&mut source_b);
    assert_eq!(a, b);

    // branched sources diverge from the parent and from each other
    let mut branch_a: Source = source_a.branch();
    let c: Poly<u64> = ring.new_uniform_poly(&mut branch_a);
    let d: Poly<u64> = ring.new_uniform_poly(&mut source_a);
    assert_ne!(c, d);
}
