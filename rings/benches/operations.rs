use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rings::modulus::ONCE;
use rings::poly::{Form, Poly};
use rings::ring::Ring;

const Q: u64 = 0x1fffffffffe00001u64;

fn add(c: &mut Criterion) {
    fn runner(ring: Ring<u64>) -> Box<dyn FnMut()> {
        let mut a: Poly<u64> = ring.new_poly();
        let mut b: Poly<u64> = ring.new_poly();
        for i in 0..ring.n() {
            a.coeffs[i] = i as u64;
            b.coeffs[i] = i as u64;
        }
        Box::new(move || {
            ring.add_inplace::<ONCE>(&a, &mut b);
        })
    }

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("add_inplace");
    for log_n in 11..15 {
        let n: usize = 1 << log_n;
        let r: Ring<u64> = Ring::<u64>::new(n, Q);
        let runners = [("prime", { runner(r) })];
        for (name, mut runner) in runners {
            let id = BenchmarkId::new(name, n);
            b.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
        }
    }
}

fn mul_coeffs_montgomery(c: &mut Criterion) {
    fn runner(ring: Ring<u64>) -> Box<dyn FnMut()> {
        let mut a: Poly<u64> = ring.new_poly();
        let mut b: Poly<u64> = ring.new_poly();
        let mut d: Poly<u64> = ring.new_poly();
        for i in 0..ring.n() {
            a.coeffs[i] = ring.modulus.montgomery.prepare::<ONCE>(i as u64 % ring.modulus.q);
            b.coeffs[i] = i as u64;
        }
        a.form = Form::Montgomery;
        Box::new(move || {
            ring.mul_coeffs_montgomery::<ONCE>(&a, &b, &mut d);
        })
    }

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("mul_coeffs_montgomery");
    for log_n in 11..15 {
        let n: usize = 1 << log_n;
        let r: Ring<u64> = Ring::<u64>::new(n, Q);
        let runners = [("prime", { runner(r) })];
        for (name, mut runner) in runners {
            let id = BenchmarkId::new(name, n);
            b.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
        }
    }
}

fn mul_coeffs_barrett(c: &mut Criterion) {
    fn runner(ring: Ring<u64>) -> Box<dyn FnMut()> {
        let mut a: Poly<u64> = ring.new_poly();
        let mut b: Poly<u64> = ring.new_poly();
        let mut d: Poly<u64> = ring.new_poly();
        for i in 0..ring.n() {
            a.coeffs[i] = i as u64;
            b.coeffs[i] = i as u64;
        }
        Box::new(move || {
            ring.mul_coeffs_barrett::<ONCE>(&a, &b, &mut d);
        })
    }

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("mul_coeffs_barrett");
    for log_n in 11..15 {
        let n: usize = 1 << log_n;
        let r: Ring<u64> = Ring::<u64>::new(n, Q);
        let runners = [("prime", { runner(r) })];
        for (name, mut runner) in runners {
            let id = BenchmarkId::new(name, n);
            b.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
        }
    }
}

fn mul_poly(c: &mut Criterion) {
    fn runner(ring: Ring<u64>) -> Box<dyn FnMut()> {
        let mut a: Poly<u64> = ring.new_poly();
        let mut b: Poly<u64> = ring.new_poly();
        let mut d: Poly<u64> = ring.new_poly();
        for i in 0..ring.n() {
            a.coeffs[i] = i as u64;
            b.coeffs[i] = i as u64;
        }
        Box::new(move || {
            ring.mul_poly(&a, &b, &mut d);
        })
    }

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("mul_poly");
    for log_n in 10..13 {
        let n: usize = 1 << log_n;
        let r: Ring<u64> = Ring::<u64>::new(n, Q);
        let runners = [("prime", { runner(r) })];
        for (name, mut runner) in runners {
            let id = BenchmarkId::new(name, n);
            b.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
        }
    }
}

criterion_group!(
    benches,
    add,
    mul_coeffs_montgomery,
    mul_coeffs_barrett,
    mul_poly
);
criterion_main!(benches);
