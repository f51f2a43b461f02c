//! API benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_syscall_dispatch(c: &mut Criterion) {
    // TODO: Implement syscall dispatch benchmark
}

fn bench_service_registry(c: &mut Criterion) {
    // TODO: Implement service registry benchmark
}

fn bench_memory_management(c: &mut Criterion) {
    // TODO: Implement memory management benchmark
}

fn bench_process_management(c: &mut Criterion) {
    // TODO: Implement process management benchmark
}

criterion_group!(
    api_benchmarks,
    bench_syscall_dispatch,
    bench_service_registry,
    bench_memory_management,
    bench_process_management
);

criterion_main!(api_benchmarks);