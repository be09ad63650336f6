//! Benchmarks for circuit editing operations
//!
//! Run with: cargo bench -p qcomposer-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qcomposer_ir::{CircuitDefaults, CircuitEditor, GateChanges, GateKind, InsertPosition};

/// Fill every slot of a `qubits` × `moments` grid, cycling through gate types.
fn filled_editor(qubits: usize, moments: usize) -> CircuitEditor {
    let mut editor = CircuitEditor::new(CircuitDefaults { qubits, moments });
    for moment in 0..moments {
        for qubit in 0..qubits {
            let kind = GateKind::ALL[(qubit + moment) % GateKind::ALL.len()];
            editor.place_gate(qubit, moment, kind).unwrap();
        }
    }
    editor
}

/// Benchmark placing gates into an occupied grid (replacement path)
fn bench_place_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_gate");

    for size in &[4_usize, 16, 64] {
        group.bench_with_input(BenchmarkId::new("replace", size), size, |b, &n| {
            let mut editor = filled_editor(n, n);
            b.iter(|| {
                editor
                    .place_gate(black_box(n / 2), black_box(n / 2), GateKind::H)
                    .unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark moving a gate back and forth between two free slots
fn bench_update_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_gate");

    group.bench_function("move", |b| {
        let mut editor = CircuitEditor::new(CircuitDefaults {
            qubits: 16,
            moments: 64,
        });
        let id = editor.place_gate(0, 0, GateKind::X).unwrap();
        let there = GateChanges::new().with_qubit(15).with_moment(63);
        let back = GateChanges::new().with_qubit(0).with_moment(0);
        b.iter(|| {
            editor.update_gate(id, black_box(&there)).unwrap();
            editor.update_gate(id, black_box(&back)).unwrap();
        });
    });

    group.finish();
}

/// Benchmark bulk renumbering on qubit insertion and removal
fn bench_qubit_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("qubit_insert_remove");

    for size in &[4_usize, 16, 64] {
        group.bench_with_input(BenchmarkId::new("round_trip", size), size, |b, &n| {
            let mut editor = filled_editor(n, n);
            b.iter(|| {
                let at = editor
                    .add_qubit(black_box(0), InsertPosition::Before)
                    .unwrap();
                editor.remove_qubit(at).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_place_gate,
    bench_update_gate,
    bench_qubit_insert_remove
);
criterion_main!(benches);
