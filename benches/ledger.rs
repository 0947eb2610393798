// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Benchmarks for the ledger and the PIN hasher.
//!
//! Run with: cargo bench
//!
//! The PIN benchmarks measure the deliberate cost of the 100,000-round
//! digest; expect milliseconds, not nanoseconds.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use atm_sim_rs::{AccountId, Ledger, encrypt_pin, parse_money, verify_pin};
use rust_decimal_macros::dec;
use std::collections::HashMap;

fn make_ledger() -> (Ledger, AccountId) {
    let account_id = AccountId::from("2859459814");
    let ledger = Ledger::new();
    ledger.set_initial_balances(
        dec!(1000000.00),
        HashMap::from([(account_id.clone(), dec!(10000.00))]),
    );
    (ledger, account_id)
}

fn bench_parse_money(c: &mut Criterion) {
    c.bench_function("parse_money/dollars_and_cents", |b| {
        b.iter(|| parse_money(black_box("$1234.56")))
    });
    c.bench_function("parse_money/reject_malformed", |b| {
        b.iter(|| parse_money(black_box("1,234.56")))
    });
}

fn bench_ledger_ops(c: &mut Criterion) {
    c.bench_function("ledger/deposit", |b| {
        b.iter_batched(
            make_ledger,
            |(ledger, account_id)| ledger.deposit(&account_id, black_box("25.50")),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("ledger/withdraw", |b| {
        b.iter_batched(
            make_ledger,
            |(ledger, account_id)| ledger.withdraw(&account_id, black_box("20.00")),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("ledger/get_balance", |b| {
        let (ledger, account_id) = make_ledger();
        b.iter(|| ledger.get_balance(black_box(&account_id)))
    });
}

fn bench_pin_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pin");
    group.sample_size(10);

    group.bench_function("encrypt", |b| b.iter(|| encrypt_pin(black_box("7386"))));

    let stored = encrypt_pin("7386");
    group.bench_function("verify", |b| {
        b.iter(|| verify_pin(black_box("7386"), &stored))
    });

    group.finish();
}

criterion_group!(benches, bench_parse_money, bench_ledger_ops, bench_pin_hashing);
criterion_main!(benches);
