// Copyright 2025 Chainflip Labs GmbH
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! Weights for pallet_cf_position_batcher.
//!
//! These are estimated from the storage reads and writes each call performs per batch item, on top
//! of a fixed execution cost. They are not the output of benchmarks.

#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]

use frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use sp_std::marker::PhantomData;

/// Weight functions needed for pallet_cf_position_batcher.
pub trait WeightInfo {
	fn mint(m: u32, f: u32, ) -> Weight;
	fn collect(c: u32, ) -> Weight;
	fn collect_and_close(c: u32, ) -> Weight;
	fn rerange(m: u32, f: u32, c: u32, ) -> Weight;
	fn set_fee() -> Weight;
	fn withdraw() -> Weight;
	fn transfer_ownership() -> Weight;
}

/// Reads and writes shared by every fee-paying call:
/// Storage: PositionBatcher Fee (r:1 w:0)
/// Storage: NativeCurrency balances of the payer and the operator (r:2 w:2)
const FEE_READS: u64 = 3;
const FEE_WRITES: u64 = 2;

/// Per funded token: caller balance, operator balance and allowance, then the registry allowance
/// set and revoked, and a dust refund.
const FUNDING_READS: u64 = 4;
const FUNDING_WRITES: u64 = 6;

/// Per mint: two token pulls, the position id counter and the position itself.
const MINT_READS: u64 = 6;
const MINT_WRITES: u64 = 6;

/// Per close: ownership, liquidity withdrawal, collection and burn.
const CLOSE_READS: u64 = 8;
const CLOSE_WRITES: u64 = 8;

/// Per collect: ownership, approval and the transfer of both tokens.
const COLLECT_READS: u64 = 6;
const COLLECT_WRITES: u64 = 5;

fn fee_paying_call<W: Get<frame_support::weights::RuntimeDbWeight>>(
	reads: u64,
	writes: u64,
) -> Weight {
	Weight::from_parts(25_000_000, 3_600)
		.saturating_add(W::get().reads(FEE_READS.saturating_add(reads)))
		.saturating_add(W::get().writes(FEE_WRITES.saturating_add(writes)))
}

fn owner_call<W: Get<frame_support::weights::RuntimeDbWeight>>(reads: u64, writes: u64) -> Weight {
	Weight::from_parts(12_000_000, 1_500)
		.saturating_add(W::get().reads(reads))
		.saturating_add(W::get().writes(writes))
}

fn mint_weight<W: Get<frame_support::weights::RuntimeDbWeight>>(m: u32, f: u32) -> Weight {
	fee_paying_call::<W>(
		MINT_READS
			.saturating_mul(m.into())
			.saturating_add(FUNDING_READS.saturating_mul(f.into())),
		MINT_WRITES
			.saturating_mul(m.into())
			.saturating_add(FUNDING_WRITES.saturating_mul(f.into())),
	)
	.saturating_add(Weight::from_parts(30_000_000, 0).saturating_mul(m.into()))
	.saturating_add(Weight::from_parts(15_000_000, 0).saturating_mul(f.into()))
}

fn close_weight<W: Get<frame_support::weights::RuntimeDbWeight>>(c: u32) -> Weight {
	fee_paying_call::<W>(
		CLOSE_READS.saturating_mul(c.into()),
		CLOSE_WRITES.saturating_mul(c.into()),
	)
	.saturating_add(Weight::from_parts(35_000_000, 0).saturating_mul(c.into()))
}

/// Weights for pallet_cf_position_batcher using the runtime's database weights.
pub struct PalletWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for PalletWeight<T> {
	fn mint(m: u32, f: u32, ) -> Weight {
		mint_weight::<T::DbWeight>(m, f)
	}
	fn collect(c: u32, ) -> Weight {
		fee_paying_call::<T::DbWeight>(
			COLLECT_READS.saturating_mul(c.into()),
			COLLECT_WRITES.saturating_mul(c.into()),
		)
		.saturating_add(Weight::from_parts(20_000_000, 0).saturating_mul(c.into()))
	}
	fn collect_and_close(c: u32, ) -> Weight {
		close_weight::<T::DbWeight>(c)
	}
	fn rerange(m: u32, f: u32, c: u32, ) -> Weight {
		close_weight::<T::DbWeight>(c).saturating_add(mint_weight::<T::DbWeight>(m, f))
	}
	/// Storage: PositionBatcher Owner (r:1 w:0)
	/// Storage: PositionBatcher Fee (r:1 w:1)
	fn set_fee() -> Weight {
		owner_call::<T::DbWeight>(2, 1)
	}
	/// Storage: PositionBatcher Owner (r:1 w:0)
	/// Storage: NativeCurrency balances of the operator and the recipient (r:2 w:2)
	fn withdraw() -> Weight {
		owner_call::<T::DbWeight>(3, 2)
	}
	/// Storage: PositionBatcher Owner (r:1 w:1)
	fn transfer_ownership() -> Weight {
		owner_call::<T::DbWeight>(1, 1)
	}
}

// For backwards compatibility and tests
impl WeightInfo for () {
	fn mint(m: u32, f: u32, ) -> Weight {
		mint_weight::<RocksDbWeight>(m, f)
	}
	fn collect(c: u32, ) -> Weight {
		fee_paying_call::<RocksDbWeight>(
			COLLECT_READS.saturating_mul(c.into()),
			COLLECT_WRITES.saturating_mul(c.into()),
		)
		.saturating_add(Weight::from_parts(20_000_000, 0).saturating_mul(c.into()))
	}
	fn collect_and_close(c: u32, ) -> Weight {
		close_weight::<RocksDbWeight>(c)
	}
	fn rerange(m: u32, f: u32, c: u32, ) -> Weight {
		close_weight::<RocksDbWeight>(c).saturating_add(mint_weight::<RocksDbWeight>(m, f))
	}
	fn set_fee() -> Weight {
		owner_call::<RocksDbWeight>(2, 1)
	}
	fn withdraw() -> Weight {
		owner_call::<RocksDbWeight>(3, 2)
	}
	fn transfer_ownership() -> Weight {
		owner_call::<RocksDbWeight>(1, 1)
	}
}
