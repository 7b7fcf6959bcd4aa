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

use crate::{self as pallet_cf_position_batcher, weights::PalletWeight};
use cf_primitives::{AssetAmount, Deadline, NativeAmount, TokenId};
use cf_traits::mocks::{
	native_currency::MockNativeCurrency, position_registry::MockPositionRegistry,
	time_source, token_ledger::MockTokenLedger,
};
use frame_support::{derive_impl, parameter_types, PalletId};
use std::time::Duration;

type Block = frame_system::mocking::MockBlock<Test>;

frame_support::construct_runtime!(
	pub enum Test {
		System: frame_system,
		PositionBatcher: pallet_cf_position_batcher,
	}
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig as frame_system::DefaultConfig)]
impl frame_system::Config for Test {
	type Block = Block;
}

parameter_types! {
	pub const BatcherPalletId: PalletId = PalletId(*b"cf/batch");
	pub const MaxBatchSize: u32 = 16;
}

impl pallet_cf_position_batcher::Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type PositionRegistry = MockPositionRegistry;
	type TokenLedger = MockTokenLedger;
	type NativeCurrency = MockNativeCurrency;
	type TimeSource = time_source::Mock;
	type PalletId = BatcherPalletId;
	type MaxBatchSize = MaxBatchSize;
	type WeightInfo = PalletWeight<Test>;
}

pub const OWNER: u64 = 100;
pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;

pub const TOKEN_A: TokenId = 1;
pub const TOKEN_B: TokenId = 2;

/// One whole unit of a token or of the native currency.
pub const UNIT: u128 = 1_000_000_000_000_000_000;

pub const INITIAL_FEE: NativeAmount = UNIT / 2_000;
pub const INITIAL_NATIVE_BALANCE: NativeAmount = 10 * UNIT;
pub const INITIAL_TOKEN_BALANCE: AssetAmount = 50 * UNIT;

/// The time every test starts at, in seconds since the unix epoch.
pub const NOW: Deadline = 1_700_000_000;
pub const FUTURE: Deadline = NOW + 3_600;

cf_test_utilities::impl_test_helpers! {
	Test,
	RuntimeGenesisConfig {
		system: Default::default(),
		position_batcher: PositionBatcherConfig { owner: Some(OWNER), fee: INITIAL_FEE },
	},
	|| {
		time_source::Mock::reset_to(Duration::from_secs(NOW));
		for account in [ALICE, BOB] {
			MockNativeCurrency::credit_account(&account, INITIAL_NATIVE_BALANCE);
			for token in [TOKEN_A, TOKEN_B] {
				MockTokenLedger::mint_tokens(&account, token, INITIAL_TOKEN_BALANCE);
			}
		}
	}
}
