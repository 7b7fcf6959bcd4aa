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

use crate::NativeCurrency;
use cf_primitives::NativeAmount;
use sp_runtime::{DispatchError, DispatchResult};

use super::{MockAccountId, MockPallet, MockPalletStorage};

pub struct MockNativeCurrency;

impl MockPallet for MockNativeCurrency {
	const PREFIX: &'static [u8] = b"NATIVE_CURRENCY";
}

const BALANCES: &[u8] = b"BALANCES";

impl MockNativeCurrency {
	pub fn credit_account(who: &MockAccountId, amount: NativeAmount) {
		Self::mutate_storage::<MockAccountId, _, NativeAmount, _, _>(BALANCES, who, |balance| {
			let balance = balance.get_or_insert_with(|| 0);
			*balance = balance.saturating_add(amount);
		});
	}
}

impl NativeCurrency for MockNativeCurrency {
	type AccountId = MockAccountId;

	fn balance(who: &Self::AccountId) -> NativeAmount {
		Self::get_storage(BALANCES, who).unwrap_or_default()
	}

	fn transfer(
		from: &Self::AccountId,
		to: &Self::AccountId,
		amount: NativeAmount,
	) -> DispatchResult {
		let remaining = Self::balance(from)
			.checked_sub(amount)
			.ok_or(DispatchError::Other("Insufficient balance"))?;
		Self::put_storage(BALANCES, from, remaining);
		Self::credit_account(to, amount);
		Ok(())
	}
}
