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

use crate::{LedgerError, TokenLedger};
use cf_primitives::{AssetAmount, TokenId};

use super::{MockAccountId, MockPallet, MockPalletStorage};

/// Balances are checked before allowances, so an under-funded account reports
/// [LedgerError::InsufficientBalance] regardless of what it has approved.
pub struct MockTokenLedger;

impl MockPallet for MockTokenLedger {
	const PREFIX: &'static [u8] = b"TOKEN_LEDGER";
}

const BALANCES: &[u8] = b"BALANCES";
const ALLOWANCES: &[u8] = b"ALLOWANCES";

impl MockTokenLedger {
	/// Creates tokens out of thin air.
	pub fn mint_tokens(who: &MockAccountId, token: TokenId, amount: AssetAmount) {
		Self::credit(who, token, amount);
	}

	fn credit(who: &MockAccountId, token: TokenId, amount: AssetAmount) {
		Self::mutate_storage::<(MockAccountId, TokenId), _, AssetAmount, _, _>(
			BALANCES,
			&(*who, token),
			|balance| {
				let balance = balance.get_or_insert_with(|| 0);
				*balance = balance.saturating_add(amount);
			},
		);
	}

	fn debit(who: &MockAccountId, token: TokenId, amount: AssetAmount) -> Result<(), LedgerError> {
		Self::mutate_storage::<(MockAccountId, TokenId), _, AssetAmount, _, _>(
			BALANCES,
			&(*who, token),
			|balance| -> Result<(), LedgerError> {
				let balance = balance.get_or_insert_with(|| 0);
				*balance = balance.checked_sub(amount).ok_or(LedgerError::InsufficientBalance)?;
				Ok(())
			},
		)
	}
}

impl TokenLedger for MockTokenLedger {
	type AccountId = MockAccountId;

	fn balance_of(who: &Self::AccountId, token: TokenId) -> AssetAmount {
		Self::get_storage(BALANCES, (*who, token)).unwrap_or_default()
	}

	fn allowance(
		owner: &Self::AccountId,
		spender: &Self::AccountId,
		token: TokenId,
	) -> AssetAmount {
		Self::get_storage(ALLOWANCES, (*owner, *spender, token)).unwrap_or_default()
	}

	fn approve(
		owner: &Self::AccountId,
		spender: &Self::AccountId,
		token: TokenId,
		amount: AssetAmount,
	) {
		Self::put_storage(ALLOWANCES, (*owner, *spender, token), amount);
	}

	fn transfer(
		from: &Self::AccountId,
		to: &Self::AccountId,
		token: TokenId,
		amount: AssetAmount,
	) -> Result<(), LedgerError> {
		Self::debit(from, token, amount)?;
		Self::credit(to, token, amount);
		Ok(())
	}

	fn transfer_from(
		spender: &Self::AccountId,
		from: &Self::AccountId,
		to: &Self::AccountId,
		token: TokenId,
		amount: AssetAmount,
	) -> Result<(), LedgerError> {
		if Self::balance_of(from, token) < amount {
			return Err(LedgerError::InsufficientBalance)
		}
		let remaining = Self::allowance(from, spender, token)
			.checked_sub(amount)
			.ok_or(LedgerError::InsufficientAllowance)?;
		Self::transfer(from, to, token, amount)?;
		Self::approve(from, spender, token, remaining);
		Ok(())
	}
}
