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

use crate::{PositionRegistry, RegistryError, TokenLedger};
use cf_primitives::{
	AssetAmount, Liquidity, MintParams, MintedPosition, PositionDetails, PositionId, TokenId,
	MAX_TICK, MIN_TICK,
};
use codec::{Decode, Encode};

use super::{token_ledger::MockTokenLedger, MockAccountId, MockPallet, MockPalletStorage};

/// A position registry that prices every pool at 1:1.
///
/// Minting consumes `min(amount_a_desired, amount_b_desired)` of both tokens and credits the same
/// amount of liquidity. Withdrawing liquidity releases one unit of each token per unit of
/// liquidity. Tokens are held in [REGISTRY_ACCOUNT] on the [MockTokenLedger].
pub struct MockPositionRegistry;

pub const REGISTRY_ACCOUNT: MockAccountId = 0xC0FFEE;

impl MockPallet for MockPositionRegistry {
	const PREFIX: &'static [u8] = b"POSITION_REGISTRY";
}

const POSITIONS: &[u8] = b"POSITIONS";
const NEXT_POSITION_ID: &[u8] = b"NEXT_POSITION_ID";
const OPERATOR_APPROVALS: &[u8] = b"OPERATOR_APPROVALS";

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
struct MockPosition {
	owner: MockAccountId,
	details: PositionDetails,
}

impl MockPositionRegistry {
	pub fn set_approval_for_all(owner: &MockAccountId, operator: &MockAccountId, approved: bool) {
		Self::put_storage(OPERATOR_APPROVALS, (*owner, *operator), approved);
	}

	/// Adds fees to what is owed on a position, as if swaps had traded through its range.
	pub fn accrue_fees(position_id: PositionId, amount_a: AssetAmount, amount_b: AssetAmount) {
		Self::mutate_storage::<PositionId, _, MockPosition, _, _>(
			POSITIONS,
			&position_id,
			|position| {
				if let Some(MockPosition { details, .. }) = position {
					MockTokenLedger::mint_tokens(&REGISTRY_ACCOUNT, details.token_a, amount_a);
					MockTokenLedger::mint_tokens(&REGISTRY_ACCOUNT, details.token_b, amount_b);
					details.tokens_owed_a = details.tokens_owed_a.saturating_add(amount_a);
					details.tokens_owed_b = details.tokens_owed_b.saturating_add(amount_b);
				}
			},
		);
	}

	/// The id the next minted position will receive.
	pub fn next_position_id() -> PositionId {
		Self::get_value(NEXT_POSITION_ID).unwrap_or(1)
	}

	fn authorised_position(
		operator: &MockAccountId,
		position_id: PositionId,
	) -> Result<MockPosition, RegistryError> {
		let position: MockPosition =
			Self::get_storage(POSITIONS, position_id).ok_or(RegistryError::UnknownPosition)?;
		if position.owner == *operator || Self::is_approved_for_all(&position.owner, operator) {
			Ok(position)
		} else {
			Err(RegistryError::NotApproved)
		}
	}

	fn pull_from(
		payer: &MockAccountId,
		token: TokenId,
		amount: AssetAmount,
	) -> Result<(), RegistryError> {
		MockTokenLedger::transfer_from(&REGISTRY_ACCOUNT, payer, &REGISTRY_ACCOUNT, token, amount)
			.map_err(Into::into)
	}
}

impl PositionRegistry for MockPositionRegistry {
	type AccountId = MockAccountId;

	fn account_id() -> Self::AccountId {
		REGISTRY_ACCOUNT
	}

	fn owner_of(position_id: PositionId) -> Option<Self::AccountId> {
		Self::get_storage::<_, MockPosition>(POSITIONS, position_id).map(|position| position.owner)
	}

	fn position(position_id: PositionId) -> Option<PositionDetails> {
		Self::get_storage::<_, MockPosition>(POSITIONS, position_id)
			.map(|position| position.details)
	}

	fn is_approved_for_all(owner: &Self::AccountId, operator: &Self::AccountId) -> bool {
		Self::get_storage(OPERATOR_APPROVALS, (*owner, *operator)).unwrap_or(false)
	}

	fn mint(
		payer: &Self::AccountId,
		params: MintParams<Self::AccountId>,
	) -> Result<MintedPosition, RegistryError> {
		if !(MIN_TICK <= params.tick_lower &&
			params.tick_lower < params.tick_upper &&
			params.tick_upper <= MAX_TICK)
		{
			return Err(RegistryError::InvalidTickRange)
		}

		let amount = params.amount_a_desired.min(params.amount_b_desired);
		Self::pull_from(payer, params.token_a, amount)?;
		Self::pull_from(payer, params.token_b, amount)?;

		let position_id = Self::next_position_id();
		Self::put_value(NEXT_POSITION_ID, position_id + 1);
		Self::put_storage(
			POSITIONS,
			position_id,
			MockPosition {
				owner: params.recipient,
				details: PositionDetails {
					token_a: params.token_a,
					token_b: params.token_b,
					fee_tier: params.fee_tier,
					tick_lower: params.tick_lower,
					tick_upper: params.tick_upper,
					liquidity: amount,
					tokens_owed_a: 0,
					tokens_owed_b: 0,
				},
			},
		);

		Ok(MintedPosition { position_id, liquidity: amount, amount_a: amount, amount_b: amount })
	}

	fn decrease_liquidity(
		operator: &Self::AccountId,
		position_id: PositionId,
		liquidity: Liquidity,
	) -> Result<(AssetAmount, AssetAmount), RegistryError> {
		let MockPosition { owner, mut details } = Self::authorised_position(operator, position_id)?;
		let withdrawn = liquidity.min(details.liquidity);
		details.liquidity -= withdrawn;
		details.tokens_owed_a = details.tokens_owed_a.saturating_add(withdrawn);
		details.tokens_owed_b = details.tokens_owed_b.saturating_add(withdrawn);
		Self::put_storage(POSITIONS, position_id, MockPosition { owner, details });
		Ok((withdrawn, withdrawn))
	}

	fn collect(
		operator: &Self::AccountId,
		position_id: PositionId,
		recipient: &Self::AccountId,
	) -> Result<(AssetAmount, AssetAmount), RegistryError> {
		let MockPosition { owner, mut details } = Self::authorised_position(operator, position_id)?;
		let owed = (details.tokens_owed_a, details.tokens_owed_b);
		MockTokenLedger::transfer(&REGISTRY_ACCOUNT, recipient, details.token_a, owed.0)?;
		MockTokenLedger::transfer(&REGISTRY_ACCOUNT, recipient, details.token_b, owed.1)?;
		details.tokens_owed_a = 0;
		details.tokens_owed_b = 0;
		Self::put_storage(POSITIONS, position_id, MockPosition { owner, details });
		Ok(owed)
	}

	fn burn(operator: &Self::AccountId, position_id: PositionId) -> Result<(), RegistryError> {
		let position = Self::authorised_position(operator, position_id)?;
		if !position.details.is_cleared() {
			return Err(RegistryError::PositionNotCleared)
		}
		Self::take_storage::<_, MockPosition>(POSITIONS, position_id);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const ALICE: MockAccountId = 1;
	const OPERATOR: MockAccountId = 2;
	const TOKEN_A: TokenId = 10;
	const TOKEN_B: TokenId = 11;

	fn mint_params(amount_a: AssetAmount, amount_b: AssetAmount) -> MintParams<MockAccountId> {
		MintParams {
			token_a: TOKEN_A,
			token_b: TOKEN_B,
			fee_tier: 3000,
			tick_lower: -60,
			tick_upper: 60,
			amount_a_desired: amount_a,
			amount_b_desired: amount_b,
			recipient: ALICE,
		}
	}

	fn fund_alice(amount: AssetAmount) {
		for token in [TOKEN_A, TOKEN_B] {
			MockTokenLedger::mint_tokens(&ALICE, token, amount);
			MockTokenLedger::approve(&ALICE, &REGISTRY_ACCOUNT, token, amount);
		}
	}

	#[test]
	fn mint_consumes_the_smaller_side() {
		sp_io::TestExternalities::default().execute_with(|| {
			fund_alice(100);

			let minted = MockPositionRegistry::mint(&ALICE, mint_params(30, 20)).unwrap();

			assert_eq!(
				minted,
				MintedPosition { position_id: 1, liquidity: 20, amount_a: 20, amount_b: 20 }
			);
			assert_eq!(MockPositionRegistry::owner_of(1), Some(ALICE));
			assert_eq!(MockTokenLedger::balance_of(&ALICE, TOKEN_A), 80);
			assert_eq!(MockTokenLedger::balance_of(&REGISTRY_ACCOUNT, TOKEN_B), 20);
			assert_eq!(MockPositionRegistry::next_position_id(), 2);
		});
	}

	#[test]
	fn operations_require_owner_or_operator_approval() {
		sp_io::TestExternalities::default().execute_with(|| {
			fund_alice(100);
			let MintedPosition { position_id, .. } =
				MockPositionRegistry::mint(&ALICE, mint_params(10, 10)).unwrap();

			assert_eq!(
				MockPositionRegistry::collect(&OPERATOR, position_id, &ALICE),
				Err(RegistryError::NotApproved)
			);
			assert_eq!(
				MockPositionRegistry::decrease_liquidity(&OPERATOR, position_id, 10),
				Err(RegistryError::NotApproved)
			);

			MockPositionRegistry::set_approval_for_all(&ALICE, &OPERATOR, true);
			assert_eq!(
				MockPositionRegistry::decrease_liquidity(&OPERATOR, position_id, 10),
				Ok((10, 10))
			);
			assert_eq!(MockPositionRegistry::collect(&OPERATOR, position_id, &ALICE), Ok((10, 10)));
			assert_eq!(MockTokenLedger::balance_of(&ALICE, TOKEN_A), 100);
		});
	}

	#[test]
	fn burn_requires_a_cleared_position() {
		sp_io::TestExternalities::default().execute_with(|| {
			fund_alice(100);
			let MintedPosition { position_id, .. } =
				MockPositionRegistry::mint(&ALICE, mint_params(10, 10)).unwrap();
			MockPositionRegistry::accrue_fees(position_id, 3, 4);

			assert_eq!(
				MockPositionRegistry::burn(&ALICE, position_id),
				Err(RegistryError::PositionNotCleared)
			);
			MockPositionRegistry::decrease_liquidity(&ALICE, position_id, 10).unwrap();
			assert_eq!(MockPositionRegistry::collect(&ALICE, position_id, &ALICE), Ok((13, 14)));
			assert_eq!(MockPositionRegistry::burn(&ALICE, position_id), Ok(()));
			assert_eq!(MockPositionRegistry::owner_of(position_id), None);
			assert_eq!(
				MockPositionRegistry::burn(&ALICE, position_id),
				Err(RegistryError::UnknownPosition)
			);
		});
	}

	#[test]
	fn mint_rejects_empty_ranges() {
		sp_io::TestExternalities::default().execute_with(|| {
			fund_alice(100);
			assert_eq!(
				MockPositionRegistry::mint(
					&ALICE,
					MintParams { tick_lower: 60, tick_upper: 60, ..mint_params(10, 10) }
				),
				Err(RegistryError::InvalidTickRange)
			);
		});
	}
}
