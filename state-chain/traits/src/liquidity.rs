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

use cf_primitives::{
	AssetAmount, Liquidity, MintParams, MintedPosition, NativeAmount, PositionDetails, PositionId,
	TokenId,
};
use codec::{Decode, Encode};
use frame_support::pallet_prelude::DispatchResult;
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;

/// Reasons a token ledger may refuse a transfer.
#[derive(Copy, Clone, RuntimeDebug, PartialEq, Eq, Encode, Decode, TypeInfo)]
pub enum LedgerError {
	/// The source account does not hold enough of the token.
	InsufficientBalance,
	/// The spender has not been granted a large enough allowance by the source account.
	InsufficientAllowance,
}

/// Reasons the position registry may refuse an operation.
#[derive(Copy, Clone, RuntimeDebug, PartialEq, Eq, Encode, Decode, TypeInfo)]
pub enum RegistryError {
	/// The operator is neither the position's owner nor approved for all of the owner's
	/// positions.
	NotApproved,
	/// No position exists with the given id.
	UnknownPosition,
	/// The position still holds liquidity or owed tokens and cannot be burned.
	PositionNotCleared,
	/// The requested tick range is empty or out of bounds.
	InvalidTickRange,
	/// Moving tokens in or out of the registry failed.
	Ledger(LedgerError),
}

impl From<LedgerError> for RegistryError {
	fn from(error: LedgerError) -> Self {
		RegistryError::Ledger(error)
	}
}

/// Fungible token balances with owner-granted spending allowances.
pub trait TokenLedger {
	type AccountId;

	fn balance_of(who: &Self::AccountId, token: TokenId) -> AssetAmount;

	fn allowance(owner: &Self::AccountId, spender: &Self::AccountId, token: TokenId)
		-> AssetAmount;

	/// Sets, rather than increases, the amount `spender` may move out of `owner`'s account.
	fn approve(
		owner: &Self::AccountId,
		spender: &Self::AccountId,
		token: TokenId,
		amount: AssetAmount,
	);

	fn transfer(
		from: &Self::AccountId,
		to: &Self::AccountId,
		token: TokenId,
		amount: AssetAmount,
	) -> Result<(), LedgerError>;

	/// Moves tokens out of `from` on its behalf, consuming `spender`'s allowance.
	fn transfer_from(
		spender: &Self::AccountId,
		from: &Self::AccountId,
		to: &Self::AccountId,
		token: TokenId,
		amount: AssetAmount,
	) -> Result<(), LedgerError>;
}

/// A registry of concentrated-liquidity positions, each represented as a non-fungible item owned
/// by an account.
///
/// Operations on an existing position may be performed by its owner, or by any operator the owner
/// has approved for all of their positions.
pub trait PositionRegistry {
	type AccountId;

	/// The account that holds the tokens backing every position.
	fn account_id() -> Self::AccountId;

	fn owner_of(position_id: PositionId) -> Option<Self::AccountId>;

	fn position(position_id: PositionId) -> Option<PositionDetails>;

	fn is_approved_for_all(owner: &Self::AccountId, operator: &Self::AccountId) -> bool;

	/// Opens a position owned by `params.recipient`. The consumed token amounts are pulled from
	/// `payer`, which must have granted the registry account a sufficient allowance.
	fn mint(
		payer: &Self::AccountId,
		params: MintParams<Self::AccountId>,
	) -> Result<MintedPosition, RegistryError>;

	/// Removes liquidity from a position. The released tokens become owed on the position and
	/// are returned.
	fn decrease_liquidity(
		operator: &Self::AccountId,
		position_id: PositionId,
		liquidity: Liquidity,
	) -> Result<(AssetAmount, AssetAmount), RegistryError>;

	/// Pays everything owed on a position to `recipient`, returning the amounts paid.
	fn collect(
		operator: &Self::AccountId,
		position_id: PositionId,
		recipient: &Self::AccountId,
	) -> Result<(AssetAmount, AssetAmount), RegistryError>;

	fn burn(operator: &Self::AccountId, position_id: PositionId) -> Result<(), RegistryError>;
}

/// The chain's native currency, in which batching fees are paid.
pub trait NativeCurrency {
	type AccountId;

	fn balance(who: &Self::AccountId) -> NativeAmount;

	fn transfer(from: &Self::AccountId, to: &Self::AccountId, amount: NativeAmount)
		-> DispatchResult;
}
