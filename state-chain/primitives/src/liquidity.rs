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

use crate::{AssetAmount, Deadline, FeeTier, PositionId, TokenId};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;
use sp_std::collections::btree_map::BTreeMap;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Representation of a price: p = 1.0001^Tick
pub type Tick = i32;

/// Representation of Liquidity in a position.
pub type Liquidity = u128;

/// The lowest tick a position may be bounded by.
pub const MIN_TICK: Tick = -887272;

/// The highest tick a position may be bounded by.
pub const MAX_TICK: Tick = -MIN_TICK;

/// Everything needed to open one concentrated-liquidity position.
#[derive(
	Copy,
	Clone,
	RuntimeDebug,
	PartialEq,
	Eq,
	Encode,
	Decode,
	DecodeWithMemTracking,
	MaxEncodedLen,
	TypeInfo,
)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct MintRequest {
	pub token_a: TokenId,
	pub token_b: TokenId,
	pub fee_tier: FeeTier,
	pub tick_lower: Tick,
	pub tick_upper: Tick,
	pub amount_a_desired: AssetAmount,
	pub amount_b_desired: AssetAmount,
	pub amount_a_min: AssetAmount,
	pub amount_b_min: AssetAmount,
	pub deadline: Deadline,
}

impl MintRequest {
	/// The range must be non-empty and lie within the representable ticks.
	pub fn has_valid_range(&self) -> bool {
		MIN_TICK <= self.tick_lower &&
			self.tick_lower < self.tick_upper &&
			self.tick_upper <= MAX_TICK
	}

	pub fn to_params<AccountId>(&self, recipient: AccountId) -> MintParams<AccountId> {
		MintParams {
			token_a: self.token_a,
			token_b: self.token_b,
			fee_tier: self.fee_tier,
			tick_lower: self.tick_lower,
			tick_upper: self.tick_upper,
			amount_a_desired: self.amount_a_desired,
			amount_b_desired: self.amount_b_desired,
			recipient,
		}
	}
}

/// A token amount the caller makes available to a mint batch.
#[derive(
	Copy,
	Clone,
	RuntimeDebug,
	PartialEq,
	Eq,
	Encode,
	Decode,
	DecodeWithMemTracking,
	MaxEncodedLen,
	TypeInfo,
)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct FundedToken {
	pub token: TokenId,
	pub amount: AssetAmount,
}

impl FundedToken {
	pub fn new(token: TokenId, amount: AssetAmount) -> Self {
		Self { token, amount }
	}
}

/// Sums the funded amounts per token, so that a token listed more than once is pulled only once.
///
/// Returns `None` if any per-token total overflows.
pub fn total_funding(funded_tokens: &[FundedToken]) -> Option<BTreeMap<TokenId, AssetAmount>> {
	funded_tokens.iter().try_fold(BTreeMap::new(), |mut totals, FundedToken { token, amount }| {
		let total: &mut AssetAmount = totals.entry(*token).or_default();
		*total = total.checked_add(*amount)?;
		Some(totals)
	})
}

/// Instructions for winding down one existing position.
#[derive(
	Copy,
	Clone,
	RuntimeDebug,
	PartialEq,
	Eq,
	Encode,
	Decode,
	DecodeWithMemTracking,
	MaxEncodedLen,
	TypeInfo,
)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct CloseRequest {
	pub position_id: PositionId,
	/// Withdraw all of the position's liquidity before collecting.
	pub should_close: bool,
	/// Destroy the position after collecting. Requires the position to be fully cleared.
	pub should_burn: bool,
	pub amount_a_min: AssetAmount,
	pub amount_b_min: AssetAmount,
	pub deadline: Deadline,
}

impl CloseRequest {
	/// Collect, withdraw and burn with no price protection.
	pub fn close_and_burn(position_id: PositionId, deadline: Deadline) -> Self {
		Self {
			position_id,
			should_close: true,
			should_burn: true,
			amount_a_min: 0,
			amount_b_min: 0,
			deadline,
		}
	}
}

/// What the position registry needs to mint a position.
#[derive(Clone, RuntimeDebug, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo)]
pub struct MintParams<AccountId> {
	pub token_a: TokenId,
	pub token_b: TokenId,
	pub fee_tier: FeeTier,
	pub tick_lower: Tick,
	pub tick_upper: Tick,
	pub amount_a_desired: AssetAmount,
	pub amount_b_desired: AssetAmount,
	pub recipient: AccountId,
}

/// The outcome of a successful mint.
#[derive(Copy, Clone, RuntimeDebug, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct MintedPosition {
	pub position_id: PositionId,
	pub liquidity: Liquidity,
	/// Amount of `token_a` actually consumed.
	pub amount_a: AssetAmount,
	/// Amount of `token_b` actually consumed.
	pub amount_b: AssetAmount,
}

impl MintedPosition {
	pub fn meets_minimums(&self, request: &MintRequest) -> bool {
		self.amount_a >= request.amount_a_min && self.amount_b >= request.amount_b_min
	}
}

/// The registry's view of a position.
#[derive(
	Copy, Clone, Default, RuntimeDebug, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo,
)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct PositionDetails {
	pub token_a: TokenId,
	pub token_b: TokenId,
	pub fee_tier: FeeTier,
	pub tick_lower: Tick,
	pub tick_upper: Tick,
	pub liquidity: Liquidity,
	pub tokens_owed_a: AssetAmount,
	pub tokens_owed_b: AssetAmount,
}

impl PositionDetails {
	/// A position can only be burned once it holds no liquidity and nothing is owed on it.
	pub fn is_cleared(&self) -> bool {
		self.liquidity == 0 && self.tokens_owed_a == 0 && self.tokens_owed_b == 0
	}
}
