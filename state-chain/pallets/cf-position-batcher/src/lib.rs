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

#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

pub mod weights;

#[cfg(test)]
mod mock;

#[cfg(test)]
#[macro_use]
extern crate proptest;

use cf_primitives::{
	AssetAmount, CloseRequest, Deadline, FundedToken, MintRequest, NativeAmount, PositionId,
	TokenId,
};
use cf_traits::{LedgerError, NativeCurrency, PositionRegistry, RegistryError, TokenLedger};
use frame_support::{
	pallet_prelude::*,
	sp_runtime::traits::{AccountIdConversion, Zero},
	storage::transactional::with_storage_layer,
	traits::UnixTime,
	PalletId,
};
use frame_system::pallet_prelude::*;
use sp_std::collections::btree_map::BTreeMap;
pub use weights::WeightInfo;

pub use pallet::*;

pub const PALLET_VERSION: StorageVersion = StorageVersion::new(0);

#[frame_support::pallet]
pub mod pallet {
	use super::*;

	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// The event type.
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		/// Owns the liquidity positions and the tokens backing them.
		type PositionRegistry: PositionRegistry<AccountId = Self::AccountId>;

		type TokenLedger: TokenLedger<AccountId = Self::AccountId>;

		/// The currency batching fees are paid in.
		type NativeCurrency: NativeCurrency<AccountId = Self::AccountId>;

		/// Used to check request deadlines.
		type TimeSource: UnixTime;

		/// Derives the account that relays tokens and accumulates fees.
		#[pallet::constant]
		type PalletId: Get<PalletId>;

		/// The maximum number of requests or funded tokens in a single batch.
		#[pallet::constant]
		type MaxBatchSize: Get<u32>;

		/// Benchmark weights
		type WeightInfo: WeightInfo;
	}

	#[pallet::pallet]
	#[pallet::storage_version(PALLET_VERSION)]
	pub struct Pallet<T>(PhantomData<T>);

	/// The native-currency fee charged for every batched operation.
	#[pallet::storage]
	pub type Fee<T: Config> = StorageValue<_, NativeAmount, ValueQuery>;

	/// The account allowed to set the fee and withdraw accumulated fees. Nobody, once renounced.
	#[pallet::storage]
	pub type Owner<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

	#[pallet::genesis_config]
	#[derive(frame_support::DefaultNoBound)]
	pub struct GenesisConfig<T: Config> {
		pub owner: Option<T::AccountId>,
		pub fee: NativeAmount,
	}

	#[pallet::genesis_build]
	impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
		fn build(&self) {
			Fee::<T>::put(self.fee);
			Owner::<T>::set(self.owner.clone());
		}
	}

	#[pallet::hooks]
	impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
		fn integrity_test() {
			assert!(T::MaxBatchSize::get() > 0, "Batches must be allowed to hold a request.");
		}
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// A position was minted and is owned by the caller.
		Minted { owner: T::AccountId, position_id: PositionId },
		/// Everything owed on a position was paid out.
		FeesCollected {
			position_id: PositionId,
			recipient: T::AccountId,
			amount_a: AssetAmount,
			amount_b: AssetAmount,
		},
		LiquidityWithdrawn {
			position_id: PositionId,
			amount_a: AssetAmount,
			amount_b: AssetAmount,
		},
		PositionBurned { position_id: PositionId },
		/// Funding left unconsumed by a mint batch was returned.
		DustRefunded { recipient: T::AccountId, token: TokenId, amount: AssetAmount },
		FeePaid { payer: T::AccountId, amount: NativeAmount },
		FeeSet { old_fee: NativeAmount, new_fee: NativeAmount },
		/// The accumulated fees were swept out of the operator account.
		Withdrawn { recipient: T::AccountId, amount: NativeAmount },
		OwnershipTransferred {
			previous_owner: Option<T::AccountId>,
			new_owner: Option<T::AccountId>,
		},
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The attached payment is below the current fee.
		InsufficientFee,
		/// The caller does not own the position, or has not approved the operator to move their
		/// positions or tokens.
		NotApproved,
		/// A mint or withdrawal returned less than the requested minimum amounts.
		PriceSlippage,
		/// The request's deadline has passed.
		DeadlineExpired,
		/// An account does not hold enough tokens to fund the batch.
		InsufficientSupply,
		/// Only the owner may call this.
		NotOwner,
		/// The tick range is empty or out of bounds.
		InvalidTickRange,
		/// No position exists with the given id.
		UnknownPosition,
		/// A position cannot be burned while it holds liquidity or owed tokens.
		PositionNotCleared,
		/// Funded amounts for a token add up to more than can be represented.
		AmountOverflow,
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Mints each requested position on behalf of the caller, funded by `funded_tokens`.
		///
		/// The funded amounts are pulled from the caller up front. Whatever the mints do not
		/// consume is refunded at the end of the batch.
		#[pallet::call_index(0)]
		#[pallet::weight(T::WeightInfo::mint(
			mint_requests.len() as u32,
			funded_tokens.len() as u32,
		))]
		pub fn mint(
			origin: OriginFor<T>,
			mint_requests: BoundedVec<MintRequest, T::MaxBatchSize>,
			funded_tokens: BoundedVec<FundedToken, T::MaxBatchSize>,
			payment: NativeAmount,
		) -> DispatchResult {
			let caller = ensure_signed(origin)?;

			with_storage_layer(|| {
				Self::charge_fee(&caller, payment)?;
				Self::mint_positions(&caller, &mint_requests, &funded_tokens)
			})
		}

		/// Collects everything owed on each of the caller's positions.
		#[pallet::call_index(1)]
		#[pallet::weight(T::WeightInfo::collect(position_ids.len() as u32))]
		pub fn collect(
			origin: OriginFor<T>,
			position_ids: BoundedVec<PositionId, T::MaxBatchSize>,
			payment: NativeAmount,
		) -> DispatchResult {
			let caller = ensure_signed(origin)?;

			with_storage_layer(|| {
				Self::charge_fee(&caller, payment)?;
				Self::collect_positions(&caller, &position_ids)
			})
		}

		/// Collects from each position, optionally withdrawing all of its liquidity first and
		/// burning it afterwards.
		#[pallet::call_index(2)]
		#[pallet::weight(T::WeightInfo::collect_and_close(close_requests.len() as u32))]
		pub fn collect_and_close(
			origin: OriginFor<T>,
			close_requests: BoundedVec<CloseRequest, T::MaxBatchSize>,
			payment: NativeAmount,
		) -> DispatchResult {
			let caller = ensure_signed(origin)?;

			with_storage_layer(|| {
				Self::charge_fee(&caller, payment)?;
				Self::close_positions(&caller, &close_requests)
			})
		}

		/// Closes positions and mints new ones in a single fee-paying batch.
		///
		/// The close requests are processed first, so tokens released by them can fund the mints.
		#[pallet::call_index(3)]
		#[pallet::weight(T::WeightInfo::rerange(
			mint_requests.len() as u32,
			funded_tokens.len() as u32,
			close_requests.len() as u32,
		))]
		pub fn rerange(
			origin: OriginFor<T>,
			mint_requests: BoundedVec<MintRequest, T::MaxBatchSize>,
			funded_tokens: BoundedVec<FundedToken, T::MaxBatchSize>,
			close_requests: BoundedVec<CloseRequest, T::MaxBatchSize>,
			payment: NativeAmount,
		) -> DispatchResult {
			let caller = ensure_signed(origin)?;

			with_storage_layer(|| {
				Self::charge_fee(&caller, payment)?;
				Self::close_positions(&caller, &close_requests)?;
				Self::mint_positions(&caller, &mint_requests, &funded_tokens)
			})
		}

		#[pallet::call_index(4)]
		#[pallet::weight(T::WeightInfo::set_fee())]
		pub fn set_fee(origin: OriginFor<T>, new_fee: NativeAmount) -> DispatchResult {
			Self::ensure_owner(origin)?;

			let old_fee = Fee::<T>::mutate(|fee| core::mem::replace(fee, new_fee));
			Self::deposit_event(Event::<T>::FeeSet { old_fee, new_fee });

			Ok(())
		}

		/// Sends the whole native balance of the operator account to `recipient`.
		#[pallet::call_index(5)]
		#[pallet::weight(T::WeightInfo::withdraw())]
		pub fn withdraw(origin: OriginFor<T>, recipient: T::AccountId) -> DispatchResult {
			Self::ensure_owner(origin)?;

			let operator = Self::operator_account();
			let amount = T::NativeCurrency::balance(&operator);
			T::NativeCurrency::transfer(&operator, &recipient, amount)?;
			Self::deposit_event(Event::<T>::Withdrawn { recipient, amount });

			Ok(())
		}

		/// Hands the owner role to `new_owner`, or renounces it if `None`.
		#[pallet::call_index(6)]
		#[pallet::weight(T::WeightInfo::transfer_ownership())]
		pub fn transfer_ownership(
			origin: OriginFor<T>,
			new_owner: Option<T::AccountId>,
		) -> DispatchResult {
			let previous_owner = Self::ensure_owner(origin)?;

			Owner::<T>::set(new_owner.clone());
			Self::deposit_event(Event::<T>::OwnershipTransferred {
				previous_owner: Some(previous_owner),
				new_owner,
			});

			Ok(())
		}
	}
}

impl<T> From<LedgerError> for Error<T> {
	fn from(error: LedgerError) -> Self {
		match error {
			LedgerError::InsufficientBalance => Error::<T>::InsufficientSupply,
			LedgerError::InsufficientAllowance => Error::<T>::NotApproved,
		}
	}
}

impl<T> From<RegistryError> for Error<T> {
	fn from(error: RegistryError) -> Self {
		match error {
			RegistryError::NotApproved => Error::<T>::NotApproved,
			RegistryError::UnknownPosition => Error::<T>::UnknownPosition,
			RegistryError::PositionNotCleared => Error::<T>::PositionNotCleared,
			RegistryError::InvalidTickRange => Error::<T>::InvalidTickRange,
			RegistryError::Ledger(error) => error.into(),
		}
	}
}

impl<T: Config> Pallet<T> {
	/// The account that pays for mints, relays tokens and accumulates fees.
	pub fn operator_account() -> T::AccountId {
		T::PalletId::get().into_account_truncating()
	}

	/// The account the caller must approve before minting or operating on positions.
	pub fn position_registry_account() -> T::AccountId {
		T::PositionRegistry::account_id()
	}

	pub fn fee() -> NativeAmount {
		Fee::<T>::get()
	}

	pub fn owner() -> Option<T::AccountId> {
		Owner::<T>::get()
	}

	fn ensure_owner(origin: OriginFor<T>) -> Result<T::AccountId, DispatchError> {
		let who = ensure_signed(origin)?;
		if Owner::<T>::get().as_ref() != Some(&who) {
			log::warn!("Rejected admin call from non-owner {who:?}.");
			return Err(Error::<T>::NotOwner.into())
		}
		Ok(who)
	}

	/// Moves the whole payment into the operator account, provided it covers the fee.
	fn charge_fee(payer: &T::AccountId, payment: NativeAmount) -> DispatchResult {
		let fee = Fee::<T>::get();
		if payment < fee {
			log::warn!(
				"Rejected batch from {payer:?}: payment of {payment} is below the fee of {fee}."
			);
			return Err(Error::<T>::InsufficientFee.into())
		}

		if !payment.is_zero() {
			T::NativeCurrency::transfer(payer, &Self::operator_account(), payment)?;
		}
		Self::deposit_event(Event::<T>::FeePaid { payer: payer.clone(), amount: payment });

		Ok(())
	}

	fn ensure_before_deadline(deadline: Deadline) -> DispatchResult {
		ensure!(T::TimeSource::now().as_secs() <= deadline, Error::<T>::DeadlineExpired);
		Ok(())
	}

	fn ensure_position_owner(caller: &T::AccountId, position_id: PositionId) -> DispatchResult {
		let owner =
			T::PositionRegistry::owner_of(position_id).ok_or(Error::<T>::UnknownPosition)?;
		ensure!(owner == *caller, Error::<T>::NotApproved);
		Ok(())
	}

	fn mint_positions(
		caller: &T::AccountId,
		mint_requests: &[MintRequest],
		funded_tokens: &[FundedToken],
	) -> DispatchResult {
		for request in mint_requests {
			Self::ensure_before_deadline(request.deadline)?;
			ensure!(request.has_valid_range(), Error::<T>::InvalidTickRange);
		}

		let funding =
			cf_primitives::total_funding(funded_tokens).ok_or(Error::<T>::AmountOverflow)?;
		let operator = Self::operator_account();
		let registry = T::PositionRegistry::account_id();

		for (&token, &amount) in &funding {
			T::TokenLedger::transfer_from(&operator, caller, &operator, token, amount)
				.map_err(Error::<T>::from)?;
			T::TokenLedger::approve(&operator, &registry, token, amount);
		}

		let mut consumed = BTreeMap::<TokenId, AssetAmount>::new();
		for request in mint_requests {
			let minted = T::PositionRegistry::mint(&operator, request.to_params(caller.clone()))
				.map_err(Error::<T>::from)?;
			ensure!(minted.meets_minimums(request), Error::<T>::PriceSlippage);

			for (token, amount) in
				[(request.token_a, minted.amount_a), (request.token_b, minted.amount_b)]
			{
				let total = consumed.entry(token).or_default();
				*total = total.checked_add(amount).ok_or(Error::<T>::AmountOverflow)?;
			}

			log::debug!(
				"Minted position {} with liquidity {} for {caller:?}.",
				minted.position_id,
				minted.liquidity
			);
			Self::deposit_event(Event::<T>::Minted {
				owner: caller.clone(),
				position_id: minted.position_id,
			});
		}

		for (token, pulled) in funding {
			T::TokenLedger::approve(&operator, &registry, token, 0);

			let dust = pulled.saturating_sub(consumed.get(&token).copied().unwrap_or_default());
			if !dust.is_zero() {
				log::debug!("Refunding {dust} of token {token} to {caller:?}.");
				T::TokenLedger::transfer(&operator, caller, token, dust)
					.map_err(Error::<T>::from)?;
				Self::deposit_event(Event::<T>::DustRefunded {
					recipient: caller.clone(),
					token,
					amount: dust,
				});
			}
		}

		Ok(())
	}

	fn collect_positions(caller: &T::AccountId, position_ids: &[PositionId]) -> DispatchResult {
		let operator = Self::operator_account();
		for &position_id in position_ids {
			Self::ensure_position_owner(caller, position_id)?;
			Self::collect_owed(&operator, caller, position_id)?;
		}
		Ok(())
	}

	fn close_positions(caller: &T::AccountId, close_requests: &[CloseRequest]) -> DispatchResult {
		let operator = Self::operator_account();

		for request in close_requests {
			let position_id = request.position_id;
			Self::ensure_position_owner(caller, position_id)?;

			if request.should_close {
				Self::ensure_before_deadline(request.deadline)?;

				let liquidity = T::PositionRegistry::position(position_id)
					.ok_or(Error::<T>::UnknownPosition)?
					.liquidity;
				let (amount_a, amount_b) =
					T::PositionRegistry::decrease_liquidity(&operator, position_id, liquidity)
						.map_err(Error::<T>::from)?;
				ensure!(
					amount_a >= request.amount_a_min && amount_b >= request.amount_b_min,
					Error::<T>::PriceSlippage
				);

				Self::deposit_event(Event::<T>::LiquidityWithdrawn {
					position_id,
					amount_a,
					amount_b,
				});
			}

			Self::collect_owed(&operator, caller, position_id)?;

			if request.should_burn {
				T::PositionRegistry::burn(&operator, position_id).map_err(Error::<T>::from)?;
				Self::deposit_event(Event::<T>::PositionBurned { position_id });
			}
		}

		Ok(())
	}

	fn collect_owed(
		operator: &T::AccountId,
		recipient: &T::AccountId,
		position_id: PositionId,
	) -> DispatchResult {
		let (amount_a, amount_b) = T::PositionRegistry::collect(operator, position_id, recipient)
			.map_err(Error::<T>::from)?;

		Self::deposit_event(Event::<T>::FeesCollected {
			position_id,
			recipient: recipient.clone(),
			amount_a,
			amount_b,
		});

		Ok(())
	}
}
