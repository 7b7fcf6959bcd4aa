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

#![cfg(feature = "std")]

use codec::{Decode, Encode, EncodeLike};
use frame_support::{storage, StorageHasher, Twox64Concat};

pub mod native_currency;
pub mod position_registry;
pub mod time_source;
pub mod token_ledger;

/// Account type used by all mocks. Matches the `AccountId` of the default test runtime.
pub type MockAccountId = u64;

/// Mocks keep their state in the externalities so that it is rolled back together with any
/// failed extrinsic.
trait MockPallet {
	const PREFIX: &'static [u8];
}

trait MockPalletStorage {
	fn put_storage<K: Encode, V: Encode>(store: &[u8], k: K, v: V);
	fn get_storage<K: Encode, V: Decode + Sized>(store: &[u8], k: K) -> Option<V>;
	fn take_storage<K: Encode, V: Decode + Sized>(store: &[u8], k: K) -> Option<V>;
	fn put_value<V: Encode>(store: &[u8], v: V);
	fn get_value<V: Decode + Sized>(store: &[u8]) -> Option<V>;
	fn mutate_storage<
		K: Encode,
		E: EncodeLike<K>,
		V: Encode + Decode + Sized,
		R,
		F: FnOnce(&mut Option<V>) -> R,
	>(
		store: &[u8],
		k: &E,
		f: F,
	) -> R {
		let mut storage = Self::get_storage(store, k);
		let result = f(&mut storage);
		if let Some(v) = storage {
			Self::put_storage(store, k, v);
		}
		result
	}
	fn mutate_value<V: Encode + Decode + Sized, R, F: FnOnce(&mut Option<V>) -> R>(
		store: &[u8],
		f: F,
	) -> R {
		let mut storage = Self::get_value(store);
		let result = f(&mut storage);
		if let Some(v) = storage {
			Self::put_value(store, v);
		}
		result
	}
}

fn storage_key<K: Encode>(prefix: &[u8], store: &[u8], k: K) -> Vec<u8> {
	[prefix, store, &k.encode()].concat()
}

impl<T: MockPallet> MockPalletStorage for T {
	fn put_storage<K: Encode, V: Encode>(store: &[u8], k: K, v: V) {
		storage::hashed::put(
			&<Twox64Concat as StorageHasher>::hash,
			&storage_key(Self::PREFIX, store, k),
			&v,
		)
	}

	fn get_storage<K: Encode, V: Decode + Sized>(store: &[u8], k: K) -> Option<V> {
		storage::hashed::get(
			&<Twox64Concat as StorageHasher>::hash,
			&storage_key(Self::PREFIX, store, k),
		)
	}

	fn take_storage<K: Encode, V: Decode + Sized>(store: &[u8], k: K) -> Option<V> {
		storage::hashed::take(
			&<Twox64Concat as StorageHasher>::hash,
			&storage_key(Self::PREFIX, store, k),
		)
	}

	fn put_value<V: Encode>(store: &[u8], v: V) {
		storage::hashed::put(
			&<Twox64Concat as StorageHasher>::hash,
			&storage_key(Self::PREFIX, store, ()),
			&v,
		)
	}

	fn get_value<V: Decode + Sized>(store: &[u8]) -> Option<V> {
		storage::hashed::get(
			&<Twox64Concat as StorageHasher>::hash,
			&storage_key(Self::PREFIX, store, ()),
		)
	}
}
