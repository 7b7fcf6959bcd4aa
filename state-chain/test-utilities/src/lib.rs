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

use frame_system::Config;

mod rich_test_externalities;

pub use rich_test_externalities::*;

pub fn last_event<T: Config>() -> <T as Config>::RuntimeEvent {
	maybe_last_event::<T>().expect("Event expected")
}

pub fn maybe_last_event<T: Config>() -> Option<<T as Config>::RuntimeEvent> {
	frame_system::Pallet::<T>::events().pop().map(|e| e.event)
}

#[track_caller]
pub fn assert_has_event<T: frame_system::Config>(event: <T as frame_system::Config>::RuntimeEvent) {
	let events = frame_system::Pallet::<T>::events()
		.into_iter()
		.map(|e| e.event)
		.collect::<Vec<_>>();
	assert!(events.iter().any(|e| e == &event), "Event {event:#?} not found in {events:#?}",);
}

/// Checks the deposited events in the order they occur
#[macro_export]
macro_rules! assert_event_sequence {
	($runtime:ty, $($evt:expr),* $(,)?) => {
		let mut events = frame_system::Pallet::<$runtime>::events()
			.into_iter()
			// We want to be able to input the events into this macro in the order they occurred.
			.rev()
			.map(|e| e.event)
			.collect::<Vec<_>>();

		$(
			let actual =
				events.pop().unwrap_or_else(|| panic!("No more events. Expected: {:?}", $evt));
			assert_eq!(actual, $evt);
		)*
	};
}

/// Generates `new_test_ext` for a runtime built with `construct_runtime!`. The optional closure is
/// run against the genesis state before any test code.
#[macro_export]
macro_rules! impl_test_helpers {
	( $runtime:ty, $genesis:expr, $setup:expr ) => {
		impl $crate::HasAllPallets for $runtime {
			type AllPalletsWithSystem = AllPalletsWithSystem;
		}

		/// Create new test externalities with the test genesis config and initial state.
		pub fn new_test_ext() -> $crate::TestExternalities<$runtime> {
			$crate::TestExternalities::<$runtime>::new($genesis).execute_with($setup)
		}
	};
	( $runtime:ty, $genesis:expr ) => {
		$crate::impl_test_helpers!($runtime, $genesis, || ());
	};
	( $runtime:ty ) => {
		$crate::impl_test_helpers!($runtime, RuntimeGenesisConfig::default());
	};
}
