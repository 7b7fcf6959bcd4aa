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

use core::fmt::Debug;
use frame_support::{
	assert_noop, assert_ok,
	pallet_prelude::DispatchResult,
	traits::{IntegrityTest, OnFinalize, OnIdle, OnInitialize},
	weights::Weight,
};
use frame_system::pallet_prelude::BlockNumberFor;
use sp_runtime::{traits::Dispatchable, BuildStorage};

/// Convenience trait to link a runtime with its corresponding AllPalletsWithSystem struct.
pub trait HasAllPallets: frame_system::Config {
	type AllPalletsWithSystem: OnInitialize<BlockNumberFor<Self>>
		+ OnIdle<BlockNumberFor<Self>>
		+ OnFinalize<BlockNumberFor<Self>>
		+ IntegrityTest;

	fn on_initialize(block_number: BlockNumberFor<Self>) {
		<Self::AllPalletsWithSystem as OnInitialize<BlockNumberFor<Self>>>::on_initialize(
			block_number,
		);
	}
	fn on_idle(block_number: BlockNumberFor<Self>, weight: Weight) {
		<Self::AllPalletsWithSystem as OnIdle<BlockNumberFor<Self>>>::on_idle(block_number, weight);
	}
	fn on_finalize(block_number: BlockNumberFor<Self>) {
		<Self::AllPalletsWithSystem as OnFinalize<BlockNumberFor<Self>>>::on_finalize(block_number);
	}
	fn integrity_test() {
		<Self::AllPalletsWithSystem as IntegrityTest>::integrity_test();
	}
}

/// Basic [sp_io::TestExternalities] wrapper that knows how to run a block.
struct RichExternalities<Runtime>(sp_io::TestExternalities, core::marker::PhantomData<Runtime>);

impl<Runtime: HasAllPallets> RichExternalities<Runtime> {
	fn new(ext: sp_io::TestExternalities) -> Self {
		Self(ext, Default::default())
	}

	/// Executes a closure, preserving the result as test context.
	#[track_caller]
	fn execute_with<Ctx>(mut self, f: impl FnOnce() -> Ctx) -> TestExternalities<Runtime, Ctx> {
		let context = self.0.execute_with(f);
		TestExternalities { ext: self, context }
	}

	/// Increments the block number and executes the closure as a block, including all the runtime
	/// hooks. Events from previous blocks are cleared first.
	#[track_caller]
	fn execute_at_next_block<Ctx>(
		mut self,
		f: impl FnOnce() -> Ctx,
	) -> TestExternalities<Runtime, Ctx> {
		let context = self.0.execute_with(|| {
			let block_number = frame_system::Pallet::<Runtime>::block_number() + 1u32.into();
			frame_system::Pallet::<Runtime>::reset_events();
			frame_system::Pallet::<Runtime>::set_block_number(block_number);
			Runtime::on_initialize(block_number);
			let context = f();
			Runtime::on_idle(block_number, Weight::MAX);
			Runtime::on_finalize(block_number);
			context
		});
		TestExternalities { ext: self, context }
	}
}

/// A wrapper around [sp_io::TestExternalities] that threads a context value from one closure to
/// the next.
pub struct TestExternalities<Runtime: HasAllPallets, Ctx = ()> {
	ext: RichExternalities<Runtime>,
	context: Ctx,
}

impl<Runtime: HasAllPallets> TestExternalities<Runtime> {
	/// Initialises new [TestExternalities] with the given genesis config at block number 1.
	#[track_caller]
	pub fn new<GenesisConfig: BuildStorage>(config: GenesisConfig) -> Self {
		let mut ext: sp_io::TestExternalities =
			config.build_storage().expect("genesis config must be valid").into();
		ext.execute_with(|| {
			frame_system::Pallet::<Runtime>::set_block_number(1u32.into());
			Runtime::integrity_test();
		});
		TestExternalities { ext: RichExternalities::new(ext), context: () }
	}

	/// Equivalent to the context-less execute_with from [sp_io::TestExternalities].
	#[track_caller]
	pub fn execute_with<Ctx>(self, f: impl FnOnce() -> Ctx) -> TestExternalities<Runtime, Ctx> {
		self.ext.execute_with(f)
	}
}

impl<Runtime: HasAllPallets, Ctx> TestExternalities<Runtime, Ctx> {
	/// Execute a closure. The return value of the closure is preserved as test context.
	#[track_caller]
	pub fn then_execute_with<R>(self, f: impl FnOnce(Ctx) -> R) -> TestExternalities<Runtime, R> {
		let context = self.context;
		self.ext.execute_with(move || f(context))
	}

	/// Access the storage without changing the test context. Useful for assertions.
	#[track_caller]
	pub fn then_execute_with_keep_context(
		self,
		f: impl FnOnce(&Ctx),
	) -> TestExternalities<Runtime, Ctx> {
		self.then_execute_with(|context| {
			f(&context);
			context
		})
	}

	/// Execute the given closure as if it was an extrinsic in the next block.
	///
	/// The closure's return value is next context.
	#[track_caller]
	pub fn then_execute_at_next_block<R>(
		self,
		f: impl FnOnce(Ctx) -> R,
	) -> TestExternalities<Runtime, R> {
		let context = self.context;
		self.ext.execute_at_next_block(move || f(context))
	}

	/// Inspect the test context without accessing storage.
	#[track_caller]
	pub fn inspect_context(self, f: impl FnOnce(&Ctx)) -> TestExternalities<Runtime, Ctx> {
		f(&self.context);
		self
	}

	/// Consume the test externalities and return the context.
	pub fn into_context(self) -> Ctx {
		self.context
	}
}

impl<Runtime, Ctx> TestExternalities<Runtime, Ctx>
where
	Runtime: HasAllPallets,
	<Runtime::RuntimeCall as Dispatchable>::PostInfo: Debug + Default,
{
	/// Dispatches the provided calls in the next block, asserting the expected result of each.
	///
	/// Failing calls are additionally checked to have left storage untouched.
	#[track_caller]
	pub fn then_apply_extrinsics<
		C: Into<Runtime::RuntimeCall>,
		I: IntoIterator<Item = (Runtime::RuntimeOrigin, C, DispatchResult)>,
	>(
		self,
		f: impl FnOnce(&Ctx) -> I,
	) -> TestExternalities<Runtime, Ctx> {
		let TestExternalities { ext, context } = self;
		let calls = ext.execute_at_next_block(|| {
			for (origin, call, expected_result) in f(&context) {
				match expected_result {
					Ok(_) => {
						assert_ok!(call.into().dispatch(origin));
					},
					Err(e) => {
						assert_noop!(call.into().dispatch(origin), e);
					},
				}
			}
		});
		TestExternalities { ext: calls.ext, context }
	}
}

#[cfg(test)]
mod test_examples {
	use super::*;
	use frame_support::{derive_impl, traits::OriginTrait};
	use sp_runtime::DispatchError;

	type Block = frame_system::mocking::MockBlock<Test>;

	frame_support::construct_runtime!(
		pub enum Test
		{
			System: frame_system,
		}
	);

	#[derive_impl(frame_system::config_preludes::TestDefaultConfig as frame_system::DefaultConfig)]
	impl frame_system::Config for Test {
		type Block = Block;
	}

	impl HasAllPallets for Test {
		type AllPalletsWithSystem = AllPalletsWithSystem;
	}

	fn new_test_ext() -> TestExternalities<Test> {
		TestExternalities::<Test>::new(RuntimeGenesisConfig::default())
	}

	const ALICE: u64 = 1;

	#[test]
	fn context_is_threaded_through_blocks() {
		new_test_ext()
			.execute_with(|| {
				assert_eq!(System::block_number(), 1);
				System::block_number()
			})
			.then_execute_at_next_block(|n| {
				assert_eq!(System::block_number(), n + 1);
				"next"
			})
			.then_execute_with_keep_context(|_| {
				assert_eq!(System::block_number(), 2, "Only the block helpers advance the block.");
			})
			.inspect_context(|context| assert_eq!(*context, "next"));
	}

	#[test]
	fn extrinsics_are_applied_in_the_next_block() {
		let events = new_test_ext()
			.then_apply_extrinsics(|_| {
				[
					(
						OriginTrait::signed(ALICE),
						RuntimeCall::from(frame_system::Call::remark_with_event {
							remark: vec![1, 2, 3],
						}),
						Ok(()),
					),
					(
						OriginTrait::none(),
						RuntimeCall::from(frame_system::Call::remark_with_event {
							remark: vec![1, 2, 3],
						}),
						Err(DispatchError::BadOrigin),
					),
				]
			})
			.then_execute_with(|_| {
				assert_eq!(System::block_number(), 2);
				System::events().into_iter().map(|e| e.event).collect::<Vec<_>>()
			})
			.into_context();

		assert!(matches!(
			events.as_slice(),
			[RuntimeEvent::System(frame_system::Event::Remarked { sender, .. })] if *sender == ALICE
		));
	}
}
