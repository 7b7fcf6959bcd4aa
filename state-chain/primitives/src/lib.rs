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

//! Chainflip Primitives
//!
//! Primitive types shared by the position batcher, its collaborators and their mocks.

pub mod liquidity;
pub use liquidity::*;

#[cfg(test)]
#[macro_use]
extern crate proptest;


/// Amount of a fungible token, in the token's smallest unit.
pub type AssetAmount = u128;

/// Amount of the chain's native currency, in its smallest unit.
pub type NativeAmount = u128;

/// Identifies a fungible token held in the token ledger.
pub type TokenId = u32;

/// Identifies a non-fungible liquidity position in the position registry.
pub type PositionId = u64;

/// Pool fee tier, in hundredths of a basis point.
pub type FeeTier = u32;

/// Unix timestamp, in seconds, after which an operation must no longer execute.
pub type Deadline = u64;
