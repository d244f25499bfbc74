// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! Counter contract interface.

use alloy::sol;

// Define the counter contract interface using alloy's sol! macro.
// The deployed contract keeps its own count, independent of the embedded
// store; getCount is a view call and needs no transaction parameters.
sol! {
    #[sol(rpc)]
    interface ICounter {
        function increment() external;
        function reset() external;
        function getCount() external view returns (uint256);
    }
}
