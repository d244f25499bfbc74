// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! # Authentication Module
//!
//! Bearer-JWT authentication for the Ledgera API. The counter core trusts the
//! owner identifier extracted here; it performs no further validation.
//!
//! ## Auth Flow
//!
//! 1. Frontend authenticates the user and sends `Authorization: Bearer <JWT>`
//! 2. Server verifies the token:
//!    - **Production mode** (`LEDGERA_AUTH_SECRET` set): HS256 signature
//!      verification with the shared secret
//!    - **Development mode** (no secret): structure validation only
//! 3. The `sub` claim becomes the canonical `user_id` for counter scoping
//!
//! Clock skew tolerance is 60 seconds.

pub mod claims;
pub mod error;
pub mod extractor;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::Auth;
