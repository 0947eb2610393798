// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Session state.
//!
//! Exactly one [`Session`] exists per process: the machine serves a single
//! user at a time. The command dispatcher and the background expiry monitor
//! both touch it, so every transition happens under one mutex and neither
//! actor can observe a half-updated session.

use crate::base::AccountId;
use parking_lot::Mutex;
use std::time::{Duration, Instant};
use tracing::info;

/// How long an authenticated session may sit idle before it is expired.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60);

#[derive(Debug)]
struct SessionData {
    authenticated: bool,
    account_id: Option<AccountId>,
    last_activity: Instant,
}

/// The single active login session.
///
/// Starts unauthenticated; transitions to authenticated on a successful PIN
/// check and back on logout or idle expiry.
#[derive(Debug)]
pub struct Session {
    inner: Mutex<SessionData>,
}

impl Session {
    /// Creates a session in the unauthenticated state.
    pub fn new() -> Self {
        Session {
            inner: Mutex::new(SessionData {
                authenticated: false,
                account_id: None,
                last_activity: Instant::now(),
            }),
        }
    }

    /// Marks the session authenticated for `account_id`.
    pub fn login(&self, account_id: AccountId) {
        let mut data = self.inner.lock();
        data.authenticated = true;
        data.account_id = Some(account_id);
        data.last_activity = Instant::now();
    }

    /// Clears the session; returns the account that was logged in, if any.
    pub fn logout(&self) -> Option<AccountId> {
        let mut data = self.inner.lock();
        if data.authenticated {
            data.authenticated = false;
            data.account_id.take()
        } else {
            None
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.lock().authenticated
    }

    /// The account currently logged in, if any.
    pub fn account_id(&self) -> Option<AccountId> {
        self.inner.lock().account_id.clone()
    }

    /// Refreshes the last-activity timestamp. Called for every accepted
    /// command.
    pub fn touch(&self) {
        self.inner.lock().last_activity = Instant::now();
    }

    /// How long the session has been idle.
    pub fn idle_time(&self) -> Duration {
        self.inner.lock().last_activity.elapsed()
    }

    /// Forces the session back to unauthenticated when it has been idle
    /// longer than `threshold`.
    ///
    /// Returns the expired account, or `None` when no transition happened.
    /// The check and the transition happen under one lock, so a command
    /// dispatched concurrently sees either the old session or the cleared
    /// one, never a mix.
    pub fn expire_if_idle(&self, threshold: Duration) -> Option<AccountId> {
        let mut data = self.inner.lock();
        if data.authenticated && data.last_activity.elapsed() > threshold {
            data.authenticated = false;
            let account_id = data.account_id.take();
            if let Some(ref account_id) = account_id {
                info!(%account_id, "session expired");
            }
            account_id
        } else {
            None
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
