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

//! Background session-expiry monitor.
//!
//! A dedicated thread wakes on a tick channel and asks the shared [`Session`]
//! to expire itself when idle past the threshold. The expiry transition runs
//! through the same session mutex as command dispatch, so the sweep is the
//! eventually-observed kind: a command racing the tick sees either the live
//! session or the cleared one.

use crate::base::AccountId;
use crate::session::Session;
use crossbeam::channel::{Sender, bounded, tick};
use crossbeam::select;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::debug;

/// How often the monitor checks the session for expiry.
pub const SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Handle to the expiry-monitor thread.
///
/// Dropping the handle signals the thread to stop and joins it.
pub struct ExpiryMonitor {
    shutdown: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl ExpiryMonitor {
    /// Spawns the monitor thread.
    ///
    /// Every `period` the thread checks whether the session has been idle
    /// longer than `idle_timeout`; on expiry it clears the session and passes
    /// the expired account to `on_expire` (the shell uses this to tell the
    /// user). `period` and `idle_timeout` are injectable so tests do not wait
    /// on wall-clock minutes.
    pub fn spawn<F>(
        session: Arc<Session>,
        period: Duration,
        idle_timeout: Duration,
        on_expire: F,
    ) -> Self
    where
        F: Fn(AccountId) + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
        let handle = std::thread::spawn(move || {
            let ticker = tick(period);
            loop {
                select! {
                    recv(ticker) -> _ => {
                        debug!("tick");
                        if let Some(account_id) = session.expire_if_idle(idle_timeout) {
                            on_expire(account_id);
                        }
                    }
                    recv(shutdown_rx) -> _ => break,
                }
            }
        });
        ExpiryMonitor {
            shutdown: shutdown_tx,
            handle: Some(handle),
        }
    }
}

impl Drop for ExpiryMonitor {
    fn drop(&mut self) {
        let _ = self.shutdown.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExpiryMonitor;
    use crate::base::AccountId;
    use crate::session::Session;
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn expires_idle_session_and_reports_account() {
        let session = Arc::new(Session::new());
        session.login(AccountId::from("42"));

        let (tx, rx) = mpsc::channel();
        let _monitor = ExpiryMonitor::spawn(
            Arc::clone(&session),
            Duration::from_millis(10),
            Duration::from_millis(30),
            move |account_id| {
                let _ = tx.send(account_id);
            },
        );

        let expired = rx
            .recv_timeout(Duration::from_secs(2))
            .expect("session should expire");
        assert_eq!(expired, AccountId::from("42"));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn activity_defers_expiry() {
        let session = Arc::new(Session::new());
        session.login(AccountId::from("42"));

        let (tx, rx) = mpsc::channel();
        let _monitor = ExpiryMonitor::spawn(
            Arc::clone(&session),
            Duration::from_millis(5),
            Duration::from_millis(100),
            move |account_id| {
                let _ = tx.send(account_id);
            },
        );

        // Keep touching the session; it must stay authenticated throughout.
        for _ in 0..10 {
            std::thread::sleep(Duration::from_millis(10));
            session.touch();
            assert!(session.is_authenticated());
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn drop_stops_the_monitor_thread() {
        let session = Arc::new(Session::new());
        let monitor = ExpiryMonitor::spawn(
            session,
            Duration::from_millis(5),
            Duration::from_millis(5),
            |_| {},
        );
        // Drop must return promptly rather than hang on the thread.
        drop(monitor);
    }
}
