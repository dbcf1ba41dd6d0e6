// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ephemeral notification queue.
//!
//! Every item owns one expiry timer. Whichever comes first, expiry or explicit dismissal,
//! removes the item and the other path becomes a no-op.

use std::fmt;
use std::time::{Duration, Instant};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::ids::NotificationIdTag;
use crate::model::{IdSequence, NotificationId, TimerId};
use crate::timer::TimerArena;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    id: NotificationId,
    message: String,
    kind: NotificationKind,
    created_at: Instant,
    expiry: TimerId,
}

impl NotificationItem {
    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}

#[derive(Debug)]
pub struct NotificationCenter {
    lifetime: Duration,
    ids: IdSequence<NotificationIdTag>,
    items: Vec<NotificationItem>,
    timers: TimerArena<NotificationId>,
}

impl NotificationCenter {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            ids: IdSequence::default(),
            items: Vec::new(),
            timers: TimerArena::new(),
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[NotificationItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn enqueue(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Instant,
    ) -> NotificationId {
        let id = self.ids.mint();
        let expiry = self.timers.schedule(now + self.lifetime, id);
        let message = message.into();
        tracing::debug!(%id, %kind, message = %message, "notification enqueued");
        self.items.push(NotificationItem {
            id,
            message,
            kind,
            created_at: now,
            expiry,
        });
        id
    }

    /// Removes the item if it is still queued. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };
        let item = self.items.remove(index);
        self.timers.cancel(item.expiry);
        true
    }

    /// Removes every item whose lifetime has elapsed. Returns how many were removed.
    pub fn tick(&mut self, now: Instant) -> usize {
        let expired = self.timers.drain_due(now);
        let before = self.items.len();
        for (_, id) in &expired {
            self.items.retain(|item| item.id != *id);
        }
        before - self.items.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn remaining(&self, item: &NotificationItem, now: Instant) -> Duration {
        (item.created_at + self.lifetime).saturating_duration_since(now)
    }

    /// Cancels every expiry timer and drops the queue.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.items.clear();
    }
}
