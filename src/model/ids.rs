// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;

/// A session-scoped sequential identifier.
///
/// Values are minted by an [`IdSequence`] of the same tag and are never reused within the
/// lifetime of that sequence, so a stale id can never alias a newer item.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub const fn from_raw(value: u64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn get(self) -> u64 {
        self.value
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Monotonic generator for [`Id`]s. Starts at 1 so `0` never appears in snapshots.
#[derive(Debug)]
pub struct IdSequence<T> {
    next: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for IdSequence<T> {
    fn default() -> Self {
        Self {
            next: 1,
            _marker: PhantomData,
        }
    }
}

impl<T> IdSequence<T> {
    pub fn mint(&mut self) -> Id<T> {
        let id = Id::from_raw(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NotificationIdTag {}
pub type NotificationId = Id<NotificationIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SelectionTokenTag {}
/// Marks which selection an in-flight fetch belongs to.
pub type SelectionToken = Id<SelectionTokenTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerIdTag {}
pub type TimerId = Id<TimerIdTag>;
