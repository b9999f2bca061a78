// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the canvas: item identifiers, client keys, flags, and selection state.

/// Identifier for an item on a [`Canvas`](crate::Canvas).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ItemId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ItemId`.
///
/// ### Liveness
///
/// Use [`Canvas::is_alive`](crate::Canvas::is_alive) to check whether an `ItemId` still refers
/// to a live item. Stale `ItemId`s never alias a different live item because the generation must
/// match. Domain objects holding an `ItemId` to an item that has since been removed (for example
/// because its parent group was removed) observe this as a stale handle rather than a dangling
/// pointer.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ItemId(pub(crate) u32, pub(crate) u32);

impl ItemId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// Opaque key of a domain object associated with an item.
///
/// The canvas never owns or dereferences clients. It only hands this key back when
/// routing pointer events, so the domain layer can map it to its own objects.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ClientId(pub u64);

bitflags::bitflags! {
    /// Item flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// Item is visible: it is drawn, picked, and contributes to its parent's bounds.
        const VISIBLE = 0b0000_0001;
    }
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Selection state pushed to an [`ItemClient`](crate::ItemClient).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum SelectionState {
    /// Normal rendering.
    #[default]
    Unselected,
    /// Selected by the user.
    Selected,
    /// Being modified interactively.
    Updating,
    /// About to be deleted.
    Erasing,
}
