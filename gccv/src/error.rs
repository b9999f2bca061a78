// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by structural operations on the canvas.
//!
//! Geometry queries never fail: degenerate shapes produce sentinel values
//! (zero-area bounds, infinite distances). Only operations that change the
//! shape of the tree can be asked to do something impossible.

use crate::types::ItemId;

/// Structural misuse of the item tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The handle refers to an item that has been removed.
    #[error("item {0:?} is not alive")]
    StaleItem(ItemId),
    /// The handle refers to an item that cannot hold children.
    #[error("item {0:?} is not a group")]
    NotAGroup(ItemId),
    /// The operation would make an item its own ancestor.
    #[error("moving {item:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Item being moved.
        item: ItemId,
        /// Requested new parent.
        parent: ItemId,
    },
    /// The root group cannot be moved or removed.
    #[error("the root group cannot be detached")]
    RootItem,
}
