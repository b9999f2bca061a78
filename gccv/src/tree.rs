// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item storage and the tree protocol: structure edits, lazy bounds, repaint
//! requests, and hit distances.
//!
//! Bounds are cached per item. A cache is either fresh or stale; geometry
//! edits and child changes mark it stale up the parent chain, and the next
//! bounds query or invalidation recomputes only the stale part of the tree.

use alloc::vec::Vec;
use core::mem;
use kurbo::{Point, Rect, Vec2};
use peniko::{BlendMode, Compose, Mix};

use crate::canvas::Canvas;
use crate::error::SceneError;
use crate::shapes::{Group, Shape};
use crate::types::{ClientId, ItemFlags, ItemId};

/// Composition used when an item does not ask for anything else.
pub(crate) fn normal_blend() -> BlendMode {
    BlendMode::new(Mix::Normal, Compose::SrcOver)
}

#[derive(Clone, Debug)]
pub(crate) struct Item {
    generation: u32,
    pub(crate) parent: Option<ItemId>,
    pub(crate) client: Option<ClientId>,
    pub(crate) flags: ItemFlags,
    pub(crate) operator: BlendMode,
    /// Last computed extent, kept after the cache goes stale. `None` until
    /// the first computation.
    pub(crate) extent: Option<Rect>,
    pub(crate) cached: bool,
    pub(crate) shape: Shape,
}

impl Item {
    pub(crate) fn new(generation: u32, parent: Option<ItemId>, shape: Shape) -> Self {
        Self {
            generation,
            parent,
            client: None,
            flags: ItemFlags::default(),
            operator: normal_blend(),
            extent: None,
            cached: false,
            shape,
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.flags.contains(ItemFlags::VISIBLE)
    }
}

/// Slot storage with generational handles.
#[derive(Clone, Debug, Default)]
pub(crate) struct Arena {
    slots: Vec<Option<Item>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl Arena {
    pub(crate) fn alloc(&mut self, parent: Option<ItemId>, shape: Shape) -> ItemId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Item::new(generation, parent, shape));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ItemId uses 32-bit indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Item::new(generation, parent, shape)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ItemId uses 32-bit indices."
            )]
            ((self.slots.len() - 1) as u32, generation)
        };
        ItemId::new(idx, generation)
    }

    pub(crate) fn free(&mut self, id: ItemId) {
        if self.get(id).is_some() {
            self.slots[id.idx()] = None;
            self.free_list.push(id.idx());
        }
    }

    pub(crate) fn get(&self, id: ItemId) -> Option<&Item> {
        let item = self.slots.get(id.idx())?.as_ref()?;
        (item.generation == id.generation()).then_some(item)
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        let item = self.slots.get_mut(id.idx())?.as_mut()?;
        (item.generation == id.generation()).then_some(item)
    }

    pub(crate) fn alive(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

fn children(shape: &Shape) -> &[ItemId] {
    match shape.as_group() {
        Some(group) => group.children(),
        None => &[],
    }
}

impl Canvas {
    // --- structure ---

    /// Returns true if `id` refers to a live item.
    pub fn is_alive(&self, id: ItemId) -> bool {
        self.items.get(id).is_some()
    }

    /// Number of live items, the root included.
    pub fn item_count(&self) -> usize {
        self.items.alive()
    }

    /// True if the root group has no children.
    pub fn is_empty(&self) -> bool {
        self.children_of(self.root).is_empty()
    }

    /// Add `shape` as the newest child of `parent` (the root group if `None`).
    ///
    /// The new item starts visible with a stale bounds cache, and its
    /// footprint is scheduled for repaint. A group always starts empty: child
    /// handles carried by a cloned [`Group`] are dropped.
    pub fn insert(
        &mut self,
        parent: Option<ItemId>,
        shape: impl Into<Shape>,
    ) -> Result<ItemId, SceneError> {
        let parent = parent.unwrap_or(self.root);
        let Some(p) = self.items.get(parent) else {
            tracing::warn!(?parent, "insert under a removed item");
            return Err(SceneError::StaleItem(parent));
        };
        if !p.shape.is_group() {
            tracing::warn!(?parent, "insert under a non-group item");
            return Err(SceneError::NotAGroup(parent));
        }
        let mut shape = shape.into();
        match &mut shape {
            Shape::Text(text) => text.relayout(&*self.layout),
            Shape::Group(group) => group.children.clear(),
            _ => {}
        }
        let kind = shape.kind_name();
        let id = self.items.alloc(Some(parent), shape);
        if let Some(group) = self
            .items
            .get_mut(parent)
            .and_then(|p| p.shape.as_group_mut())
        {
            group.children.push(id);
        }
        self.bounds_changed(parent);
        tracing::debug!(?id, ?parent, kind, "item inserted");
        self.invalidate(id);
        Ok(id)
    }

    /// Remove `id` and everything below it.
    ///
    /// The item's footprint is repainted once; descendants are released
    /// without further repaint requests.
    pub fn remove(&mut self, id: ItemId) -> Result<(), SceneError> {
        if id == self.root {
            tracing::warn!("refusing to remove the root group");
            return Err(SceneError::RootItem);
        }
        if !self.is_alive(id) {
            return Err(SceneError::StaleItem(id));
        }
        self.invalidate(id);
        self.destroy(id);
        tracing::debug!(?id, "item removed");
        Ok(())
    }

    /// Remove every child of the root group.
    pub fn clear(&mut self) {
        self.invalidate(self.root);
        self.destroy_children(self.root);
        self.bounds_changed(self.root);
        tracing::debug!("canvas cleared");
    }

    fn destroy(&mut self, id: ItemId) {
        self.destroy_children(id);
        if let Some(parent) = self.items.get(id).and_then(|item| item.parent) {
            if let Some(group) = self
                .items
                .get_mut(parent)
                .and_then(|p| p.shape.as_group_mut())
            {
                group.remove_child(id);
            }
            self.bounds_changed(parent);
        }
        self.items.free(id);
    }

    fn destroy_children(&mut self, id: ItemId) {
        let kids = self
            .items
            .get_mut(id)
            .and_then(|item| item.shape.as_group_mut())
            .map(|group| mem::take(&mut group.children))
            .unwrap_or_default();
        for child in kids {
            // Only release what is actually parented here.
            if self.parent_of(child) == Some(id) {
                self.destroy(child);
            }
        }
    }

    /// Move `id` under `new_parent` (the root group if `None`), as its newest child.
    pub fn reparent(&mut self, id: ItemId, new_parent: Option<ItemId>) -> Result<(), SceneError> {
        let new_parent = new_parent.unwrap_or(self.root);
        if id == self.root {
            return Err(SceneError::RootItem);
        }
        if !self.is_alive(id) {
            return Err(SceneError::StaleItem(id));
        }
        let Some(p) = self.items.get(new_parent) else {
            return Err(SceneError::StaleItem(new_parent));
        };
        if !p.shape.is_group() {
            return Err(SceneError::NotAGroup(new_parent));
        }
        let mut cursor = Some(new_parent);
        while let Some(ancestor) = cursor {
            if ancestor == id {
                tracing::warn!(?id, ?new_parent, "reparent would create a cycle");
                return Err(SceneError::Cycle {
                    item: id,
                    parent: new_parent,
                });
            }
            cursor = self.parent_of(ancestor);
        }
        self.invalidate(id);
        if let Some(old) = self.parent_of(id) {
            if let Some(group) = self.items.get_mut(old).and_then(|p| p.shape.as_group_mut()) {
                group.remove_child(id);
            }
            self.bounds_changed(old);
        }
        if let Some(group) = self
            .items
            .get_mut(new_parent)
            .and_then(|p| p.shape.as_group_mut())
        {
            group.children.push(id);
        }
        if let Some(item) = self.items.get_mut(id) {
            item.parent = Some(new_parent);
        }
        self.bounds_changed(new_parent);
        self.invalidate(id);
        tracing::debug!(?id, ?new_parent, "item reparented");
        Ok(())
    }

    /// Draw `id` above its siblings and let it win hit-test ties.
    pub fn raise_to_top(&mut self, id: ItemId) -> Result<(), SceneError> {
        self.restack(id, true)
    }

    /// Draw `id` below its siblings.
    pub fn lower_to_bottom(&mut self, id: ItemId) -> Result<(), SceneError> {
        self.restack(id, false)
    }

    fn restack(&mut self, id: ItemId, top: bool) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootItem);
        }
        let Some(parent) = self.items.get(id).and_then(|item| item.parent) else {
            return Err(SceneError::StaleItem(id));
        };
        if let Some(group) = self
            .items
            .get_mut(parent)
            .and_then(|p| p.shape.as_group_mut())
        {
            group.remove_child(id);
            if top {
                group.children.push(id);
            } else {
                group.children.insert(0, id);
            }
        }
        self.invalidate(id);
        Ok(())
    }

    /// The root group every other item descends from.
    pub fn root(&self) -> ItemId {
        self.root
    }

    /// Parent group of `id`; `None` for the root and for removed items.
    pub fn parent_of(&self, id: ItemId) -> Option<ItemId> {
        self.items.get(id)?.parent
    }

    /// Children of a group, oldest first. Empty for leaves and removed items.
    pub fn children_of(&self, id: ItemId) -> &[ItemId] {
        match self.items.get(id) {
            Some(item) => children(&item.shape),
            None => &[],
        }
    }

    /// Geometry and style of `id`.
    pub fn shape(&self, id: ItemId) -> Option<&Shape> {
        self.items.get(id).map(|item| &item.shape)
    }

    /// Associate a domain object with `id`, or clear the association.
    pub fn set_client(&mut self, id: ItemId, client: Option<ClientId>) {
        if let Some(item) = self.items.get_mut(id) {
            item.client = client;
        }
    }

    /// Domain object associated with `id`.
    pub fn client_of(&self, id: ItemId) -> Option<ClientId> {
        self.items.get(id)?.client
    }

    /// Composition operator of `id`.
    pub fn operator(&self, id: ItemId) -> Option<BlendMode> {
        self.items.get(id).map(|item| item.operator)
    }

    /// Change how `id` composites over what is below it.
    pub fn set_operator(&mut self, id: ItemId, operator: BlendMode) {
        if let Some(item) = self.items.get_mut(id) {
            item.operator = operator;
            self.invalidate(id);
        }
    }

    // --- geometry edits ---

    /// Mutate the shape of `id`.
    ///
    /// The old footprint is repainted, `f` runs, text is re-measured, the
    /// bounds cache is marked stale up the parent chain, and the new footprint
    /// is repainted. Returns `None` if `id` is not alive.
    ///
    /// Children belong to the tree, not to the shape: `f` sees a group with an
    /// empty child list, and the children are reattached afterwards. A group
    /// replaced by a leaf is restored, keeping its offset. A leaf replaced by
    /// a group gets an empty one.
    pub fn edit<R>(&mut self, id: ItemId, f: impl FnOnce(&mut Shape) -> R) -> Option<R> {
        if !self.is_alive(id) {
            return None;
        }
        self.invalidate(id);
        let layout = &*self.layout;
        let item = self.items.get_mut(id)?;
        let detached = item
            .shape
            .as_group_mut()
            .map(|group| (mem::take(&mut group.children), group.offset));
        let result = f(&mut item.shape);
        if let Some((children, offset)) = detached {
            if let Some(group) = item.shape.as_group_mut() {
                group.children = children;
            } else {
                tracing::warn!(?id, "edit turned a group into a leaf; shape restored");
                item.shape = Group { children, offset }.into();
            }
        } else if let Some(group) = item.shape.as_group_mut() {
            group.children.clear();
        }
        if let Shape::Text(text) = &mut item.shape {
            text.relayout(layout);
        }
        self.bounds_changed(id);
        self.invalidate(id);
        Some(result)
    }

    /// Translate `id`. Groups forward the translation to every descendant.
    pub fn move_item(&mut self, id: ItemId, delta: Vec2) {
        if !self.is_alive(id) {
            return;
        }
        self.invalidate(id);
        self.translate_subtree(id, delta);
        self.bounds_changed(id);
        self.invalidate(id);
    }

    fn translate_subtree(&mut self, id: ItemId, delta: Vec2) {
        let Some(item) = self.items.get_mut(id) else {
            return;
        };
        item.cached = false;
        item.shape.translate(delta);
        let kids = children(&item.shape).to_vec();
        for child in kids {
            self.translate_subtree(child, delta);
        }
    }

    /// Show or hide `id`.
    ///
    /// The last computed footprint is repainted without recomputing it, since
    /// a hidden item stops contributing to its parent's bounds.
    pub fn set_visible(&mut self, id: ItemId, visible: bool) {
        let Some(item) = self.items.get_mut(id) else {
            return;
        };
        if item.is_visible() == visible {
            return;
        }
        item.flags.set(ItemFlags::VISIBLE, visible);
        let (last, parent, cached) = (item.extent, item.parent, item.cached);
        if let Some(rect) = last {
            let rect = self.to_canvas_space(id, rect);
            self.invalidate_rect(rect);
        }
        if let Some(parent) = parent {
            self.bounds_changed(parent);
        }
        if visible && !cached {
            self.invalidate(id);
        }
    }

    /// True if `id` is alive and drawn.
    pub fn is_visible(&self, id: ItemId) -> bool {
        self.items.get(id).is_some_and(Item::is_visible)
    }

    // --- bounds ---

    /// Bounds of `id` in its parent's coordinates, recomputed first if stale.
    ///
    /// Empty groups and removed items report [`Rect::ZERO`].
    pub fn bounds(&mut self, id: ItemId) -> Rect {
        self.refresh(id).unwrap_or(Rect::ZERO)
    }

    /// Cached bounds of `id` if the cache is fresh, without recomputing.
    pub fn cached_bounds(&self, id: ItemId) -> Option<Rect> {
        let item = self.items.get(id)?;
        item.cached.then(|| item.extent.unwrap_or(Rect::ZERO))
    }

    /// True if the bounds cache of `id` is fresh.
    pub fn is_bounds_cached(&self, id: ItemId) -> bool {
        self.items.get(id).is_some_and(|item| item.cached)
    }

    /// Mark the bounds of `id` and all its ancestors stale.
    pub(crate) fn bounds_changed(&mut self, id: ItemId) {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(item) = self.items.get_mut(current) else {
                break;
            };
            item.cached = false;
            cursor = item.parent;
        }
    }

    /// Recompute stale bounds below and including `id`.
    fn refresh(&mut self, id: ItemId) -> Option<Rect> {
        let item = self.items.get(id)?;
        if item.cached {
            return item.extent;
        }
        let extent = match item.shape.leaf_bounds() {
            Some(rect) => Some(rect),
            None => {
                let offset = item.shape.as_group().map_or(Vec2::ZERO, |g| g.offset);
                let kids = children(&item.shape).to_vec();
                let mut union: Option<Rect> = None;
                for child in kids {
                    if !self.is_visible(child) {
                        continue;
                    }
                    if let Some(rect) = self.refresh(child) {
                        union = Some(union.map_or(rect, |u| u.union(rect)));
                    }
                }
                // An empty group is a zero-size box at the origin.
                Some(union.map_or(Rect::ZERO, |u| u + offset))
            }
        };
        let item = self.items.get_mut(id)?;
        item.extent = extent;
        item.cached = true;
        tracing::trace!(?id, ?extent, "bounds recomputed");
        extent
    }

    /// Map `rect` from the coordinates of `id`'s parent to canvas coordinates,
    /// applying each enclosing group's offset.
    fn to_canvas_space(&self, id: ItemId, mut rect: Rect) -> Rect {
        let mut cursor = self.parent_of(id);
        while let Some(ancestor) = cursor {
            if let Some(group) = self.shape(ancestor).and_then(Shape::as_group) {
                rect = group.adjust_bounds(rect);
            }
            cursor = self.parent_of(ancestor);
        }
        rect
    }

    /// Schedule a repaint of the footprint of `id`, recomputing its bounds first
    /// if needed. Removed items and zero-area footprints schedule nothing.
    pub fn invalidate(&mut self, id: ItemId) {
        let Some(rect) = self.refresh(id) else {
            return;
        };
        let rect = self.to_canvas_space(id, rect);
        self.invalidate_rect(rect);
    }

    // --- hit testing ---

    /// Distance from `pt` (in the coordinates of `id`'s parent) to `id`, with
    /// the candidate item.
    ///
    /// Leaves report themselves. Groups report the visible direct child with
    /// the smallest distance; among equal distances the newest child wins.
    /// Hidden items and empty groups are infinitely far with no candidate.
    pub fn distance(&self, id: ItemId, pt: Point) -> (f64, Option<ItemId>) {
        let Some(item) = self.items.get(id) else {
            return (f64::INFINITY, None);
        };
        if !item.is_visible() {
            return (f64::INFINITY, None);
        }
        let Some(group) = item.shape.as_group() else {
            let d = item.shape.leaf_distance(pt);
            return (d, d.is_finite().then_some(id));
        };
        let local = pt - group.offset;
        let mut best = (f64::INFINITY, None);
        for &child in group.children.iter().rev() {
            let (d, _) = self.distance(child, local);
            if d < best.0 {
                best = (d, Some(child));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Group, Line, Rectangle};

    fn circle(x: f64, r: f64) -> Circle {
        let mut c = Circle::new((x, 0.0), r);
        c.line.width = 0.0;
        c
    }

    #[test]
    fn empty_group_bounds_are_zero() {
        let mut canvas = Canvas::new();
        let g = canvas.insert(None, Group::new()).unwrap();
        assert_eq!(canvas.bounds(g), Rect::ZERO);
        assert_eq!(canvas.bounds(canvas.root()), Rect::ZERO);
    }

    #[test]
    fn group_bounds_are_the_union_of_children() {
        let mut canvas = Canvas::new();
        let g = canvas.insert(None, Group::new()).unwrap();
        canvas.insert(Some(g), circle(0.0, 5.0)).unwrap();
        canvas.insert(Some(g), circle(20.0, 5.0)).unwrap();
        assert_eq!(canvas.bounds(g), Rect::new(-5.0, -5.0, 25.0, 5.0));
    }

    #[test]
    fn cache_goes_stale_up_the_chain_and_refreshes_lazily() {
        let mut canvas = Canvas::new();
        let g = canvas.insert(None, Group::new()).unwrap();
        let c = canvas.insert(Some(g), circle(0.0, 5.0)).unwrap();
        let root = canvas.root();
        canvas.bounds(root);
        assert!(canvas.is_bounds_cached(c) && canvas.is_bounds_cached(g));

        canvas.bounds_changed(c);
        assert!(!canvas.is_bounds_cached(c));
        assert!(!canvas.is_bounds_cached(g));
        assert!(!canvas.is_bounds_cached(root));
        assert_eq!(canvas.cached_bounds(g), None);

        assert_eq!(canvas.bounds(root), Rect::new(-5.0, -5.0, 5.0, 5.0));
        assert!(canvas.is_bounds_cached(c));
    }

    #[test]
    fn edit_refreshes_bounds_on_next_query() {
        let mut canvas = Canvas::new();
        let c = canvas.insert(None, circle(0.0, 5.0)).unwrap();
        canvas.edit(c, |shape| {
            if let Shape::Circle(c) = shape {
                c.radius = 8.0;
            }
        });
        assert_eq!(canvas.bounds(c), Rect::new(-8.0, -8.0, 8.0, 8.0));
    }

    #[test]
    fn hidden_children_leave_the_union() {
        let mut canvas = Canvas::new();
        let a = canvas.insert(None, circle(0.0, 5.0)).unwrap();
        canvas.insert(None, circle(20.0, 5.0)).unwrap();
        let root = canvas.root();
        assert_eq!(canvas.bounds(root), Rect::new(-5.0, -5.0, 25.0, 5.0));
        canvas.set_visible(a, false);
        assert_eq!(canvas.bounds(root), Rect::new(15.0, -5.0, 25.0, 5.0));
        assert_eq!(canvas.distance(a, Point::ZERO), (f64::INFINITY, None));
    }

    #[test]
    fn group_distance_reports_the_nearest_child() {
        let mut canvas = Canvas::new();
        let a = canvas.insert(None, circle(0.0, 5.0)).unwrap();
        let b = canvas.insert(None, circle(20.0, 5.0)).unwrap();
        let root = canvas.root();
        assert_eq!(canvas.distance(root, Point::new(12.0, 0.0)), (3.0, Some(b)));
        assert_eq!(canvas.distance(root, Point::new(8.0, 0.0)), (3.0, Some(a)));
        // Equidistant: the newest child wins.
        assert_eq!(canvas.distance(root, Point::new(10.0, 0.0)), (5.0, Some(b)));
    }

    #[test]
    fn group_offset_shifts_bounds_and_hits() {
        let mut canvas = Canvas::new();
        let g = canvas
            .insert(None, Group::with_offset(Vec2::new(100.0, 0.0)))
            .unwrap();
        let c = canvas.insert(Some(g), circle(0.0, 5.0)).unwrap();
        assert_eq!(canvas.bounds(c), Rect::new(-5.0, -5.0, 5.0, 5.0));
        assert_eq!(canvas.bounds(g), Rect::new(95.0, -5.0, 105.0, 5.0));
        assert_eq!(canvas.distance(g, Point::new(100.0, 0.0)).1, Some(c));
    }

    #[test]
    fn remove_releases_the_subtree() {
        let mut canvas = Canvas::new();
        let g = canvas.insert(None, Group::new()).unwrap();
        let inner = canvas.insert(Some(g), Group::new()).unwrap();
        let leaf = canvas.insert(Some(inner), circle(0.0, 1.0)).unwrap();
        let before = canvas.item_count();
        canvas.remove(g).unwrap();
        assert!(!canvas.is_alive(g) && !canvas.is_alive(inner) && !canvas.is_alive(leaf));
        assert_eq!(canvas.item_count(), before - 3);
        assert!(canvas.is_empty());
        assert_eq!(canvas.remove(g), Err(SceneError::StaleItem(g)));
        assert_eq!(canvas.remove(canvas.root()), Err(SceneError::RootItem));
    }

    #[test]
    fn slots_are_reused_with_a_new_generation() {
        let mut canvas = Canvas::new();
        let a = canvas.insert(None, circle(0.0, 1.0)).unwrap();
        canvas.remove(a).unwrap();
        let b = canvas.insert(None, circle(0.0, 1.0)).unwrap();
        assert_eq!(a.idx(), b.idx());
        assert_ne!(a, b);
        assert!(!canvas.is_alive(a));
        assert!(canvas.shape(a).is_none());
    }

    #[test]
    fn insert_rejects_leaves_and_stale_parents() {
        let mut canvas = Canvas::new();
        let leaf = canvas.insert(None, Line::new((0.0, 0.0), (1.0, 1.0))).unwrap();
        assert_eq!(
            canvas.insert(Some(leaf), circle(0.0, 1.0)),
            Err(SceneError::NotAGroup(leaf))
        );
        canvas.remove(leaf).unwrap();
        assert_eq!(
            canvas.insert(Some(leaf), circle(0.0, 1.0)),
            Err(SceneError::StaleItem(leaf))
        );
    }

    #[test]
    fn reparent_moves_and_refuses_cycles() {
        let mut canvas = Canvas::new();
        let outer = canvas.insert(None, Group::new()).unwrap();
        let inner = canvas.insert(Some(outer), Group::new()).unwrap();
        let r = canvas
            .insert(None, Rectangle::new(0.0, 0.0, 1.0, 1.0))
            .unwrap();
        canvas.reparent(r, Some(inner)).unwrap();
        assert_eq!(canvas.parent_of(r), Some(inner));
        assert!(!canvas.children_of(canvas.root()).contains(&r));
        assert_eq!(
            canvas.reparent(outer, Some(inner)),
            Err(SceneError::Cycle {
                item: outer,
                parent: inner
            })
        );
        assert_eq!(
            canvas.reparent(outer, Some(outer)),
            Err(SceneError::Cycle {
                item: outer,
                parent: outer
            })
        );
    }

    #[test]
    fn restacking_changes_draw_and_tie_order() {
        let mut canvas = Canvas::new();
        let a = canvas.insert(None, circle(0.0, 5.0)).unwrap();
        let b = canvas.insert(None, circle(0.0, 5.0)).unwrap();
        let root = canvas.root();
        assert_eq!(canvas.children_of(root), &[a, b]);
        canvas.raise_to_top(a).unwrap();
        assert_eq!(canvas.children_of(root), &[b, a]);
        assert_eq!(canvas.distance(root, Point::ZERO).1, Some(a));
        canvas.lower_to_bottom(a).unwrap();
        assert_eq!(canvas.children_of(root), &[a, b]);
    }

    #[test]
    fn move_fans_out_to_descendants() {
        let mut canvas = Canvas::new();
        let g = canvas.insert(None, Group::new()).unwrap();
        let c = canvas.insert(Some(g), circle(0.0, 5.0)).unwrap();
        canvas.bounds(g);
        canvas.move_item(g, Vec2::new(10.0, 10.0));
        assert_eq!(canvas.bounds(c), Rect::new(5.0, 5.0, 15.0, 15.0));
        assert_eq!(canvas.bounds(g), Rect::new(5.0, 5.0, 15.0, 15.0));
    }

    #[test]
    fn clients_are_plain_keys() {
        let mut canvas = Canvas::new();
        let c = canvas.insert(None, circle(0.0, 5.0)).unwrap();
        assert_eq!(canvas.client_of(c), None);
        canvas.set_client(c, Some(ClientId(42)));
        assert_eq!(canvas.client_of(c), Some(ClientId(42)));
    }

    #[test]
    fn inserted_group_clones_start_empty() {
        let mut canvas = Canvas::new();
        let g = canvas.insert(None, Group::new()).unwrap();
        let c = canvas.insert(Some(g), circle(0.0, 5.0)).unwrap();
        let copy = canvas.shape(g).cloned().unwrap();
        let twin = canvas.insert(None, copy).unwrap();
        assert!(canvas.children_of(twin).is_empty());
        canvas.remove(twin).unwrap();
        assert!(canvas.is_alive(c));
        assert_eq!(canvas.parent_of(c), Some(g));
        assert_eq!(canvas.children_of(g), &[c]);
    }

    #[test]
    fn removal_skips_children_owned_elsewhere() {
        let mut canvas = Canvas::new();
        let g = canvas.insert(None, Group::new()).unwrap();
        let c = canvas.insert(Some(g), circle(0.0, 5.0)).unwrap();
        let other = canvas.insert(None, Group::new()).unwrap();
        if let Some(group) = canvas
            .items
            .get_mut(other)
            .and_then(|item| item.shape.as_group_mut())
        {
            group.children.push(c);
        }
        canvas.remove(other).unwrap();
        assert!(canvas.is_alive(c));
        assert_eq!(canvas.children_of(g), &[c]);
    }

    #[test]
    fn edit_keeps_group_children_attached() {
        let mut canvas = Canvas::new();
        let g = canvas
            .insert(None, Group::with_offset(Vec2::new(5.0, 0.0)))
            .unwrap();
        let c = canvas.insert(Some(g), circle(0.0, 1.0)).unwrap();

        canvas.edit(g, |shape| *shape = circle(0.0, 3.0).into());
        assert!(canvas.shape(g).is_some_and(Shape::is_group));
        assert_eq!(canvas.children_of(g), &[c]);
        assert_eq!(canvas.bounds(g), Rect::new(4.0, -1.0, 6.0, 1.0));

        canvas.edit(g, |shape| {
            if let Shape::Group(group) = shape {
                assert!(group.children().is_empty(), "children stay with the tree");
                group.offset = Vec2::new(10.0, 0.0);
            }
        });
        assert_eq!(canvas.children_of(g), &[c]);
        assert_eq!(canvas.bounds(g), Rect::new(9.0, -1.0, 11.0, 1.0));

        // A leaf turned into a group copy does not pick up the copy's children.
        let leaf = canvas.insert(None, circle(50.0, 1.0)).unwrap();
        let mut copy = canvas.shape(g).cloned().unwrap();
        if let Shape::Group(group) = &mut copy {
            group.children.push(c);
        }
        canvas.edit(leaf, |shape| *shape = copy);
        assert!(canvas.children_of(leaf).is_empty());

        canvas.remove(g).unwrap();
        assert!(!canvas.is_alive(c));
        assert!(canvas.is_alive(leaf));
    }

    #[test]
    fn empty_child_groups_count_as_the_origin() {
        let mut canvas = Canvas::new();
        let g = canvas.insert(None, Group::new()).unwrap();
        canvas.insert(Some(g), circle(20.0, 5.0)).unwrap();
        let empty = canvas.insert(Some(g), Group::new()).unwrap();
        assert_eq!(canvas.bounds(empty), Rect::ZERO);
        assert_eq!(canvas.bounds(g), Rect::new(0.0, -5.0, 25.0, 5.0));
        canvas.set_visible(empty, false);
        assert_eq!(canvas.bounds(g), Rect::new(15.0, -5.0, 25.0, 5.0));
    }

    #[test]
    fn visibility_repaints_stale_and_fresh_footprints() {
        let mut canvas = Canvas::new();
        let mut square = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        square.line.width = 2.0;
        let r = canvas.insert(None, square).unwrap();
        assert_eq!(canvas.bounds(r), Rect::new(-1.0, -1.0, 11.0, 11.0));

        // Geometry changes without a bounds query leave the cache stale.
        if let Some(item) = canvas.items.get_mut(r) {
            item.shape.translate(Vec2::new(20.0, 0.0));
        }
        canvas.bounds_changed(r);
        canvas.take_damage();

        canvas.set_visible(r, false);
        assert_eq!(
            canvas.take_damage().dirty_rects,
            [Rect::new(0.0, 0.0, 11.0, 11.0)]
        );
        assert!(!canvas.is_bounds_cached(r), "hiding does not recompute");

        canvas.set_visible(r, true);
        assert_eq!(
            canvas.take_damage().dirty_rects,
            [
                Rect::new(0.0, 0.0, 11.0, 11.0),
                Rect::new(19.0, 0.0, 31.0, 11.0)
            ]
        );
        assert_eq!(canvas.cached_bounds(r), Some(Rect::new(19.0, -1.0, 31.0, 11.0)));
    }
}
