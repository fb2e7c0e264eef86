use std::collections::BTreeMap;

use log::debug;

use crate::content::{Content, ContentWarning, Secrets};
use crate::entity::{Item, ItemId, Location, LocationId, Placement};
use crate::error::{CoreError, CoreResult};

/// The world model. Owns all locations and items and tracks where each item is.
///
/// Locations never change after construction. Items only move through
/// [`World::carry`], [`World::place`] and [`World::remove`], so every item is
/// at exactly one location, carried, or nowhere.
#[derive(Debug, Clone)]
pub struct World {
    title: String,
    start: LocationId,
    secrets: Secrets,
    locations: BTreeMap<LocationId, Location>,
    location_order: Vec<LocationId>,
    items: Vec<Item>,
    warnings: Vec<ContentWarning>,
    next_pickup: u32,
}

impl World {
    /// Validate `content` and build a world from it.
    pub fn from_content(mut content: Content) -> CoreResult<Self> {
        let warnings = content.validate()?;

        let location_order = content.locations.iter().map(|l| l.id.clone()).collect();
        let locations = content
            .locations
            .into_iter()
            .map(|l| (l.id.clone(), l))
            .collect();

        let mut items = content.items;
        for item in &mut items {
            item.placement = match &item.starts_at {
                Some(loc) => Placement::At(loc.clone()),
                None => Placement::Nowhere,
            };
        }

        Ok(Self {
            title: content.title,
            start: content.start,
            secrets: content.secrets,
            locations,
            location_order,
            items,
            warnings,
            next_pickup: 0,
        })
    }

    /// The built-in story.
    pub fn embedded() -> CoreResult<Self> {
        Self::from_content(Content::embedded()?)
    }

    /// Story title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Where the player begins.
    pub fn start(&self) -> &LocationId {
        &self.start
    }

    /// Puzzle answers.
    pub fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    /// Problems repaired while loading.
    pub fn warnings(&self) -> &[ContentWarning] {
        &self.warnings
    }

    /// Look up a location.
    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Look up a location, failing if it does not exist.
    pub fn require_location(&self, id: &LocationId) -> CoreResult<&Location> {
        self.location(id)
            .ok_or_else(|| CoreError::UnknownLocation(id.clone()))
    }

    /// All locations in content order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.location_order
            .iter()
            .filter_map(|id| self.locations.get(id))
    }

    /// Look up an item.
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// All items in content order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Items lying at `location`, in content order.
    pub fn items_at<'a>(&'a self, location: &'a LocationId) -> impl Iterator<Item = &'a Item> {
        self.items.iter().filter(move |i| i.is_at(location))
    }

    /// Carried items in pickup order.
    pub fn inventory(&self) -> Vec<&Item> {
        let mut carried: Vec<(u32, &Item)> = self
            .items
            .iter()
            .filter_map(|i| match i.placement() {
                Placement::Carried { order } => Some((*order, i)),
                _ => None,
            })
            .collect();
        carried.sort_by_key(|(order, _)| *order);
        carried.into_iter().map(|(_, i)| i).collect()
    }

    /// Whether the player carries `id`.
    pub fn is_carried(&self, id: &ItemId) -> bool {
        self.item(id).is_some_and(Item::is_carried)
    }

    /// Move an item into the player's inventory. Carrying a carried item keeps its order.
    pub fn carry(&mut self, id: &ItemId) -> CoreResult<()> {
        let order = self.next_pickup;
        let item = self.item_mut(id)?;
        if item.is_carried() {
            return Ok(());
        }
        debug!("item {id}: {:?} -> carried", item.placement);
        item.placement = Placement::Carried { order };
        self.next_pickup += 1;
        Ok(())
    }

    /// Put an item at a location.
    pub fn place(&mut self, id: &ItemId, location: &LocationId) -> CoreResult<()> {
        if !self.locations.contains_key(location) {
            return Err(CoreError::UnknownLocation(location.clone()));
        }
        let item = self.item_mut(id)?;
        debug!("item {id}: {:?} -> {location}", item.placement);
        item.placement = Placement::At(location.clone());
        Ok(())
    }

    /// Take an item out of the world.
    pub fn remove(&mut self, id: &ItemId) -> CoreResult<()> {
        let item = self.item_mut(id)?;
        debug!("item {id}: {:?} -> nowhere", item.placement);
        item.placement = Placement::Nowhere;
        Ok(())
    }

    /// Resolve a movement word from `from`.
    ///
    /// An exit keyword wins; otherwise the word may name an exit's destination.
    pub fn resolve_exit(&self, from: &LocationId, word: &str) -> Option<&LocationId> {
        let exits = &self.location(from)?.exits;
        exits
            .iter()
            .find(|e| e.keyword == word)
            .or_else(|| exits.iter().find(|e| e.to.as_str() == word))
            .map(|e| &e.to)
    }

    fn item_mut(&mut self, id: &ItemId) -> CoreResult<&mut Item> {
        self.items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| CoreError::UnknownItem(id.clone()))
    }
}
