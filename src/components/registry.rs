//! Component registry: the single owner of every mutable game object.
//!
//! Components live in an `im::OrdMap` keyed by `ComponentId`. Cloning the
//! arena is O(1); the first write after a clone copies only the touched path.
//! Iteration is always in id order, which keeps redaction and hashing
//! deterministic.
//!
//! ## Usage
//!
//! ```
//! use tabletop_engine::components::{ComponentArena, Counter, Deck};
//! use tabletop_engine::core::{Owner, PlayerId, Visibility};
//!
//! let mut arena: ComponentArena<u8> = ComponentArena::new();
//! let draw = arena.register("draw pile", Owner::Shared, Visibility::Hidden, Deck::from_cards([1, 2, 3]));
//! let gold = arena.register("gold", PlayerId::new(0).into(), Visibility::Public, Counter::new(5));
//!
//! assert_eq!(arena.deck(draw).len(), 3);
//! arena.counter_mut(gold).add(2).unwrap();
//! assert_eq!(arena.counter(gold).value(), 7);
//! ```

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::{Counter, Deck, Token, Tracker};
use crate::core::{ComponentId, Owner, Visibility};

/// Kind tag of a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Deck,
    Counter,
    Token,
    Tracker,
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ComponentKind::Deck => "deck",
            ComponentKind::Counter => "counter",
            ComponentKind::Token => "token",
            ComponentKind::Tracker => "tracker",
        };
        f.write_str(name)
    }
}

/// Identity and access metadata shared by every component.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentMeta {
    pub id: ComponentId,
    pub owner: Owner,
    pub visibility: Visibility,
    pub name: String,
}

/// Payload of a component.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentData<C: Clone> {
    Deck(Deck<C>),
    Counter(Counter),
    Token(Token),
    Tracker(Tracker),
}

impl<C: Clone> ComponentData<C> {
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentData::Deck(_) => ComponentKind::Deck,
            ComponentData::Counter(_) => ComponentKind::Counter,
            ComponentData::Token(_) => ComponentKind::Token,
            ComponentData::Tracker(_) => ComponentKind::Tracker,
        }
    }
}

impl<C: Clone> From<Deck<C>> for ComponentData<C> {
    fn from(deck: Deck<C>) -> Self {
        ComponentData::Deck(deck)
    }
}

impl<C: Clone> From<Counter> for ComponentData<C> {
    fn from(counter: Counter) -> Self {
        ComponentData::Counter(counter)
    }
}

impl<C: Clone> From<Token> for ComponentData<C> {
    fn from(token: Token) -> Self {
        ComponentData::Token(token)
    }
}

impl<C: Clone> From<Tracker> for ComponentData<C> {
    fn from(tracker: Tracker) -> Self {
        ComponentData::Tracker(tracker)
    }
}

/// A registered component.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Component<C: Clone> {
    pub meta: ComponentMeta,
    pub data: ComponentData<C>,
}

impl<C: Clone> Component<C> {
    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.meta.id
    }

    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.data.kind()
    }

    /// Is this component a deck whose order `observer` may not see?
    #[must_use]
    pub fn is_hidden_deck_for(&self, observer: crate::core::PlayerId) -> bool {
        matches!(self.data, ComponentData::Deck(_))
            && !self.meta.visibility.visible_to(self.meta.owner.player(), observer)
    }
}

/// Arena of components, keyed by id.
///
/// Ids come from a monotonic counter and are never reused, even after a
/// component is removed. The same counter issues ids for in-progress actions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentArena<C: Clone> {
    components: OrdMap<ComponentId, Component<C>>,
    next_id: u32,
}

impl<C: Clone> Default for ComponentArena<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone> ComponentArena<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: OrdMap::new(),
            next_id: 0,
        }
    }

    /// Issue a fresh id without registering a component.
    pub fn allocate_id(&mut self) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The id the next allocation will return.
    #[must_use]
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Was `id` ever issued by this arena?
    #[must_use]
    pub fn was_issued(&self, id: ComponentId) -> bool {
        id.0 < self.next_id
    }

    /// Register a component and return its id.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        owner: Owner,
        visibility: Visibility,
        data: impl Into<ComponentData<C>>,
    ) -> ComponentId {
        let id = self.allocate_id();
        let meta = ComponentMeta {
            id,
            owner,
            visibility,
            name: name.into(),
        };
        self.components.insert(
            id,
            Component {
                meta,
                data: data.into(),
            },
        );
        id
    }

    /// Remove a component. Its id is not reissued.
    pub fn remove(&mut self, id: ComponentId) -> Option<Component<C>> {
        self.components.remove(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ComponentId) -> Option<&Component<C>> {
        self.components.get(&id)
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component<C>> {
        self.components.get_mut(&id)
    }

    /// Metadata of a registered component.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered.
    #[must_use]
    pub fn meta(&self, id: ComponentId) -> &ComponentMeta {
        &self.lookup(id).meta
    }

    /// Every component in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Component<C>> {
        self.components.values()
    }

    /// Every id in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components.keys().copied()
    }

    fn lookup(&self, id: ComponentId) -> &Component<C> {
        match self.components.get(&id) {
            Some(component) => component,
            None => panic!("{id} is not registered"),
        }
    }

    fn lookup_mut(&mut self, id: ComponentId) -> &mut Component<C> {
        match self.components.get_mut(&id) {
            Some(component) => component,
            None => panic!("{id} is not registered"),
        }
    }

    // === Typed access ===
    //
    // The panicking accessors treat a wrong id or kind as a defect in game
    // code. The `try_` forms return `None` instead.

    #[must_use]
    pub fn try_deck(&self, id: ComponentId) -> Option<&Deck<C>> {
        match &self.components.get(&id)?.data {
            ComponentData::Deck(deck) => Some(deck),
            _ => None,
        }
    }

    #[must_use]
    pub fn try_counter(&self, id: ComponentId) -> Option<&Counter> {
        match &self.components.get(&id)?.data {
            ComponentData::Counter(counter) => Some(counter),
            _ => None,
        }
    }

    #[must_use]
    pub fn try_token(&self, id: ComponentId) -> Option<&Token> {
        match &self.components.get(&id)?.data {
            ComponentData::Token(token) => Some(token),
            _ => None,
        }
    }

    #[must_use]
    pub fn try_tracker(&self, id: ComponentId) -> Option<&Tracker> {
        match &self.components.get(&id)?.data {
            ComponentData::Tracker(tracker) => Some(tracker),
            _ => None,
        }
    }

    /// # Panics
    ///
    /// Panics if `id` is not a registered deck.
    #[must_use]
    pub fn deck(&self, id: ComponentId) -> &Deck<C> {
        match &self.lookup(id).data {
            ComponentData::Deck(deck) => deck,
            other => panic!("{id} is a {}, not a deck", other.kind()),
        }
    }

    pub fn deck_mut(&mut self, id: ComponentId) -> &mut Deck<C> {
        match &mut self.lookup_mut(id).data {
            ComponentData::Deck(deck) => deck,
            other => panic!("{id} is a {}, not a deck", other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics if `id` is not a registered counter.
    #[must_use]
    pub fn counter(&self, id: ComponentId) -> &Counter {
        match &self.lookup(id).data {
            ComponentData::Counter(counter) => counter,
            other => panic!("{id} is a {}, not a counter", other.kind()),
        }
    }

    pub fn counter_mut(&mut self, id: ComponentId) -> &mut Counter {
        match &mut self.lookup_mut(id).data {
            ComponentData::Counter(counter) => counter,
            other => panic!("{id} is a {}, not a counter", other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics if `id` is not a registered token.
    #[must_use]
    pub fn token(&self, id: ComponentId) -> &Token {
        match &self.lookup(id).data {
            ComponentData::Token(token) => token,
            other => panic!("{id} is a {}, not a token", other.kind()),
        }
    }

    pub fn token_mut(&mut self, id: ComponentId) -> &mut Token {
        match &mut self.lookup_mut(id).data {
            ComponentData::Token(token) => token,
            other => panic!("{id} is a {}, not a token", other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics if `id` is not a registered tracker.
    #[must_use]
    pub fn tracker(&self, id: ComponentId) -> &Tracker {
        match &self.lookup(id).data {
            ComponentData::Tracker(tracker) => tracker,
            other => panic!("{id} is a {}, not a tracker", other.kind()),
        }
    }

    pub fn tracker_mut(&mut self, id: ComponentId) -> &mut Tracker {
        match &mut self.lookup_mut(id).data {
            ComponentData::Tracker(tracker) => tracker,
            other => panic!("{id} is a {}, not a tracker", other.kind()),
        }
    }
}
