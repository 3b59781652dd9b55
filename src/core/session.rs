//! Session-scoped selection state.
//!
//! A [`SelectionSession`] owns everything one user interacting with the wheel
//! touches: their position, the current sectors, the last pick and their
//! saved lists. Front-ends drive it; nothing here renders or sleeps.

use crate::core::{
    catalog::Catalog,
    filters::exclude_previous,
    picker::{Pick, Picker},
    rng::RandomSource,
    wheel::SpinPlan,
};
use crate::models::{Candidate, Coordinates, FavoriteEntry, FilterCriteria, HistoryEntry, HistoryRow};
use crate::services::storage::{KeyValueStore, SavedLists};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors that can occur when spinning
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpinError {
    #[error("The wheel is already spinning")]
    AlreadySpinning,
}

/// History sizes for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Entries kept in storage
    pub history_limit: usize,
    /// Entries shown to the user
    pub history_display: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            history_limit: 50,
            history_display: 20,
        }
    }
}

pub struct SelectionSession<S: KeyValueStore> {
    id: Uuid,
    picker: Picker,
    lists: SavedLists<S>,
    limits: SessionLimits,
    origin: Option<Coordinates>,
    /// Filtered wheel before the previous pick is taken out
    base: Vec<Candidate>,
    sectors: Vec<Candidate>,
    fell_back: bool,
    last_pick: Option<Candidate>,
    current_pick: Option<Candidate>,
    wheel_angle: f64,
    pending: Option<SpinPlan>,
}

impl<S: KeyValueStore> SelectionSession<S> {
    /// Start a session, loading saved lists from `store`
    pub fn new(picker: Picker, store: S, limits: SessionLimits) -> Self {
        let lists = SavedLists::load(store, limits.history_limit);
        let id = Uuid::new_v4();
        info!(
            "Session {} started ({} favorites, {} history entries)",
            id,
            lists.favorites().len(),
            lists.history().len()
        );

        let mut session = Self {
            id,
            picker,
            lists,
            limits,
            origin: None,
            base: Vec::new(),
            sectors: Vec::new(),
            fell_back: false,
            last_pick: None,
            current_pick: None,
            wheel_angle: 0.0,
            pending: None,
        };
        session.browse(&FilterCriteria::default());
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        self.picker.catalog()
    }

    pub fn origin(&self) -> Option<Coordinates> {
        self.origin
    }

    pub fn set_location(&mut self, origin: Coordinates) {
        debug!("Session {} location set to {:?}", self.id, origin);
        self.origin = Some(origin);
    }

    pub fn clear_location(&mut self) {
        self.origin = None;
    }

    /// Current wheel sectors
    pub fn sectors(&self) -> &[Candidate] {
        &self.sectors
    }

    /// Whether the last browse ignored the filters because nothing matched
    pub fn fell_back(&self) -> bool {
        self.fell_back
    }

    pub fn is_spinning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_pick(&self) -> Option<&Candidate> {
        self.last_pick.as_ref()
    }

    pub fn current_pick(&self) -> Option<&Candidate> {
        self.current_pick.as_ref()
    }

    pub fn wheel_angle(&self) -> f64 {
        self.wheel_angle
    }

    /// Recompute the wheel for `criteria`
    pub fn browse(&mut self, criteria: &FilterCriteria) -> &[Candidate] {
        let set = self.picker.candidate_set(criteria, self.origin, None);
        self.base = set.sectors;
        self.fell_back = set.fell_back;
        self.exclude_last_pick();
        &self.sectors
    }

    fn exclude_last_pick(&mut self) {
        let previous = self.last_pick.as_ref().map(|c| c.id());
        self.sectors = exclude_previous(self.base.clone(), previous);
    }

    /// Rebuild the wheel for `criteria` and spin it
    pub fn spin<R: RandomSource + ?Sized>(
        &mut self,
        criteria: &FilterCriteria,
        rng: &mut R,
    ) -> Result<Option<Pick>, SpinError> {
        if self.is_spinning() {
            return Err(SpinError::AlreadySpinning);
        }
        self.browse(criteria);
        self.respin(rng)
    }

    /// Spin the current filters again without rebuilding them
    ///
    /// The last pick is taken off the wheel first, unless it is the only
    /// sector. The pick is recorded immediately; call [`settle`](Self::settle) once
    /// the animation is over to accept the next spin.
    pub fn respin<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<Option<Pick>, SpinError> {
        if self.is_spinning() {
            return Err(SpinError::AlreadySpinning);
        }
        self.exclude_last_pick();

        let Some(pick) = self.picker.pick(&self.sectors, self.wheel_angle, rng) else {
            debug!("Session {} has nothing to spin", self.id);
            return Ok(None);
        };

        self.pending = Some(pick.plan);
        self.record_pick(&pick.chosen);

        info!(
            "Session {} picked {} ({}) from {} sectors",
            self.id,
            pick.chosen.restaurant.name,
            pick.chosen.distance_label(),
            pick.sectors
        );
        Ok(Some(pick))
    }

    /// Finish the running animation
    pub fn settle(&mut self) {
        if let Some(plan) = self.pending.take() {
            self.wheel_angle = plan.resting_angle();
        }
    }

    fn record_pick(&mut self, chosen: &Candidate) {
        self.last_pick = Some(chosen.clone());
        self.current_pick = Some(chosen.clone());
        if let Err(e) = self.lists.record_history(HistoryEntry::now(&chosen.restaurant)) {
            warn!("Session {} could not persist history: {}", self.id, e);
        }
    }

    /// Save the current pick. Returns false when there is none or it is already saved.
    pub fn save_current(&mut self) -> bool {
        let Some(entry) = self.current_pick.as_ref().map(|c| FavoriteEntry::from(&c.restaurant)) else {
            return false;
        };
        self.save_favorite(entry)
    }

    /// Save a catalog restaurant by id. Returns false for unknown or already saved ids.
    pub fn add_favorite(&mut self, id: &str) -> bool {
        let Some(entry) = self.picker.catalog().find(id).map(FavoriteEntry::from) else {
            return false;
        };
        self.save_favorite(entry)
    }

    fn save_favorite(&mut self, entry: FavoriteEntry) -> bool {
        let id = entry.id.clone();
        match self.lists.add_favorite(entry) {
            Ok(added) => added,
            Err(e) => {
                warn!("Session {} could not persist favorite {}: {}", self.id, id, e);
                // The in-memory list took the entry before the write failed
                self.lists.is_favorite(&id)
            }
        }
    }

    pub fn remove_favorite(&mut self, id: &str) -> bool {
        match self.lists.remove_favorite(id) {
            Ok(removed) => removed,
            Err(e) => {
                warn!("Session {} could not persist favorites: {}", self.id, e);
                !self.lists.is_favorite(id)
            }
        }
    }

    pub fn favorites(&self) -> &[FavoriteEntry] {
        self.lists.favorites()
    }

    /// Full stored history, most recent first
    pub fn history(&self) -> &[HistoryEntry] {
        self.lists.history()
    }

    /// Most recent history rows, resolved against the catalog
    pub fn recent_history(&self) -> Vec<HistoryRow> {
        self.lists
            .history()
            .iter()
            .take(self.limits.history_display)
            .map(|h| match self.picker.catalog().find(&h.id) {
                Some(r) => HistoryRow {
                    id: h.id.clone(),
                    name: r.name.clone(),
                    cuisine: Some(r.cuisine.clone()),
                    rating: Some(r.rating),
                    at: h.at,
                },
                None => HistoryRow {
                    id: h.id.clone(),
                    name: h.name.clone(),
                    cuisine: None,
                    rating: None,
                    at: h.at,
                },
            })
            .collect()
    }
}
