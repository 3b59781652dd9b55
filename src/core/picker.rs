use crate::core::{
    catalog::Catalog,
    filters::{annotate, exclude_previous, filter_with_fallback, order_for_wheel},
    rng::RandomSource,
    wheel::{plan_spin, SpinPlan, WheelTuning},
};
use crate::models::{Candidate, Coordinates, FilterCriteria};
use serde::Serialize;

/// Sectors the next spin may land on
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    pub sectors: Vec<Candidate>,
    /// True when the filters matched nothing and the full list was used
    pub fell_back: bool,
}

/// Outcome of one spin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pick {
    pub chosen: Candidate,
    pub sector: usize,
    pub sectors: usize,
    pub plan: SpinPlan,
}

/// Filter-and-select pipeline
///
/// # Pipeline Stages
/// 1. Distance annotation from the user's position
/// 2. Criteria filtering, with fallback to the full list
/// 3. Previous pick exclusion
/// 4. Wheel ordering
/// 5. Uniform draw over the sectors
#[derive(Debug, Clone)]
pub struct Picker {
    catalog: Catalog,
    tuning: WheelTuning,
}

impl Picker {
    pub fn new(catalog: Catalog, tuning: WheelTuning) -> Self {
        Self { catalog, tuning }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Build the wheel for the given filters, position and previous pick
    pub fn candidate_set(
        &self,
        criteria: &FilterCriteria,
        origin: Option<Coordinates>,
        previous: Option<&str>,
    ) -> CandidateSet {
        let annotated = annotate(self.catalog.all(), origin);
        let outcome = filter_with_fallback(annotated, criteria);
        let mut sectors = exclude_previous(outcome.candidates, previous);
        order_for_wheel(&mut sectors);

        tracing::debug!(
            "Wheel has {} sectors (fell_back: {}, previous: {:?})",
            sectors.len(),
            outcome.fell_back,
            previous
        );

        CandidateSet {
            sectors,
            fell_back: outcome.fell_back,
        }
    }

    /// Draw one sector and plan the animation toward it
    ///
    /// Returns `None` when there is nothing to spin.
    pub fn pick<R: RandomSource + ?Sized>(
        &self,
        sectors: &[Candidate],
        start_angle: f64,
        rng: &mut R,
    ) -> Option<Pick> {
        if sectors.is_empty() {
            return None;
        }

        let sector = rng.next_index(sectors.len());
        let plan = plan_spin(sector, sectors.len(), start_angle, &self.tuning, rng);

        Some(Pick {
            chosen: sectors[sector].clone(),
            sector,
            sectors: sectors.len(),
            plan,
        })
    }
}

impl Default for Picker {
    fn default() -> Self {
        Self::new(Catalog::seeded(), WheelTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{ScriptedRandom, SeededRandom};
    use crate::models::PriceTier;

    #[test]
    fn test_japanese_candidates() {
        let picker = Picker::default();
        let set = picker.candidate_set(&FilterCriteria::default().with_cuisine("Japanese"), None, None);

        assert!(!set.fell_back);
        let ids: Vec<&str> = set.sectors.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["w4", "w10"]);
    }

    #[test]
    fn test_previous_pick_excluded() {
        let picker = Picker::default();
        let set = picker.candidate_set(&FilterCriteria::default(), None, Some("w7"));

        assert_eq!(set.sectors.len(), 11);
        assert!(set.sectors.iter().all(|c| c.id() != "w7"));
    }

    #[test]
    fn test_fallback_then_exclusion() {
        let picker = Picker::default();
        let criteria = FilterCriteria::default().with_price(PriceTier::Luxury);
        let set = picker.candidate_set(&criteria, None, Some("w1"));

        assert!(set.fell_back);
        assert_eq!(set.sectors.len(), 11);
    }

    #[test]
    fn test_pick_uses_drawn_sector() {
        let picker = Picker::default();
        let set = picker.candidate_set(&FilterCriteria::default(), None, None);
        let mut rng = ScriptedRandom::new(vec![3], vec![0.0]);

        let pick = picker.pick(&set.sectors, 0.0, &mut rng).unwrap();
        assert_eq!(pick.sector, 3);
        assert_eq!(pick.sectors, 12);
        assert_eq!(pick.chosen.id(), "w4");
    }

    #[test]
    fn test_pick_on_empty_wheel() {
        let picker = Picker::new(Catalog::new(vec![]), WheelTuning::default());
        let set = picker.candidate_set(&FilterCriteria::default(), None, None);
        assert!(set.sectors.is_empty());
        assert!(picker.pick(&set.sectors, 0.0, &mut SeededRandom::new(1)).is_none());
    }
}
