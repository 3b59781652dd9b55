use crate::core::distance::distance_from;
use crate::models::{Candidate, Coordinates, FilterCriteria, Restaurant};

/// Candidates left after filtering, and whether the filter was dropped
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub candidates: Vec<Candidate>,
    pub fell_back: bool,
}

/// Annotate every restaurant with its distance from `origin`
pub fn annotate(restaurants: &[Restaurant], origin: Option<Coordinates>) -> Vec<Candidate> {
    restaurants
        .iter()
        .map(|r| Candidate {
            restaurant: r.clone(),
            distance_km: distance_from(origin, r),
        })
        .collect()
}

/// Check a candidate against every set field of the criteria
///
/// The radius only rejects candidates whose distance is known.
#[inline]
pub fn matches_criteria(candidate: &Candidate, criteria: &FilterCriteria) -> bool {
    let r = &candidate.restaurant;

    if let Some(cuisine) = &criteria.cuisine {
        if &r.cuisine != cuisine {
            return false;
        }
    }

    if let Some(price) = criteria.price {
        if r.price != price {
            return false;
        }
    }

    if let Some(diet) = &criteria.diet {
        if !r.has_diet(diet) {
            return false;
        }
    }

    if let (Some(radius), Some(distance)) = (criteria.radius_km, candidate.distance_km) {
        if distance > radius {
            return false;
        }
    }

    true
}

/// Filter the annotated list, falling back to all of it when nothing matches
pub fn filter_with_fallback(annotated: Vec<Candidate>, criteria: &FilterCriteria) -> FilterOutcome {
    let retained: Vec<Candidate> = annotated
        .iter()
        .filter(|c| matches_criteria(c, criteria))
        .cloned()
        .collect();

    if retained.is_empty() {
        tracing::debug!("No restaurant matches {:?}, using the full list", criteria);
        FilterOutcome {
            candidates: annotated,
            fell_back: true,
        }
    } else {
        FilterOutcome {
            candidates: retained,
            fell_back: false,
        }
    }
}

/// Drop the previous pick, unless that would leave nothing to spin
pub fn exclude_previous(candidates: Vec<Candidate>, previous: Option<&str>) -> Vec<Candidate> {
    let Some(previous) = previous else {
        return candidates;
    };
    if candidates.len() <= 1 {
        return candidates;
    }

    let remaining: Vec<Candidate> = candidates
        .iter()
        .filter(|c| c.id() != previous)
        .cloned()
        .collect();

    if remaining.is_empty() {
        candidates
    } else {
        remaining
    }
}

/// Order sectors nearest first; unknown distances go last, ties keep catalog order
pub fn order_for_wheel(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::seed_restaurants;
    use crate::models::PriceTier;

    fn names(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.restaurant.name.as_str()).collect()
    }

    #[test]
    fn test_japanese_filter() {
        let annotated = annotate(&seed_restaurants(), None);
        let outcome = filter_with_fallback(annotated, &FilterCriteria::default().with_cuisine("Japanese"));

        assert!(!outcome.fell_back);
        assert_eq!(names(&outcome.candidates), vec!["Gaukel Ramen", "Erb Street Sushi"]);
    }

    #[test]
    fn test_unmatched_price_falls_back() {
        let annotated = annotate(&seed_restaurants(), None);
        let outcome = filter_with_fallback(annotated, &FilterCriteria::default().with_price(PriceTier::Luxury));

        assert!(outcome.fell_back);
        assert_eq!(outcome.candidates.len(), 12);
    }

    #[test]
    fn test_diet_and_price_combined() {
        let annotated = annotate(&seed_restaurants(), None);
        let criteria = FilterCriteria::default()
            .with_diet("halal")
            .with_price(PriceTier::Budget);
        let outcome = filter_with_fallback(annotated, &criteria);

        assert_eq!(names(&outcome.candidates), vec!["University Falafel", "Hespeler Shawarma"]);
    }

    #[test]
    fn test_radius_ignored_without_location() {
        let annotated = annotate(&seed_restaurants(), None);
        let outcome = filter_with_fallback(annotated, &FilterCriteria::default().with_radius(2.0));

        assert!(!outcome.fell_back);
        assert_eq!(outcome.candidates.len(), 12);
    }

    #[test]
    fn test_radius_with_location() {
        let origin = Coordinates::new(43.466, -80.519);
        let annotated = annotate(&seed_restaurants(), Some(origin));
        let outcome = filter_with_fallback(annotated, &FilterCriteria::default().with_radius(2.0));

        assert!(!outcome.fell_back);
        assert!(outcome.candidates.iter().all(|c| c.distance_km.unwrap() <= 2.0));
        assert!(outcome.candidates.iter().any(|c| c.id() == "w1"));
        assert!(outcome.candidates.iter().all(|c| c.id() != "w5"));
    }

    #[test]
    fn test_exclude_previous() {
        let annotated = annotate(&seed_restaurants()[..3], None);

        let out = exclude_previous(annotated.clone(), Some("w2"));
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|c| c.id() != "w2"));

        let out = exclude_previous(annotated.clone(), None);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_exclude_previous_keeps_single_candidate() {
        let single = annotate(&seed_restaurants()[..1], None);
        let out = exclude_previous(single, Some("w1"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id(), "w1");
    }

    #[test]
    fn test_wheel_order_nearest_first_unknown_last() {
        let origin = Coordinates::new(43.466, -80.519);
        let mut annotated = annotate(&seed_restaurants(), Some(origin));
        annotated[1].distance_km = None;
        order_for_wheel(&mut annotated);

        assert_eq!(annotated[0].id(), "w1");
        assert_eq!(annotated.last().unwrap().id(), "w2");
        let known: Vec<f64> = annotated.iter().filter_map(|c| c.distance_km).collect();
        assert!(known.windows(2).all(|w| w[0] <= w[1]));
    }
}
