//! Scalarization of the three raw objective terms.

use good_lp::Expression;

use daytour_core::ObjectiveWeights;

use crate::model::ObjectiveTerms;

/// Compose the cost the backend minimizes.
///
/// A pure linear combination: `travel_weight * Σtravel + crowd_weight *
/// Σcrowd + venues_weight * count`. The caller's sign convention passes
/// through untouched, so the default negative venues weight turns the count
/// term into a reward.
pub(crate) fn compose(weights: &ObjectiveWeights, terms: &ObjectiveTerms) -> Expression {
    weights.travel * terms.travel_minutes.clone()
        + weights.crowd * terms.crowd_exposure.clone()
        + weights.venues * terms.venues_selected.clone()
}
