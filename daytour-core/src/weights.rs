//! The three-objective weight vector and its sign convention.

/// Scalarization weights for the three itinerary objectives.
///
/// The composed cost is the plain linear combination
/// `travel * Σtravel_minutes + crowd * Σcrowd_exposure + venues * count`,
/// minimized as-is. Every field therefore carries the same sign convention:
/// a **positive** weight penalizes (minimizes) its quantity and a
/// **negative** weight rewards (effectively maximizes) it. Nothing in the
/// engine flips signs on the caller's behalf, so rewarding a higher venue
/// count means passing a negative `venues` weight, as the default does.
///
/// # Examples
/// ```rust
/// use daytour_core::ObjectiveWeights;
///
/// let weights = ObjectiveWeights {
///     crowd: 0.0, // indifferent to crowds
///     ..ObjectiveWeights::default()
/// };
/// assert!(weights.venues < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveWeights {
    /// Weight on total inter-visit travel minutes.
    pub travel: f64,
    /// Weight on total start-slot crowd exposure.
    pub crowd: f64,
    /// Weight on the number of venues visited; negative rewards more venues.
    pub venues: f64,
}

impl ObjectiveWeights {
    /// Balanced defaults: venue count dominates, then travel, then crowds.
    ///
    /// One extra venue outweighs 90 minutes of travel; one crowd point on
    /// the `-2..=2` scale trades against 10 travel minutes.
    pub const BALANCED: Self = Self {
        travel: 1.0,
        crowd: 10.0,
        venues: -90.0,
    };
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self::BALANCED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rewards_venue_count() {
        let weights = ObjectiveWeights::default();
        assert!(weights.venues < 0.0);
        assert!(weights.travel > 0.0 && weights.crowd > 0.0);
    }
}
