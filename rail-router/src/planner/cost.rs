//! Composite cost of riding scheduled legs.
//!
//! A leg's cost is its price multiplied by elapsed seconds, so a route
//! is cheap only when it is both inexpensive and quick. For two
//! consecutive legs the elapsed time includes the layover between them,
//! and a connection that cannot be made (the next leg departs within
//! the minimum connection buffer of the previous arrival, or earlier)
//! is taken on the following day instead.

use chrono::Duration;

use crate::domain::Leg;

use super::config::PlannerConfig;

/// Pure cost functions for single and connecting legs.
#[derive(Debug, Clone)]
pub struct CostModel {
    min_connection: Duration,
}

impl CostModel {
    /// Create a cost model from planner configuration.
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            min_connection: config.min_connection(),
        }
    }

    /// Cost of riding a leg with no preceding leg.
    ///
    /// Used for the first hop of a route and for ranking parallel edges
    /// in isolation.
    pub fn single_leg_cost(&self, leg: &Leg) -> f64 {
        leg.price() * leg.duration().num_seconds() as f64
    }

    /// Returns `next` as it would actually run when ridden after `prev`:
    /// shifted onto the following day if its departure is not strictly
    /// after `prev`'s arrival plus the minimum connection buffer.
    ///
    /// Always returns a copy; the stored leg is never mutated. The
    /// adjustment is idempotent for a given `prev`.
    pub fn connection_adjusted(&self, prev: &Leg, next: &Leg) -> Leg {
        if next.departure() > prev.arrival() + self.min_connection {
            next.clone()
        } else {
            next.shifted_by_day()
        }
    }

    /// Cost attributed to riding `next` immediately after `prev`.
    ///
    /// The elapsed time covers both legs and the layover between
    /// `prev`'s arrival and `next`'s (possibly day-shifted) departure,
    /// and is multiplied by the combined price. This is not decomposable
    /// into independent per-edge weights: it depends on which concrete
    /// leg was ridden before.
    pub fn connecting_cost(&self, prev: &Leg, next: &Leg) -> f64 {
        let adjusted = self.connection_adjusted(prev, next);
        let layover = adjusted.departure().signed_duration_since(prev.arrival());
        let total = prev.duration() + adjusted.duration() + layover;
        (prev.price() + next.price()) * total.num_seconds() as f64
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(&PlannerConfig::default())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{DayTime, StationId};
    use proptest::prelude::*;

    prop_compose! {
        fn any_leg(id: &'static str)(
            dep_h in 0u32..24, dep_m in 0u32..60,
            arr_h in 0u32..24, arr_m in 0u32..60,
            price in 0.0f64..1000.0,
        ) -> Leg {
            Leg::new(
                id.to_owned(),
                StationId::parse("A").unwrap(),
                StationId::parse("B").unwrap(),
                DayTime::from_hms(dep_h, dep_m, 0).unwrap(),
                DayTime::from_hms(arr_h, arr_m, 0).unwrap(),
                price,
            ).unwrap()
        }
    }

    prop_compose! {
        /// A leg that departs and arrives within the same day.
        fn same_day_leg(id: &'static str)(
            dep_h in 0u32..12, dep_m in 0u32..60,
            arr_h in 12u32..24, arr_m in 0u32..60,
            price in 0.0f64..1000.0,
        ) -> Leg {
            Leg::new(
                id.to_owned(),
                StationId::parse("A").unwrap(),
                StationId::parse("B").unwrap(),
                DayTime::from_hms(dep_h, dep_m, 0).unwrap(),
                DayTime::from_hms(arr_h, arr_m, 0).unwrap(),
                price,
            ).unwrap()
        }
    }

    proptest! {
        /// After a same-day previous leg, the adjusted next leg never
        /// departs before the previous arrival: layovers are positive.
        #[test]
        fn layover_never_negative(prev in same_day_leg("P"), next in any_leg("N")) {
            let model = CostModel::default();
            let adjusted = model.connection_adjusted(&prev, &next);
            let layover = adjusted.departure().signed_duration_since(prev.arrival());

            prop_assert!(layover > Duration::zero());
        }

        /// Connecting cost is never negative and is zero only for free legs.
        #[test]
        fn connecting_cost_non_negative(prev in any_leg("P"), next in any_leg("N")) {
            let model = CostModel::default();
            let cost = model.connecting_cost(&prev, &next);

            prop_assert!(cost >= 0.0);
            if prev.price() + next.price() > 0.0 {
                prop_assert!(cost > 0.0);
            }
        }
    }
}
