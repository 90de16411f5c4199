//! Checkbox flag state for the category filter.
//!
//! The "all motor vehicles" flag is kept consistent with the five
//! individual motor flags by [`FilterState::toggle`]. The pedal-cycle flag
//! is independent and always additive.

use serde::{Deserialize, Serialize};

use crate::{TrafficCounts, VehicleCategory};

/// Which vehicle categories currently contribute to the selected sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FilterState {
    pub pedalbikes: bool,
    pub all_motor: bool,
    pub motorbikes: bool,
    pub cars: bool,
    pub buses: bool,
    pub lgvs: bool,
    pub hgvs: bool,
}

impl FilterState {
    /// Builds a state by checking each category in turn, starting from all
    /// flags cleared.
    #[must_use]
    pub fn from_checked(categories: impl IntoIterator<Item = VehicleCategory>) -> Self {
        categories
            .into_iter()
            .fold(Self::default(), |state, category| state.toggle(category, true))
    }

    /// Whether the flag for `category` is set.
    #[must_use]
    pub const fn is_active(&self, category: VehicleCategory) -> bool {
        match category {
            VehicleCategory::Pedalbikes => self.pedalbikes,
            VehicleCategory::AllMotor => self.all_motor,
            VehicleCategory::Motorbikes => self.motorbikes,
            VehicleCategory::Cars => self.cars,
            VehicleCategory::Buses => self.buses,
            VehicleCategory::Lgvs => self.lgvs,
            VehicleCategory::Hgvs => self.hgvs,
        }
    }

    /// Whether no flag is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        VehicleCategory::all().iter().all(|c| !self.is_active(*c))
    }

    /// The categories whose flag is set, in [`VehicleCategory::all`] order.
    #[must_use]
    pub fn active_categories(&self) -> Vec<VehicleCategory> {
        VehicleCategory::all()
            .iter()
            .copied()
            .filter(|c| self.is_active(*c))
            .collect()
    }

    const fn set(&mut self, category: VehicleCategory, checked: bool) {
        match category {
            VehicleCategory::Pedalbikes => self.pedalbikes = checked,
            VehicleCategory::AllMotor => self.all_motor = checked,
            VehicleCategory::Motorbikes => self.motorbikes = checked,
            VehicleCategory::Cars => self.cars = checked,
            VehicleCategory::Buses => self.buses = checked,
            VehicleCategory::Lgvs => self.lgvs = checked,
            VehicleCategory::Hgvs => self.hgvs = checked,
        }
    }

    /// Returns the state after the user sets the `category` checkbox to
    /// `checked`.
    ///
    /// * Setting `AllMotor` sets all five individual motor flags to match.
    /// * Clearing an individual motor flag clears `AllMotor`.
    /// * Setting an individual motor flag sets `AllMotor` once all five are
    ///   set.
    /// * `Pedalbikes` never affects other flags.
    #[must_use]
    pub fn toggle(self, category: VehicleCategory, checked: bool) -> Self {
        let mut next = self;
        next.set(category, checked);

        if category == VehicleCategory::AllMotor {
            for motor in VehicleCategory::individual_motor() {
                next.set(*motor, checked);
            }
        } else if category.is_individual_motor() {
            if !checked {
                next.all_motor = false;
            } else if VehicleCategory::individual_motor()
                .iter()
                .all(|c| next.is_active(*c))
            {
                next.all_motor = true;
            }
        }

        next
    }

    /// Sum of the counts for the active categories.
    ///
    /// With `AllMotor` set the combined motor count is used directly,
    /// otherwise the active individual motor categories are summed. The
    /// pedal-cycle count is added on top when its flag is set.
    #[must_use]
    pub fn selected_sum(&self, counts: &TrafficCounts) -> f64 {
        let motor = if self.all_motor {
            counts.all_motor_vehicles
        } else {
            VehicleCategory::individual_motor()
                .iter()
                .filter(|c| self.is_active(**c))
                .map(|c| counts.get(*c))
                .sum()
        };

        if self.pedalbikes {
            motor + counts.pushbikes
        } else {
            motor
        }
    }
}
