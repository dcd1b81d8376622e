//! Money, base health and dynamic tower pricing.

use std::collections::BTreeMap;

use trail_defence_core::{EconomyConfig, TowerKind};

#[derive(Clone, Debug)]
pub(crate) struct Economy {
    money: u32,
    health: u32,
    placed: BTreeMap<TowerKind, u32>,
}

impl Economy {
    pub(crate) fn new(config: &EconomyConfig) -> Self {
        Self {
            money: config.starting_money,
            health: config.starting_health,
            placed: BTreeMap::new(),
        }
    }

    pub(crate) fn money(&self) -> u32 {
        self.money
    }

    pub(crate) fn health(&self) -> u32 {
        self.health
    }

    /// Current price of `kind`: `floor(base × (1 + growth)^placed)`.
    pub(crate) fn price(&self, kind: TowerKind, base_cost: u32, growth: f64) -> u32 {
        let placed = self.placed.get(&kind).copied().unwrap_or(0);
        let exponent = i32::try_from(placed).unwrap_or(i32::MAX);
        let price = f64::from(base_cost) * (1.0 + growth).powi(exponent);
        if price >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            price.floor() as u32
        }
    }

    /// Deducts `cost` if affordable. Money is never driven negative.
    pub(crate) fn try_purchase(&mut self, kind: TowerKind, cost: u32) -> bool {
        let Some(remaining) = self.money.checked_sub(cost) else {
            return false;
        };
        self.money = remaining;
        *self.placed.entry(kind).or_insert(0) += 1;
        true
    }

    pub(crate) fn earn(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Removes base health, returning `true` when it reaches zero.
    pub(crate) fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }
}

/// `floor(amount × ratio)` for non-negative ratios.
pub(crate) fn scale_down(amount: u32, ratio: f64) -> u32 {
    (f64::from(amount) * ratio.max(0.0)).floor().min(f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_grow_with_each_purchase() {
        let mut economy = Economy::new(&EconomyConfig::default());
        let mut prices = Vec::new();
        for _ in 0..3 {
            let price = economy.price(TowerKind::Basic, 20, 0.10);
            assert!(economy.try_purchase(TowerKind::Basic, price));
            prices.push(price);
        }
        assert_eq!(prices, vec![20, 22, 24]);
        assert_eq!(economy.money(), 34);
        assert_eq!(economy.price(TowerKind::Cannon, 50, 0.10), 50);
    }

    #[test]
    fn unaffordable_purchase_changes_nothing() {
        let mut economy = Economy::new(&EconomyConfig {
            starting_money: 10,
            ..EconomyConfig::default()
        });
        assert!(!economy.try_purchase(TowerKind::Laser, 80));
        assert_eq!(economy.money(), 10);
        assert_eq!(economy.price(TowerKind::Laser, 80, 0.25), 80);
    }

    #[test]
    fn health_bottoms_out_at_zero() {
        let mut economy = Economy::new(&EconomyConfig {
            starting_health: 2,
            ..EconomyConfig::default()
        });
        assert!(!economy.take_damage(1));
        assert!(economy.take_damage(5));
        assert_eq!(economy.health(), 0);
    }

    #[test]
    fn scaling_floors_the_result() {
        assert_eq!(scale_down(22, 0.2), 4);
        assert_eq!(scale_down(15, 0.8), 12);
        assert_eq!(scale_down(25, 0.6), 15);
        assert_eq!(scale_down(10, 0.6), 6);
    }
}
