//! 0/1 knapsack instances.

/// An item with a positive weight and value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub weight: u64,
    pub value: u64,
}

impl Item {
    pub fn new(weight: u64, value: u64) -> Item {
        Item { weight, value }
    }
}

/// A list of items together with a capacity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnapsackInstance {
    pub items: Vec<Item>,
    pub capacity: u64,
}

impl KnapsackInstance {
    pub fn new(items: Vec<Item>, capacity: u64) -> KnapsackInstance {
        KnapsackInstance { items, capacity }
    }

    /// Total weight and value of the items with the given indices.
    pub fn totals(&self, picked: &[usize]) -> (u64, u64) {
        picked.iter().fold((0, 0), |(weight, value), &index| {
            let item = self.items[index];
            (weight + item.weight, value + item.value)
        })
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;
    use proptest::{collection::SizeRange, prelude::*, *};

    /// Items with weights in `1..=max_weight` and values in `1..=max_value`.
    pub fn items(
        count: impl Into<SizeRange>,
        max_weight: u64,
        max_value: u64,
    ) -> impl Strategy<Value = Vec<Item>> {
        collection::vec(
            (1..=max_weight, 1..=max_value).prop_map(|(weight, value)| Item::new(weight, value)),
            count,
        )
    }
}
