//src/items/src/lib.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// 基础物品结构
///
/// Items carry no identity: two items with equal fields are the same item.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub value: u32,
    pub description: String,
}

impl Item {
    pub fn new(name: impl Into<String>, value: u32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            description: description.into(),
        }
    }

    /// 宝石：价值随距离增长
    pub fn gem(distance: u32) -> Self {
        Self::new(
            format!("Gem (dist. {})", distance),
            50 + 10 * distance,
            format!(
                "A faintly glowing gem, found far from the entrance (distance {}).",
                distance
            ),
        )
    }

    /// 首领掉落的王冠
    pub fn boss_crown(distance: u32) -> Self {
        Self::new(
            "Crown of the Boss",
            500 + 50 * distance,
            "The final treasure of the dungeon: a symbol of power.",
        )
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (value {})", self.name, self.value)
    }
}

/// Sum of the values of a collection of items.
pub fn total_value<'a>(items: impl IntoIterator<Item = &'a Item>) -> u64 {
    items.into_iter().map(|item| u64::from(item.value)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gem_value_scales_with_distance() {
        assert_eq!(Item::gem(0).value, 50);
        assert_eq!(Item::gem(7).value, 120);
    }

    #[test]
    fn crown_value_scales_with_distance() {
        assert_eq!(Item::boss_crown(4).value, 700);
    }

    #[test]
    fn items_compare_by_fields() {
        assert_eq!(Item::gem(3), Item::gem(3).clone());
        assert_ne!(Item::gem(3), Item::gem(4));
    }

    #[test]
    fn serialized_fields_are_stable() {
        let json = serde_json::to_value(Item::new("Key", 5, "Opens a door")).unwrap();
        assert_eq!(json["name"], "Key");
        assert_eq!(json["value"], 5);
        assert_eq!(json["description"], "Opens a door");
    }

    #[test]
    fn total_value_sums_inventory() {
        let bag = vec![Item::gem(0), Item::gem(1), Item::boss_crown(0)];
        assert_eq!(total_value(&bag), 50 + 60 + 500);
    }
}
