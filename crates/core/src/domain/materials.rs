use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One priced line item on a quote. Ids are unique within the working list
/// and are owned by [`MaterialList`]; they are never supplied externally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub id: u32,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl MaterialItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The working set of materials for one drafting session. The list owns id
/// assignment so two items can never share an id, even after removals or a
/// wholesale replacement from a remote payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialList {
    items: Vec<MaterialItem>,
    next_id: u32,
}

impl MaterialList {
    pub fn new() -> Self {
        Self { items: Vec::new(), next_id: 1 }
    }

    /// Builds a list from raw entries, renumbering ids sequentially from 1.
    /// Quantities are clamped to at least 1 and prices to non-negative.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, u32, Decimal)>) -> Self {
        let mut list = Self::new();
        for (description, quantity, unit_price) in entries {
            list.add(description, quantity, unit_price);
        }
        list
    }

    pub fn add(&mut self, description: String, quantity: u32, unit_price: Decimal) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(MaterialItem {
            id,
            description,
            quantity: quantity.max(1),
            unit_price: unit_price.max(Decimal::ZERO),
        });
        id
    }

    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn set_quantity(&mut self, id: u32, quantity: u32) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity.max(1);
                true
            }
            None => false,
        }
    }

    pub fn set_unit_price(&mut self, id: u32, unit_price: Decimal) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.unit_price = unit_price.max(Decimal::ZERO);
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[MaterialItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Unrounded sum of quantity times unit price across the list.
    pub fn raw_cost(&self) -> Decimal {
        self.items.iter().map(MaterialItem::line_total).sum()
    }

    pub fn into_items(self) -> Vec<MaterialItem> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::MaterialList;

    #[test]
    fn ids_are_assigned_sequentially_from_one() {
        let list = MaterialList::from_entries([
            ("Consumer unit".to_string(), 1, Decimal::new(18_500, 2)),
            ("Double socket".to_string(), 6, Decimal::new(420, 2)),
            ("Back boxes".to_string(), 6, Decimal::new(115, 2)),
        ]);

        let ids: Vec<u32> = list.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn removal_does_not_recycle_ids() {
        let mut list = MaterialList::new();
        list.add("Cable drum".to_string(), 2, Decimal::new(4_850, 2));
        let middle = list.add("Sundries".to_string(), 1, Decimal::new(6_500, 2));
        assert!(list.remove(middle));

        let next = list.add("Downlights".to_string(), 8, Decimal::new(950, 2));
        assert_eq!(next, 3);
        assert!(list.items().iter().all(|item| item.id != middle));
    }

    #[test]
    fn quantities_and_prices_are_clamped_on_entry() {
        let mut list = MaterialList::new();
        let id = list.add("Grommets".to_string(), 0, Decimal::new(-100, 2));

        let item = &list.items()[0];
        assert_eq!(item.id, id);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price, Decimal::ZERO);

        assert!(list.set_quantity(id, 0));
        assert_eq!(list.items()[0].quantity, 1);
    }

    #[test]
    fn raw_cost_sums_line_totals() {
        let list = MaterialList::from_entries([
            ("Cable".to_string(), 3, Decimal::new(4_550, 2)),
            ("Clips".to_string(), 2, Decimal::new(125, 2)),
        ]);
        assert_eq!(list.raw_cost(), Decimal::new(13_900, 2));
    }
}
