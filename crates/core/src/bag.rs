//! Ordered, append-only multi-element collection.

use serde::{Deserialize, Serialize};

/// A bag of elements (items, taxes, discounts, relations).
///
/// Elements keep insertion order and duplicates are allowed. There is no way
/// to remove a single element; `replace` swaps the whole content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bag<T> {
    elements: Vec<T>,
}

impl<T> Bag<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn add(&mut self, element: T) {
        self.elements.push(element);
    }

    /// Clear the bag and re-add every given element.
    pub fn replace(&mut self, elements: impl IntoIterator<Item = T>) {
        self.elements.clear();
        for element in elements {
            self.add(element);
        }
    }

    pub fn all(&self) -> &[T] {
        &self.elements
    }

    pub fn count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.elements.iter_mut()
    }
}

impl<T> Default for Bag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Bag<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut bag = Bag::new();
        bag.replace(iter);
        bag
    }
}

impl<T> From<Vec<T>> for Bag<T> {
    fn from(elements: Vec<T>) -> Self {
        Self { elements }
    }
}

impl<T> IntoIterator for Bag<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Bag<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_keeps_insertion_order_and_duplicates() {
        let mut bag = Bag::new();
        bag.add("vat");
        bag.add("ieps");
        bag.add("vat");

        assert_eq!(bag.count(), 3);
        assert_eq!(bag.all(), &["vat", "ieps", "vat"]);
    }

    #[test]
    fn replace_discards_previous_content() {
        let mut bag: Bag<i32> = vec![1, 2, 3].into();
        bag.replace([9]);
        assert_eq!(bag.all(), &[9]);

        bag.replace(Vec::new());
        assert!(bag.is_empty());
    }

    #[test]
    fn iterates_by_reference() {
        let bag: Bag<i32> = (1..=4).collect();
        let sum: i32 = (&bag).into_iter().sum();
        assert_eq!(sum, 10);
        assert_eq!(bag.iter().count(), bag.count());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: replacing twice with the same list yields the same bag.
        #[test]
        fn replace_is_idempotent(elements in prop::collection::vec(any::<i64>(), 0..32)) {
            let mut bag = Bag::new();
            bag.replace(elements.clone());
            let first = bag.clone();

            bag.replace(elements.clone());

            prop_assert_eq!(first.count(), bag.count());
            prop_assert_eq!(first.all(), bag.all());
            prop_assert_eq!(bag.all(), elements.as_slice());
        }
    }
}
