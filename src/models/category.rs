use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Game,
    Book,
    Movie,
}

impl Default for Category {
    fn default() -> Self {
        Category::Game
    }
}

impl Category {
    /// Tab order: games, books, then movies & TV.
    pub const ALL: [Category; 3] = [Category::Game, Category::Book, Category::Movie];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Game => "game",
            Category::Book => "book",
            Category::Movie => "movie",
        }
    }

    pub fn ordinal(&self) -> usize {
        match self {
            Category::Game => 0,
            Category::Book => 1,
            Category::Movie => 2,
        }
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-size container holding one value per [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryMap<T> {
    slots: [T; 3],
}

impl<T> CategoryMap<T> {
    pub fn from_fn(mut init: impl FnMut(Category) -> T) -> Self {
        Self {
            slots: Category::ALL.map(&mut init),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> CategoryMap<U> {
        CategoryMap::from_fn(|category| f(category, &self[category]))
    }
}

impl<T: Default> Default for CategoryMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<Category> for CategoryMap<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        &self.slots[category.ordinal()]
    }
}

impl<T> IndexMut<Category> for CategoryMap<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        &mut self.slots[category.ordinal()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_tab_order() {
        for (index, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.ordinal(), index);
            assert_eq!(Category::from_ordinal(index), Some(*category));
        }
        assert_eq!(Category::from_ordinal(3), None);
    }

    #[test]
    fn category_map_indexes_independently() {
        let mut counts: CategoryMap<u32> = CategoryMap::default();
        counts[Category::Book] += 2;
        counts[Category::Movie] += 1;

        assert_eq!(counts[Category::Game], 0);
        assert_eq!(counts[Category::Book], 2);
        assert_eq!(counts[Category::Movie], 1);

        let labels = counts.map(|category, count| format!("{category}:{count}"));
        let collected: Vec<_> = labels.iter().map(|(_, label)| label.clone()).collect();
        assert_eq!(collected, vec!["game:0", "book:2", "movie:1"]);
    }

    #[test]
    fn serializes_as_camel_case() {
        let json = serde_json::to_string(&Category::Movie).unwrap();
        assert_eq!(json, "\"movie\"");
    }
}
