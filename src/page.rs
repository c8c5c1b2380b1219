//! Page numbers, page ranges and page-indexed option maps.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

use serde::Serialize;

use crate::validation::{Constrained, ConstraintTable, CrossFieldRule};
use crate::view::FrozenMap;

/// 1-based page number. Upper bounds are checked against the actual document
/// by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    /// `None` for page zero.
    pub fn new(page: u32) -> Option<Self> {
        NonZeroU32::new(page).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = u32;

    fn try_from(page: u32) -> Result<Self, Self::Error> {
        Self::new(page).ok_or(page)
    }
}

/// Per-page option values with an optional default for unlisted pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PageOptions<V> {
    pages: BTreeMap<PageNumber, V>,
    default: Option<V>,
}

impl<V> Default for PageOptions<V> {
    fn default() -> Self {
        Self {
            pages: BTreeMap::new(),
            default: None,
        }
    }
}

impl<V> PageOptions<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(default: V) -> Self {
        Self {
            pages: BTreeMap::new(),
            default: Some(default),
        }
    }

    /// Associates `value` with `page`, returning the value it replaced.
    pub fn put(&mut self, page: PageNumber, value: V) -> Option<V> {
        self.pages.insert(page, value)
    }

    /// Removes every per-page association. The default is kept.
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    pub fn view(&self) -> FrozenMap<'_, PageNumber, V> {
        FrozenMap::new(&self.pages)
    }

    pub fn default_value(&self) -> Option<&V> {
        self.default.as_ref()
    }

    pub fn set_default(&mut self, default: Option<V>) -> Option<V> {
        std::mem::replace(&mut self.default, default)
    }

    /// Value for `page`: its own association, or the default.
    pub fn effective(&self, page: PageNumber) -> Option<&V> {
        self.pages.get(&page).or(self.default.as_ref())
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// True when neither a page association nor a default exists.
    pub fn is_unset(&self) -> bool {
        self.pages.is_empty() && self.default.is_none()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&PageNumber, &V)> {
        self.pages.iter()
    }
}

/// Inclusive range of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRange {
    pub start: PageNumber,
    pub end: PageNumber,
}

impl PageRange {
    pub fn new(start: PageNumber, end: PageNumber) -> Self {
        Self { start, end }
    }

    pub fn single(page: PageNumber) -> Self {
        Self {
            start: page,
            end: page,
        }
    }

    pub fn contains(&self, page: PageNumber) -> bool {
        self.start <= page && page <= self.end
    }
}

fn range_is_ordered(range: &PageRange) -> Result<(), String> {
    if range.start <= range.end {
        Ok(())
    } else {
        Err(format!(
            "start page {} is after end page {}",
            range.start, range.end
        ))
    }
}

impl Constrained for PageRange {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<PageRange> = ConstraintTable {
            fields: &[],
            rules: &[CrossFieldRule {
                name: "end",
                check: range_is_ordered,
            }],
        };
        &TABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ConstraintKind;

    fn page(n: u32) -> PageNumber {
        PageNumber::new(n).unwrap()
    }

    #[test]
    fn test_page_zero_is_rejected() {
        assert!(PageNumber::new(0).is_none());
        assert_eq!(PageNumber::try_from(0), Err(0));
        assert_eq!(PageNumber::FIRST.get(), 1);
    }

    #[test]
    fn test_put_returns_replaced_value() {
        let mut options = PageOptions::new();
        assert_eq!(options.put(page(3), "fade"), None);
        assert_eq!(options.put(page(3), "wipe"), Some("fade"));
        assert_eq!(options.len(), 1);
        assert_eq!(options.view().get(&page(3)), Some(&"wipe"));
    }

    #[test]
    fn test_effective_falls_back_to_default() {
        let mut options = PageOptions::with_default(90);
        options.put(page(2), 180);
        assert_eq!(options.effective(page(2)), Some(&180));
        assert_eq!(options.effective(page(5)), Some(&90));

        options.clear();
        assert!(options.is_empty());
        assert!(!options.is_unset());
        assert_eq!(options.effective(page(2)), Some(&90));
    }

    #[test]
    fn test_insertion_order_does_not_affect_equality() {
        let mut a = PageOptions::new();
        a.put(page(1), 'a');
        a.put(page(2), 'b');
        let mut b = PageOptions::new();
        b.put(page(2), 'b');
        b.put(page(1), 'a');
        assert_eq!(a, b);
    }

    #[test]
    fn test_reversed_range_is_a_cross_field_violation() {
        use crate::validation::Validate;

        let report = PageRange::new(page(5), page(2)).validate();
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations()[0].path, "end");
        assert_eq!(report.violations()[0].constraint, ConstraintKind::CrossField);
        assert!(PageRange::new(page(2), page(5)).validate().is_valid());
    }
}
