use std::cmp::Ordering;
use std::collections::HashMap;

use crate::core::models::{BaseEntity, Demo, LabelledInterval, Lead};
use crate::core::types::LeadStatus;
use crate::errors::{Error, Result};

pub type DemoBook = Repository<Demo>;
pub type LeadBoard = Repository<Lead>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Unordered,
    IdAsc,
    IdDesc,
}

struct FilterSorter<'a, T> {
    filters: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
    sort: Sort,
    cmp: Option<Box<dyn Fn(&T, &T) -> Ordering + 'a>>,
}

impl<'a, T: BaseEntity> FilterSorter<'a, T> {
    fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort: Sort::Unordered,
            cmp: None,
        }
    }

    fn apply<'s>(&self, items: &'s HashMap<String, T>) -> Vec<&'s T> {
        let mut out: Vec<&T> = items
            .values()
            .filter(|e| self.filters.iter().all(|f| f(e)))
            .collect();
        match (&self.cmp, self.sort) {
            (Some(cmp), _) => out.sort_by(|a, b| cmp(a, b).then_with(|| a.id().cmp(b.id()))),
            (None, Sort::Unordered) => {}
            (None, Sort::IdAsc) => out.sort_by(|a, b| a.id().cmp(b.id())),
            (None, Sort::IdDesc) => out.sort_by(|a, b| b.id().cmp(a.id())),
        }
        out
    }
}

/// In-memory list state for one entity kind, keyed by the server id.
#[derive(Debug, Clone)]
pub struct Repository<T: BaseEntity> {
    kind: &'static str,
    items: HashMap<String, T>,
}

impl<T: BaseEntity + Clone> Repository<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            items: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Insert or replace by id. Returns the previous copy, if any.
    pub fn upsert(&mut self, entity: T) -> Option<T> {
        self.items.insert(entity.id().to_string(), entity)
    }

    /// Replace the whole list, as after a fresh fetch.
    pub fn replace_all<I: IntoIterator<Item = T>>(&mut self, entities: I) {
        self.items = entities
            .into_iter()
            .map(|e| (e.id().to_string(), e))
            .collect();
    }

    pub fn get(&self, id: &str) -> Result<&T> {
        self.items
            .get(id)
            .ok_or_else(|| Error::not_found(self.kind, id))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut T> {
        let kind = self.kind;
        self.items
            .get_mut(id)
            .ok_or_else(|| Error::not_found(kind, id))
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.items.remove(id)
    }

    pub fn values(&self, sort: Sort) -> Vec<&T> {
        let mut fs = FilterSorter::new();
        fs.sort = sort;
        fs.apply(&self.items)
    }

    pub fn query(&self) -> Query<'_, T> {
        Query {
            items: &self.items,
            fs: FilterSorter::new(),
        }
    }
}

pub struct Query<'a, T: BaseEntity> {
    items: &'a HashMap<String, T>,
    fs: FilterSorter<'a, T>,
}

impl<'a, T: BaseEntity> Query<'a, T> {
    pub fn r#where(mut self, pred: impl Fn(&T) -> bool + 'a) -> Self {
        self.fs.filters.push(Box::new(pred));
        self
    }

    pub fn order(mut self, sort: Sort) -> Self {
        self.fs.sort = sort;
        self
    }

    /// Custom ordering; ties fall back to id order so output is stable.
    pub fn order_with(mut self, cmp: impl Fn(&T, &T) -> Ordering + 'a) -> Self {
        self.fs.cmp = Some(Box::new(cmp));
        self
    }

    pub fn collect(self) -> Vec<&'a T> {
        self.fs.apply(self.items)
    }

    pub fn ids(self) -> Vec<String> {
        self.collect().into_iter().map(|e| e.id().to_string()).collect()
    }

    pub fn exists(self) -> bool {
        self.items
            .values()
            .any(|e| self.fs.filters.iter().all(|f| f(e)))
    }
}

impl DemoBook {
    /// Demos ordered by start time, as the list and agenda views show them.
    pub fn chronological(&self) -> Vec<&Demo> {
        self.query()
            .order_with(|a, b| a.scheduled_at.cmp(&b.scheduled_at))
            .collect()
    }

    /// Blocks held by demos that still occupy their slot.
    pub fn occupied(&self) -> Vec<LabelledInterval> {
        self.chronological()
            .into_iter()
            .filter_map(Demo::labelled_interval)
            .collect()
    }
}

impl LeadBoard {
    /// Cards in one kanban column, in id order.
    pub fn column(&self, status: LeadStatus) -> Vec<&Lead> {
        self.query()
            .r#where(move |l| l.status == status)
            .order(Sort::IdAsc)
            .collect()
    }
}
