//! Filter, search and sort state with a pure derived view
//!
//! Items are inspected through their `serde_json` representation, so any
//! `Serialize` row type works and fields are addressed by dotted paths
//! (`site.name`, `ip_addresses.0`).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::traits::KeyValueStore;
use crate::types::{FilterCriterion, FilterState, SortOrder, SortSpec};

/// Parameter names [`FilterEngine::get_api_params`] emits for search and sort
pub const RESERVED_PARAMS: &[&str] = &["search", "sort_by", "sort_order"];

/// Suffixes appended to field names by range, contains and null criteria
pub const RESERVED_SUFFIXES: &[&str] = &["_min", "_max", "__contains", "__isnull"];

/// Where the engine writes its state
struct Persistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

/// Holds filter criteria and derives filtered views
///
/// With persistence, every mutation is written through to the store
/// immediately. The in-memory state is updated first; a storage failure is
/// returned but does not roll the change back.
pub struct FilterEngine {
    state: FilterState,
    persistence: Option<Persistence>,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterEngine {
    /// Unpersisted engine with no criteria
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FilterState::default(),
            persistence: None,
        }
    }

    /// Engine persisted under `key`, restoring any state saved there
    ///
    /// Unreadable saved state is logged and replaced by an empty one.
    pub async fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> CoreResult<Self> {
        let key = key.into();
        let state = match store.get(&key).await? {
            Some(raw) => match serde_json::from_str::<FilterState>(&raw) {
                Ok(state) => {
                    log::debug!("Restored filters from '{key}'");
                    state
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable filter state under '{key}': {e}");
                    FilterState::default()
                }
            },
            None => FilterState::default(),
        };

        Ok(Self {
            state,
            persistence: Some(Persistence { store, key }),
        })
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn filters(&self) -> &BTreeMap<String, FilterCriterion> {
        &self.state.filters
    }

    pub fn global_search(&self) -> &str {
        &self.state.global_search
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.state.sort.as_ref()
    }

    pub fn filter(&self, field: &str) -> Option<&FilterCriterion> {
        self.state.filters.get(field)
    }

    /// True when any search, filter or sort is set
    pub fn has_active_filters(&self) -> bool {
        !self.state.is_pristine()
    }

    /// Number of per-field filters plus one for a non-empty search
    pub fn active_filter_count(&self) -> usize {
        self.state.filters.len() + usize::from(!self.state.global_search.trim().is_empty())
    }

    /// Set or replace the criterion of `field`; an empty criterion removes it
    ///
    /// Fields named like a generated parameter ([`RESERVED_PARAMS`], or ending
    /// in one of [`RESERVED_SUFFIXES`]) are rejected, since their parameters
    /// would overwrite one another.
    pub async fn set_filter(
        &mut self,
        field: impl Into<String>,
        criterion: FilterCriterion,
    ) -> CoreResult<()> {
        let field = field.into();
        if is_reserved_field(&field) {
            return Err(CoreError::InvalidTransition(format!(
                "'{field}' clashes with a generated query parameter"
            )));
        }
        if criterion.is_empty() {
            self.state.filters.remove(&field);
        } else {
            self.state.filters.insert(field, criterion);
        }
        self.persist().await
    }

    pub async fn remove_filter(&mut self, field: &str) -> CoreResult<()> {
        if self.state.filters.remove(field).is_none() {
            return Ok(());
        }
        self.persist().await
    }

    pub async fn set_global_search(&mut self, search: impl Into<String>) -> CoreResult<()> {
        let search = search.into();
        if self.state.global_search == search {
            return Ok(());
        }
        self.state.global_search = search;
        self.persist().await
    }

    pub async fn set_sort(&mut self, sort: SortSpec) -> CoreResult<()> {
        self.state.sort = Some(sort);
        self.persist().await
    }

    pub async fn clear_sort(&mut self) -> CoreResult<()> {
        if self.state.sort.take().is_none() {
            return Ok(());
        }
        self.persist().await
    }

    /// Drop every criterion, the search and the sort
    pub async fn clear_all(&mut self) -> CoreResult<()> {
        self.state = FilterState::default();
        match self.persistence {
            Some(ref p) => p.store.remove(&p.key).await,
            None => Ok(()),
        }
    }

    async fn persist(&self) -> CoreResult<()> {
        let Some(ref p) = self.persistence else {
            return Ok(());
        };
        let raw = serde_json::to_string(&self.state)?;
        if let Err(e) = p.store.set(&p.key, &raw).await {
            log::warn!("Failed to persist filters under '{}': {e}", p.key);
            return Err(e);
        }
        Ok(())
    }

    /// Items matching the search and every filter, sorted when a sort is set
    ///
    /// The search is a case-insensitive substring match over
    /// `searchable_fields`. Pure: the result depends only on the arguments and
    /// the current criteria. With no criteria the input is returned as is.
    ///
    /// Rows that fail to serialize are kept while only a sort applies, where
    /// they order like rows missing the sort field. Once a search or filter
    /// is set they are dropped, since nothing about them can match.
    pub fn filter_data<T>(&self, collection: &[T], searchable_fields: &[&str]) -> Vec<T>
    where
        T: Serialize + Clone,
    {
        if self.state.is_pristine() {
            return collection.to_vec();
        }

        let needle = self.state.global_search.trim().to_lowercase();
        let narrowing = !needle.is_empty() || !self.state.filters.is_empty();
        let mut rows: Vec<(Value, &T)> = collection
            .iter()
            .filter_map(|item| match serde_json::to_value(item) {
                Ok(value) => Some((value, item)),
                Err(e) if narrowing => {
                    log::warn!("Skipping row that cannot be inspected: {e}");
                    None
                }
                Err(e) => {
                    log::debug!("Sorting uninspectable row as empty: {e}");
                    Some((Value::Null, item))
                }
            })
            .filter(|(value, _)| {
                needle.is_empty() || matches_search(value, searchable_fields, &needle)
            })
            .filter(|(value, _)| {
                self.state
                    .filters
                    .iter()
                    .all(|(field, criterion)| matches_criterion(resolve_path(value, field), criterion))
            })
            .collect();

        if let Some(ref sort) = self.state.sort {
            rows.sort_by(|(a, _), (b, _)| {
                let ordering = compare_values(resolve_path(a, &sort.field), resolve_path(b, &sort.field));
                match sort.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        rows.into_iter().map(|(_, item)| item.clone()).collect()
    }

    /// Server query parameters for the current state
    ///
    /// Keys come out sorted, so the same state always yields the same
    /// parameters in the same order.
    pub fn get_api_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();

        let search = self.state.global_search.trim();
        if !search.is_empty() {
            params.insert("search".to_string(), search.to_string());
        }

        for (field, criterion) in &self.state.filters {
            match criterion {
                FilterCriterion::Equals(value) => {
                    params.insert(field.clone(), value_to_param(value));
                }
                FilterCriterion::OneOf(values) => {
                    let joined = values
                        .iter()
                        .map(value_to_param)
                        .collect::<Vec<_>>()
                        .join(",");
                    params.insert(field.clone(), joined);
                }
                FilterCriterion::Range { min, max } => {
                    if let Some(min) = min {
                        params.insert(format!("{field}_min"), value_to_param(min));
                    }
                    if let Some(max) = max {
                        params.insert(format!("{field}_max"), value_to_param(max));
                    }
                }
                FilterCriterion::Contains(needle) => {
                    params.insert(format!("{field}__contains"), needle.clone());
                }
                FilterCriterion::IsNull(is_null) => {
                    params.insert(format!("{field}__isnull"), is_null.to_string());
                }
            }
        }

        if let Some(ref sort) = self.state.sort {
            params.insert("sort_by".to_string(), sort.field.clone());
            params.insert("sort_order".to_string(), sort.order.as_str().to_string());
        }

        params
    }
}

fn is_reserved_field(field: &str) -> bool {
    RESERVED_PARAMS.contains(&field)
        || RESERVED_SUFFIXES
            .iter()
            .any(|suffix| field.ends_with(suffix))
}

/// Walk a dotted path; numeric segments index into arrays
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Text used for search and display; `None` for null and containers
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn matches_search(value: &Value, fields: &[&str], needle: &str) -> bool {
    fields.iter().any(|field| {
        resolve_path(value, field)
            .and_then(value_as_text)
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

fn matches_criterion(value: Option<&Value>, criterion: &FilterCriterion) -> bool {
    let present = value.filter(|v| !v.is_null());
    match criterion {
        FilterCriterion::IsNull(want_null) => present.is_none() == *want_null,
        FilterCriterion::Equals(expected) => present.is_some_and(|v| loosely_equal(v, expected)),
        FilterCriterion::OneOf(options) => {
            present.is_some_and(|v| options.iter().any(|o| loosely_equal(v, o)))
        }
        FilterCriterion::Range { min, max } => present.is_some_and(|v| {
            let above = min
                .as_ref()
                .is_none_or(|min| compare_values(Some(v), Some(min)) != Ordering::Less);
            let below = max
                .as_ref()
                .is_none_or(|max| compare_values(Some(v), Some(max)) != Ordering::Greater);
            above && below
        }),
        FilterCriterion::Contains(needle) => present
            .and_then(value_as_text)
            .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
    }
}

/// Equality that treats `1` and `1.0` as equal
fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => (x - y).abs() < f64::EPSILON,
        _ => a == b,
    }
}

/// Total order used for sorting and ranges: missing/null first, then
/// numbers, then strings, then booleans
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Number(_)) => 1,
            Some(Value::String(_)) => 2,
            Some(Value::Bool(_)) => 3,
            Some(Value::Array(_) | Value::Object(_)) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn value_to_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
