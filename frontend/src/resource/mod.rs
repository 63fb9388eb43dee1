//! Typed access to the ERP entity collections and the select / edit / save
//! flow shared by every editable entity page.

mod entities;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::ApiError;

/// A summary tile above an entity table.
#[derive(Clone, Debug, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub hint: Option<String>,
}

impl StatCard {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into(), hint: None }
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// An entity collection served under `/api/<COLLECTION>`.
pub trait Resource: Clone + DeserializeOwned + PartialEq + Send + Sync + 'static {
    type Stats: DeserializeOwned + Default + Clone + PartialEq + Send + Sync + 'static;

    const COLLECTION: &'static str;
    /// Path segment the list is read from, when it differs from `COLLECTION`.
    const LIST_PATH: Option<&'static str> = None;
    /// Envelope key when the list arrives wrapped, e.g. `{"products": [...]}`.
    const LIST_KEY: Option<&'static str> = None;
    /// Only the first N records are shown.
    const LIST_LIMIT: Option<usize> = None;
    const TITLE: &'static str;
    const SUBTITLE: &'static str;

    fn id(&self) -> i64;
    fn columns() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
    fn stat_cards(stats: &Self::Stats) -> Vec<StatCard>;

    fn list_path() -> String {
        format!("/api/{}", Self::LIST_PATH.unwrap_or(Self::COLLECTION))
    }

    fn stats_path() -> String {
        format!("/api/{}/stats", Self::COLLECTION)
    }

    fn item_path(id: i64) -> String {
        format!("/api/{}/{id}", Self::COLLECTION)
    }
}

/// A form field bound to one property of `T`.
pub struct Field<T> {
    pub label: &'static str,
    pub numeric: bool,
    pub get: fn(&T) -> String,
    pub set: fn(&mut T, &str),
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> Field<T> {
    pub fn text(label: &'static str, get: fn(&T) -> String, set: fn(&mut T, &str)) -> Self {
        Self { label, numeric: false, get, set }
    }

    pub fn number(label: &'static str, get: fn(&T) -> String, set: fn(&mut T, &str)) -> Self {
        Self { label, numeric: true, get, set }
    }
}

pub trait Editable: Resource {
    /// Body of the `PUT`: exactly the fields the edit form may change.
    type Update: Serialize + Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static;

    fn to_update(&self) -> Self::Update;
    fn fields() -> Vec<Field<Self>>;
}

/// Decodes a list response that is either a bare array or an object holding
/// the array under `key` (or under its first array-valued field when no key
/// is given). Records that do not decode are skipped.
pub fn decode_list<T: DeserializeOwned>(value: Value, key: Option<&str>) -> Vec<T> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let found = match key {
                Some(key) => map.remove(key),
                None => map.into_iter().map(|(_, v)| v).find(Value::is_array),
            };
            match found {
                Some(Value::Array(items)) => items,
                _ => {
                    log::warn!("List response has no array under {key:?}");
                    Vec::new()
                }
            }
        }
        other => {
            log::warn!("Unexpected list response shape: {other}");
            Vec::new()
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping malformed record: {e}");
                None
            }
        })
        .collect()
}

/// A pending `PUT <path>` with its body.
#[derive(Clone, Debug, PartialEq)]
pub struct SaveRequest<U> {
    pub id: i64,
    pub path: String,
    pub body: U,
}

/// Local list plus the record currently open in the edit form.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState<T> {
    items: Vec<T>,
    draft: Option<T>,
    dirty: bool,
    saving: bool,
    error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            draft: None,
            dirty: false,
            saving: false,
            error: None,
        }
    }
}

impl<T: Editable> ResourceState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, mut items: Vec<T>) {
        if let Some(limit) = T::LIST_LIMIT {
            items.truncate(limit);
        }
        self.items = items;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn draft(&self) -> Option<&T> {
        self.draft.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Opens a copy of the record in the form. Ignored while a save is running.
    pub fn select(&mut self, id: i64) -> bool {
        if self.saving {
            return false;
        }
        match self.items.iter().find(|item| item.id() == id) {
            Some(item) => {
                self.draft = Some(item.clone());
                self.dirty = false;
                self.error = None;
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        if self.saving {
            return;
        }
        self.draft = None;
        self.dirty = false;
        self.error = None;
    }

    pub fn edit(&mut self, field: &Field<T>, value: &str) {
        if self.saving {
            return;
        }
        if let Some(draft) = self.draft.as_mut() {
            (field.set)(draft, value);
            self.dirty = true;
        }
    }

    /// Starts a save when the draft has unsaved changes and no save is running.
    pub fn begin_save(&mut self) -> Option<SaveRequest<T::Update>> {
        if self.saving || !self.dirty {
            return None;
        }
        let draft = self.draft.as_ref()?;
        let request = SaveRequest {
            id: draft.id(),
            path: T::item_path(draft.id()),
            body: draft.to_update(),
        };
        self.saving = true;
        self.error = None;
        Some(request)
    }

    /// Replaces the matching record with the server's copy.
    pub fn save_succeeded(&mut self, updated: T) {
        let id = updated.id();
        if let Some(slot) = self.items.iter_mut().find(|item| item.id() == id) {
            *slot = updated.clone();
        }
        if self.draft.as_ref().is_some_and(|d| d.id() == id) {
            self.draft = Some(updated);
        }
        self.saving = false;
        self.dirty = false;
        self.error = None;
    }

    /// Keeps the list as it was and the edit pending.
    pub fn save_failed(&mut self, error: &ApiError) {
        log::error!("Failed to save {}: {error}", T::COLLECTION);
        self.saving = false;
        self.error = Some(error.to_string());
    }
}
