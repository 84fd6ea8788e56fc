//! # Item Queries
//!
//! Selection criteria shared by `load_items` and subscriptions. Empty
//! criteria match everything.

use cc_01_item_model::CommonItem;
use chrono::{DateTime, Utc};
use shared_types::{ItemKind, NamedValueSet, Value};

/// Selection criteria for items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemQuery {
    /// Only items of this kind.
    pub item_kind: Option<ItemKind>,
    /// Only items in one of these scopes (case-insensitive). Empty means any.
    pub app_scopes: Vec<String>,
    /// Only items with this payload type name.
    pub data_type_name: Option<String>,
    /// Application properties that must be present with equal values.
    pub app_props: NamedValueSet,
    /// Only items saved with a USN greater than this.
    pub min_usn: Option<i64>,
    /// Also match expired items (tombstones included).
    pub include_expired: bool,
}

impl ItemQuery {
    /// Match every current item.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of_kind(mut self, kind: ItemKind) -> Self {
        self.item_kind = Some(kind);
        self
    }

    pub fn in_scope(mut self, scope: &str) -> Self {
        self.app_scopes.push(scope.to_string());
        self
    }

    pub fn with_data_type(mut self, name: &str) -> Self {
        self.data_type_name = Some(name.to_string());
        self
    }

    pub fn with_app_prop(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.app_props.set(name, value);
        self
    }

    pub fn after_usn(mut self, usn: i64) -> Self {
        self.min_usn = Some(usn);
        self
    }

    pub fn including_expired(mut self) -> Self {
        self.include_expired = true;
        self
    }

    /// True when `item` meets every criterion at `as_at`.
    pub fn matches(&self, item: &CommonItem, as_at: DateTime<Utc>) -> bool {
        if !self.include_expired && !item.is_current_at(as_at) {
            return false;
        }
        if self.item_kind.is_some_and(|kind| kind != item.item_kind()) {
            return false;
        }
        if !self.app_scopes.is_empty()
            && !self
                .app_scopes
                .iter()
                .any(|s| s.eq_ignore_ascii_case(item.app_scope()))
        {
            return false;
        }
        if let Some(data_type) = &self.data_type_name {
            if data_type != item.data_type_name() {
                return false;
            }
        }
        if self.min_usn.is_some_and(|usn| item.store_usn() <= usn) {
            return false;
        }
        self.app_props
            .iter()
            .all(|nv| item.app_props().value(nv.name()) == Some(nv.value()))
    }
}
