//! # Common Item
//!
//! The unit of distribution: an immutable identity plus an envelope that can
//! be edited until the item is frozen.
//!
//! ## Identity
//!
//! `id`, `item_kind`, `transient`, `name` and `app_scope` are fixed at
//! construction. `unique_name` is derived from kind, scope and name and is
//! computed once.
//!
//! ## Envelope
//!
//! Timestamps, property sets, payload and signature. Mutators return
//! `ItemError::Frozen` after `freeze`; `net_scope` and `store_usn` are
//! assigned by transport and store and stay writable.
//!
//! ## Expiry
//!
//! An item either carries a lifetime (resolved against `created` at freeze) or
//! an absolute expiry time. The last setter called wins.

use crate::config::SizeEstimate;
use crate::domain::ItemError;
use crate::ports::ItemSigner;
use chrono::{DateTime, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_types::{
    app_scope, content_hash, sys_prop, ContentHash, ItemKind, NamedValueSet, SerialFormat, Value,
};
use std::sync::OnceLock;
use tracing::debug;
use uuid::Uuid;

/// Longest lifetime an item may have when created at `from`.
pub fn max_lifetime(from: DateTime<Utc>) -> TimeDelta {
    DateTime::<Utc>::MAX_UTC.signed_duration_since(from) - TimeDelta::days(1)
}

/// Expiry `lifetime` after `created`. The duration is kept as given; only
/// the end of the representable range caps it.
fn resolve_lifetime(created: DateTime<Utc>, lifetime: TimeDelta) -> DateTime<Utc> {
    created
        .checked_add_signed(lifetime.max(TimeDelta::zero()))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Length recorded under `TLen`/`YLen`, saturating at `i32::MAX`.
pub(crate) fn len_prop(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// Unique name for an item identity: `kind.scope.name`, lower-cased.
pub fn make_unique_name(kind: ItemKind, app_scope: &str, name: &str) -> String {
    format!("{kind}.{app_scope}.{name}").to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpirySpec {
    Lifetime(TimeDelta),
    At(DateTime<Utc>),
}

/// Persisted form of an item, as written and read by stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: Uuid,
    pub item_kind: ItemKind,
    pub transient: bool,
    pub name: String,
    pub app_scope: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
    pub app_props: NamedValueSet,
    pub sys_props: NamedValueSet,
    pub net_scope: Option<String>,
    pub y_data: Option<Vec<u8>>,
    pub y_sign: Option<Vec<u8>>,
    pub data_type_name: String,
    pub store_usn: i64,
}

/// A scoped, versioned cache item.
#[derive(Debug, Clone)]
pub struct CommonItem {
    // identity
    id: Uuid,
    item_kind: ItemKind,
    transient: bool,
    name: String,
    app_scope: String,
    unique_name: OnceLock<String>,

    // envelope
    frozen: bool,
    created: DateTime<Utc>,
    expires: DateTime<Utc>,
    expiry: ExpirySpec,
    app_props: NamedValueSet,
    sys_props: NamedValueSet,
    net_scope: Option<String>,
    y_data: Option<Vec<u8>>,
    y_data_hash: ContentHash,
    y_sign: Option<Vec<u8>>,
    data_type_name: Option<String>,
    store_usn: i64,
}

impl CommonItem {
    /// Create an unfrozen item. A missing or blank scope means the legacy scope.
    ///
    /// The default lifetime is the maximum.
    pub fn new(kind: ItemKind, transient: bool, name: &str, app_scope: Option<&str>) -> Self {
        let scope = app_scope
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(app_scope::LEGACY);
        let created = Utc::now();
        let lifetime = max_lifetime(created);
        Self {
            id: Uuid::new_v4(),
            item_kind: kind,
            transient,
            name: name.to_string(),
            app_scope: scope.to_string(),
            unique_name: OnceLock::new(),
            frozen: false,
            created,
            expires: resolve_lifetime(created, lifetime),
            expiry: ExpirySpec::Lifetime(lifetime),
            app_props: NamedValueSet::new(),
            sys_props: NamedValueSet::new(),
            net_scope: None,
            y_data: None,
            y_data_hash: ContentHash::ZERO,
            y_sign: None,
            data_type_name: None,
            store_usn: 0,
        }
    }

    /// Rebuild a stored item verbatim. The result is frozen.
    pub fn from_record(record: ItemRecord) -> Self {
        let y_data_hash = content_hash(record.y_data.as_deref());
        Self {
            id: record.id,
            item_kind: record.item_kind,
            transient: record.transient,
            name: record.name,
            app_scope: record.app_scope,
            unique_name: OnceLock::new(),
            frozen: true,
            created: record.created,
            expires: record.expires,
            expiry: ExpirySpec::At(record.expires),
            app_props: record.app_props,
            sys_props: record.sys_props,
            net_scope: record.net_scope,
            y_data: record.y_data,
            y_data_hash,
            y_sign: record.y_sign,
            data_type_name: Some(record.data_type_name),
            store_usn: record.store_usn,
        }
    }

    /// The persisted form of this item.
    pub fn to_record(&self) -> ItemRecord {
        ItemRecord {
            id: self.id,
            item_kind: self.item_kind,
            transient: self.transient,
            name: self.name.clone(),
            app_scope: self.app_scope.clone(),
            created: self.created,
            expires: self.expires,
            app_props: self.app_props.clone(),
            sys_props: self.sys_props.clone(),
            net_scope: self.net_scope.clone(),
            y_data: self.y_data.clone(),
            y_sign: self.y_sign.clone(),
            data_type_name: self.data_type_name().to_string(),
            store_usn: self.store_usn,
        }
    }

    /// A new item republishing this one's content under a fresh id.
    ///
    /// With `expired` set the result is a tombstone: it expires when created,
    /// carries no payload, signature or system properties.
    pub fn clone_for_republish(&self, transient: bool, expired: bool) -> Self {
        let mut item = CommonItem::new(self.item_kind, transient, &self.name, Some(&self.app_scope));
        item.data_type_name = self.data_type_name.clone();
        item.app_props = self.app_props.clone();
        let lifetime = if expired {
            TimeDelta::zero()
        } else {
            item.sys_props = self.sys_props.clone();
            item.y_data = self.y_data.clone();
            item.y_data_hash = self.y_data_hash;
            item.y_sign = self.y_sign.clone();
            self.expires.signed_duration_since(self.created)
        };
        item.expiry = ExpirySpec::Lifetime(lifetime);
        item.expires = resolve_lifetime(item.created, lifetime);
        item
    }

    fn check_not_frozen(&self) -> Result<(), ItemError> {
        if self.frozen {
            return Err(ItemError::Frozen {
                unique_name: self.unique_name().to_string(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // IDENTITY
    // =========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn item_kind(&self) -> ItemKind {
        self.item_kind
    }

    pub fn transient(&self) -> bool {
        self.transient
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn app_scope(&self) -> &str {
        &self.app_scope
    }

    /// Lower-cased `kind.scope.name`; computed on first use.
    pub fn unique_name(&self) -> &str {
        self.unique_name
            .get_or_init(|| make_unique_name(self.item_kind, &self.app_scope, &self.name))
    }

    // =========================================================================
    // ENVELOPE
    // =========================================================================

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn expires(&self) -> DateTime<Utc> {
        self.expires
    }

    /// Time between creation and expiry.
    pub fn lifetime(&self) -> TimeDelta {
        self.expires.signed_duration_since(self.created)
    }

    pub fn is_current(&self) -> bool {
        self.is_current_at(Utc::now())
    }

    /// True while `as_at` is before expiry.
    pub fn is_current_at(&self, as_at: DateTime<Utc>) -> bool {
        as_at < self.expires
    }

    /// Expire `lifetime` after creation. Negative values clamp to zero.
    pub fn set_lifetime(&mut self, lifetime: TimeDelta) -> Result<(), ItemError> {
        self.check_not_frozen()?;
        self.expiry = ExpirySpec::Lifetime(lifetime);
        self.expires = resolve_lifetime(self.created, lifetime);
        Ok(())
    }

    /// Expire at a fixed time. Times before creation clamp to creation.
    pub fn set_expires(&mut self, expires: DateTime<Utc>) -> Result<(), ItemError> {
        self.check_not_frozen()?;
        self.expiry = ExpirySpec::At(expires);
        self.expires = expires.max(self.created);
        Ok(())
    }

    pub fn app_props(&self) -> &NamedValueSet {
        &self.app_props
    }

    pub fn set_app_props(&mut self, props: NamedValueSet) -> Result<(), ItemError> {
        self.check_not_frozen()?;
        self.app_props = props;
        Ok(())
    }

    pub fn set_app_prop(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ItemError> {
        self.check_not_frozen()?;
        self.app_props.set(name, value);
        Ok(())
    }

    pub fn sys_props(&self) -> &NamedValueSet {
        &self.sys_props
    }

    pub fn set_sys_prop(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ItemError> {
        self.check_not_frozen()?;
        self.sys_props.set(name, value);
        Ok(())
    }

    pub fn net_scope(&self) -> Option<&str> {
        self.net_scope.as_deref()
    }

    /// Transport-assigned; allowed after freeze.
    pub fn set_net_scope(&mut self, net_scope: Option<String>) {
        self.net_scope = net_scope;
    }

    pub fn store_usn(&self) -> i64 {
        self.store_usn
    }

    /// Store-assigned; allowed after freeze.
    pub fn set_store_usn(&mut self, usn: i64) {
        self.store_usn = usn;
    }

    /// Payload type name; empty when unset.
    pub fn data_type_name(&self) -> &str {
        self.data_type_name.as_deref().unwrap_or("")
    }

    pub fn set_data_type_name(&mut self, name: &str) -> Result<(), ItemError> {
        self.check_not_frozen()?;
        self.data_type_name = Some(name.to_string());
        Ok(())
    }

    /// Serialisation format recorded under `SAlg`.
    pub fn serial_format(&self) -> SerialFormat {
        SerialFormat::from_code(self.sys_props.get_value_or::<i32>(sys_prop::S_ALG, 0))
    }

    // =========================================================================
    // PAYLOAD
    // =========================================================================

    pub fn y_data(&self) -> Option<&[u8]> {
        self.y_data.as_deref()
    }

    pub fn y_data_hash(&self) -> ContentHash {
        self.y_data_hash
    }

    /// Replace the payload; the content hash is recomputed in the same call.
    pub fn set_y_data(&mut self, data: Option<Vec<u8>>) -> Result<(), ItemError> {
        self.check_not_frozen()?;
        self.y_data_hash = content_hash(data.as_deref());
        self.y_data = data;
        Ok(())
    }

    pub fn y_sign(&self) -> Option<&[u8]> {
        self.y_sign.as_deref()
    }

    pub fn set_y_sign(&mut self, signature: Option<Vec<u8>>) -> Result<(), ItemError> {
        self.check_not_frozen()?;
        self.y_sign = signature;
        Ok(())
    }

    /// Store `value` as a JSON payload and record its type and format.
    pub fn set_json_data<T: Serialize>(&mut self, value: &T) -> Result<(), ItemError> {
        self.check_not_frozen()?;
        let bytes = serde_json::to_vec(value).map_err(|e| ItemError::Serialization(e.to_string()))?;
        self.sys_props.set(sys_prop::S_ALG, SerialFormat::Json.code());
        self.sys_props.set(sys_prop::T_LEN, len_prop(bytes.len()));
        self.data_type_name = Some(std::any::type_name::<T>().to_string());
        self.set_y_data(Some(bytes))
    }

    /// Decode a JSON payload. `Ok(None)` when the item has no payload.
    pub fn json_data<T: DeserializeOwned>(&self) -> Result<Option<T>, ItemError> {
        match &self.y_data {
            None => Ok(None),
            Some(bytes) => serde_json::from_slice(bytes)
                .map(Some)
                .map_err(|e| ItemError::Serialization(e.to_string())),
        }
    }

    // =========================================================================
    // SIGNING
    // =========================================================================

    /// Sign the payload with `key_id`, recording `YSKI` and `YAlg`.
    pub fn sign(&mut self, signer: &dyn ItemSigner, key_id: &str) -> Result<(), ItemError> {
        self.check_not_frozen()?;
        let signature = signer.sign(key_id, self.y_data.as_deref().unwrap_or_default())?;
        self.sys_props.set(sys_prop::YSKI, key_id);
        self.sys_props.set(sys_prop::Y_ALG, signer.algorithm());
        self.y_sign = Some(signature);
        Ok(())
    }

    /// True when the item carries a signature that `verifier` accepts.
    pub fn is_signed(&self, verifier: &dyn ItemSigner) -> bool {
        match (&self.y_sign, self.sender_key_id()) {
            (Some(signature), Some(key_id)) => verifier.verify(
                &key_id,
                self.y_data.as_deref().unwrap_or_default(),
                signature,
            ),
            _ => false,
        }
    }

    /// True when the payload was encrypted for a recipient key.
    pub fn is_secret(&self) -> bool {
        self.sys_props.get_value_or::<i32>(sys_prop::Y_ALG, 0) > 0
            && self.recipient_key_id().is_some()
    }

    pub fn transport_key_id(&self) -> Option<String> {
        self.sys_props.get_value(sys_prop::XTKI)
    }

    pub fn sender_key_id(&self) -> Option<String> {
        self.sys_props.get_value(sys_prop::YSKI)
    }

    pub fn recipient_key_id(&self) -> Option<String> {
        self.sys_props.get_value(sys_prop::YRKI)
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Seal the envelope. Idempotent.
    ///
    /// Stamps `created`, resolves expiry, defaults the data type name and
    /// records the payload length under `YLen`.
    pub fn freeze(&mut self) -> Result<(), ItemError> {
        if self.frozen {
            return Ok(());
        }
        if self.name.trim().is_empty() {
            return Err(ItemError::NameNotSet);
        }
        self.created = Utc::now();
        self.expires = match self.expiry {
            ExpirySpec::Lifetime(lifetime) => resolve_lifetime(self.created, lifetime),
            ExpirySpec::At(at) => at.max(self.created),
        };
        if self.data_type_name.is_none() {
            self.data_type_name = Some(String::new());
        }
        let y_len = self.y_data.as_ref().map_or(0, Vec::len);
        self.sys_props.set(sys_prop::Y_LEN, len_prop(y_len));
        self.frozen = true;
        debug!(
            unique_name = %self.unique_name(),
            id = %self.id,
            expires = %self.expires,
            "Item frozen"
        );
        Ok(())
    }

    // =========================================================================
    // SIZING
    // =========================================================================

    /// Size estimate with default constants.
    pub fn estimated_size_in_bytes(&self, exclude_data_body: bool) -> usize {
        self.estimated_size_with(&SizeEstimate::default(), exclude_data_body)
    }

    /// Heuristic transport size of this item.
    pub fn estimated_size_with(&self, params: &SizeEstimate, exclude_data_body: bool) -> usize {
        let text_chars = self.name.chars().count()
            + self.data_type_name().chars().count()
            + self.app_scope.chars().count()
            + self.net_scope.as_deref().map_or(0, |s| s.chars().count());
        let mut raw = params.base_bytes
            + 2 * text_chars
            + self.app_props.serialised_len()
            + self.sys_props.serialised_len();
        if !exclude_data_body {
            raw += self.y_data.as_ref().map_or(0, Vec::len);
            raw += self.y_sign.as_ref().map_or(0, Vec::len);
        }
        raw * params.safety_factor
    }
}
