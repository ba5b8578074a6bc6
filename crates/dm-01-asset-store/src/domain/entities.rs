//! # Domain Entities
//!
//! Typed asset shapes and the record that carries them in and out of storage.
//!
//! Every kind the registry knows has exactly one case in [`AssetKind`] and one
//! case in [`Asset`], so dispatch on a decoded record is an exhaustive match.

use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Field that selects the variant of a payload or stored record.
pub const DISCRIMINATOR_FIELD: &str = "type";

/// Field under which the server-assigned identifier is stored.
pub const ID_FIELD: &str = "id";

/// Opaque asset identifier. Always generated server-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Generate a fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse a caller-supplied identifier.
    ///
    /// Only UUIDs are accepted; the result is normalised to the lowercase
    /// hyphenated form used when the id was generated. Anything else can never
    /// name a stored record.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw)
            .ok()
            .map(|uuid| Self(uuid.hyphenated().to_string()))
    }

    /// Wrap an id read back from a stored record as-is.
    pub(crate) fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the flat file the record is persisted under.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of asset kinds.
///
/// Discriminator strings live here and nowhere else; string-to-kind resolution
/// goes through [`crate::VariantRegistry::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetKind {
    /// Named document (`type1`).
    Document,
    /// Monetary payment (`type2`).
    Payment,
}

impl AssetKind {
    pub const DOCUMENT: &'static str = "type1";
    pub const PAYMENT: &'static str = "type2";

    pub const ALL: [AssetKind; 2] = [AssetKind::Document, AssetKind::Payment];

    /// Discriminator value carried in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Document => Self::DOCUMENT,
            AssetKind::Payment => Self::PAYMENT,
        }
    }

    /// Human-facing name, used for schema component names.
    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Document => "Document",
            AssetKind::Payment => "Payment",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields of a `type1` asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAsset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields of a `type2` asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentAsset {
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// A typed asset, one case per registered kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Asset {
    Document(DocumentAsset),
    Payment(PaymentAsset),
}

impl Asset {
    pub fn kind(&self) -> AssetKind {
        match self {
            Asset::Document(_) => AssetKind::Document,
            Asset::Payment(_) => AssetKind::Payment,
        }
    }

    /// Build the typed shape for `kind` from its declared fields.
    ///
    /// The map must not contain the discriminator or the id.
    pub(crate) fn from_fields(
        kind: AssetKind,
        fields: Map<String, Value>,
    ) -> Result<Self, serde_json::Error> {
        let fields = Value::Object(fields);
        Ok(match kind {
            AssetKind::Document => Asset::Document(serde_json::from_value(fields)?),
            AssetKind::Payment => Asset::Payment(serde_json::from_value(fields)?),
        })
    }

    /// Declared fields of this asset as a JSON map (no discriminator, no id).
    pub fn to_fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let value = match self {
            Asset::Document(doc) => serde_json::to_value(doc)?,
            Asset::Payment(payment) => serde_json::to_value(payment)?,
        };
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(serde_json::Error::custom(
                "asset fields must serialize as an object",
            )),
        }
    }
}

/// A decoded, kind-tagged asset together with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub id: AssetId,
    pub asset: Asset,
}

impl AssetRecord {
    pub fn kind(&self) -> AssetKind {
        self.asset.kind()
    }
}

/// Serializes flattened: `{"id": .., "type": .., <fields>}`.
impl Serialize for AssetRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let fields = self.asset.to_fields().map_err(S::Error::custom)?;
        let mut map = serializer.serialize_map(Some(fields.len() + 2))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        map.serialize_entry(DISCRIMINATOR_FIELD, self.kind().as_str())?;
        for (name, value) in &fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Output of a successful encode: the fresh id and the bytes to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAsset {
    pub id: AssetId,
    pub bytes: Vec<u8>,
}
