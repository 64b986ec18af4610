//! Common types shared across the Zenn listing tools.
//!
//! Both tools accept the same argument shape. The typed parameter structs
//! live in `article.rs` / `book.rs` (their schema descriptions differ); the
//! decoding helpers, defaults and post-validation live here.

use std::fmt;
use std::str::FromStr;

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::{self, DeserializeOwned, Deserializer, Unexpected, Visitor};
use serde_json::Value;

use crate::domains::tools::ValidationError;

/// Default page requested when the caller does not provide one.
pub const DEFAULT_PAGE: u32 = 1;

/// Default number of entries per page.
pub const DEFAULT_COUNT: u32 = 48;

/// Ordered query-string pairs sent to the upstream API.
pub type QueryParams = Vec<(&'static str, String)>;

// ============================================================================
// Enumerations
// ============================================================================

/// Which listing a tool call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Article,
    Book,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::Article, ToolKind::Book];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
        }
    }

    /// Upstream path segment serving this kind of listing.
    pub fn resource(&self) -> ResourcePath {
        ResourcePath::from(*self)
    }
}

impl FromStr for ToolKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidToolKind(s.to_string()))
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream API path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourcePath {
    Articles,
    Books,
}

impl ResourcePath {
    pub const ALL: [ResourcePath; 2] = [ResourcePath::Articles, ResourcePath::Books];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Articles => "articles",
            Self::Books => "books",
        }
    }

    /// Tool kind served by this path segment.
    pub fn kind(&self) -> ToolKind {
        ToolKind::from(*self)
    }
}

impl From<ToolKind> for ResourcePath {
    fn from(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Article => Self::Articles,
            ToolKind::Book => Self::Books,
        }
    }
}

impl From<ResourcePath> for ToolKind {
    fn from(resource: ResourcePath) -> Self {
        match resource {
            ResourcePath::Articles => Self::Article,
            ResourcePath::Books => Self::Book,
        }
    }
}

impl FromStr for ResourcePath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidResource(s.to_string()))
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order of a listing.
///
/// Its schema is inlined into the tool input schemas as a plain string enum.
/// Parsing goes through `FromStr`, which is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[schemars(rename_all = "lowercase")]
#[schemars(inline)]
pub enum SortOrder {
    #[default]
    Latest,
    Oldest,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [SortOrder::Latest, SortOrder::Oldest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Oldest => "oldest",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidOrder(s.to_string()))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Parameter decoding
// ============================================================================

/// Default `order` for the parameter structs.
pub fn default_order() -> Option<String> {
    Some(SortOrder::default().as_str().to_string())
}

/// Default `page` for the parameter structs.
pub fn default_page() -> Option<i64> {
    Some(DEFAULT_PAGE.into())
}

/// Default `count` for the parameter structs.
pub fn default_count() -> Option<i64> {
    Some(DEFAULT_COUNT.into())
}

/// Decode tool arguments into a typed parameter struct.
///
/// Unknown keys and wrongly typed values surface as
/// `ValidationError::InvalidArguments`.
pub fn parse_params<P: DeserializeOwned>(arguments: &JsonObject) -> Result<P, ValidationError> {
    serde_json::from_value(Value::Object(arguments.clone()))
        .map_err(|e| ValidationError::InvalidArguments(e.to_string()))
}

/// Serde `deserialize_with` helper for `page` / `count`.
///
/// Accepts integers, integral floats (`10.0`) and numeric strings (`"2"`).
/// `null` decodes to `None`, which [`ListingQuery::new`] treats as absent.
/// Range checks happen there too.
pub fn deserialize_lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientInteger)
}

struct LenientInteger;

impl<'de> Visitor<'de> for LenientInteger {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(Some)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.is_finite() && v.fract() == 0.0 {
            Ok(Some(v as i64))
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(Some(n));
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(Some(f as i64)),
            _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

// ============================================================================
// Listing query
// ============================================================================

/// Validated listing query shared by articles and books.
///
/// Fields are private: once built, a query cannot be changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    username: Option<String>,
    topicname: Option<String>,
    order: SortOrder,
    page: u32,
    count: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            username: None,
            topicname: None,
            order: SortOrder::default(),
            page: DEFAULT_PAGE,
            count: DEFAULT_COUNT,
        }
    }
}

impl ListingQuery {
    /// Validate decoded parameters, applying defaults for absent values.
    pub fn new(
        username: Option<String>,
        topicname: Option<String>,
        order: Option<&str>,
        page: Option<i64>,
        count: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let order = match order {
            Some(order) => order.parse()?,
            None => SortOrder::default(),
        };

        Ok(Self {
            username,
            topicname,
            order,
            page: positive_integer("page", page, DEFAULT_PAGE)?,
            count: positive_integer("count", count, DEFAULT_COUNT)?,
        })
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn topicname(&self) -> Option<&str> {
        self.topicname.as_deref()
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Flatten into upstream query parameters.
    ///
    /// Empty `username`/`topicname` are omitted; present ones are lower-cased.
    /// `order`, `page` and `count` are always emitted.
    pub fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::with_capacity(5);

        if let Some(username) = self.username.as_deref().filter(|s| !s.is_empty()) {
            params.push(("username", username.to_lowercase()));
        }
        if let Some(topicname) = self.topicname.as_deref().filter(|s| !s.is_empty()) {
            params.push(("topicname", topicname.to_lowercase()));
        }

        params.push(("order", self.order.as_str().to_string()));
        params.push(("page", self.page.to_string()));
        params.push(("count", self.count.to_string()));

        params
    }
}

fn positive_integer(
    field: &'static str,
    value: Option<i64>,
    default: u32,
) -> Result<u32, ValidationError> {
    let Some(number) = value else {
        return Ok(default);
    };

    if number < 1 {
        return Err(ValidationError::invalid_field(
            field,
            format!("must be a positive integer, got {}", number),
        ));
    }

    u32::try_from(number)
        .map_err(|_| ValidationError::invalid_field(field, format!("{} is too large", number)))
}
