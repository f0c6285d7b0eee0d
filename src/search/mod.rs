//! Search query parameters
//!
//! A `SearchQuery` is validated before anything is fetched and renders to a
//! canonical path: identical queries always produce identical paths, and so
//! share a cache entry.

use crate::{FaError, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use url::form_urlencoded;

/// Result page sizes the site accepts
pub const PER_PAGE_CHOICES: [u32; 3] = [24, 48, 72];

/// A closed set of values accepted for one search parameter
pub trait Choice: Sized + Copy + Ord + 'static {
    /// Parameter name used in error messages
    const PARAM: &'static str;
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                FaError::InvalidSearchParameters(format!(
                    "{} must be one of {}, got '{}'",
                    Self::PARAM,
                    allowed.join(", "),
                    value
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    Relevancy,
    Date,
    Popularity,
}

impl Choice for OrderBy {
    const PARAM: &'static str = "order_by";
    const ALL: &'static [Self] = &[Self::Relevancy, Self::Date, Self::Popularity];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Relevancy => "relevancy",
            Self::Date => "date",
            Self::Popularity => "popularity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl Choice for OrderDirection {
    const PARAM: &'static str = "order_direction";
    const ALL: &'static [Self] = &[Self::Asc, Self::Desc];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Range {
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "3days")]
    ThreeDays,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "all")]
    All,
}

impl Choice for Range {
    const PARAM: &'static str = "range";
    const ALL: &'static [Self] = &[
        Self::Day,
        Self::ThreeDays,
        Self::Week,
        Self::Month,
        Self::All,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::ThreeDays => "3days",
            Self::Week => "week",
            Self::Month => "month",
            Self::All => "all",
        }
    }
}

/// How the words of `q` are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    All,
    Any,
    Extended,
}

impl Choice for Mode {
    const PARAM: &'static str = "mode";
    const ALL: &'static [Self] = &[Self::All, Self::Any, Self::Extended];

    fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
            Self::Extended => "extended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    General,
    Mature,
    Adult,
}

impl Choice for Rating {
    const PARAM: &'static str = "rating";
    const ALL: &'static [Self] = &[Self::General, Self::Mature, Self::Adult];

    fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Mature => "mature",
            Self::Adult => "adult",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    Art,
    Flash,
    Photo,
    Music,
    Story,
    Poetry,
}

impl Choice for SubmissionType {
    const PARAM: &'static str = "type";
    const ALL: &'static [Self] = &[
        Self::Art,
        Self::Flash,
        Self::Photo,
        Self::Music,
        Self::Story,
        Self::Poetry,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Art => "art",
            Self::Flash => "flash",
            Self::Photo => "photo",
            Self::Music => "music",
            Self::Story => "story",
            Self::Poetry => "poetry",
        }
    }
}

/// A full-text submission search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub q: String,
    pub page: u32,
    pub per_page: u32,
    pub order_by: OrderBy,
    pub order_direction: OrderDirection,
    pub range: Range,
    pub mode: Mode,
    pub ratings: BTreeSet<Rating>,
    pub types: BTreeSet<SubmissionType>,
}

impl SearchQuery {
    /// A query for `q` with the site's default filters
    ///
    /// Newest first over all time, extended syntax, every rating and type,
    /// 72 results per page.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            page: 1,
            per_page: 72,
            order_by: OrderBy::Date,
            order_direction: OrderDirection::Desc,
            range: Range::All,
            mode: Mode::Extended,
            ratings: Rating::ALL.iter().copied().collect(),
            types: SubmissionType::ALL.iter().copied().collect(),
        }
    }

    /// Builds a query from loose key/value parameters
    ///
    /// Recognized keys are `q`, `page`, `perpage`, `order_by`,
    /// `order_direction`, `range`, `mode`, and the comma-separated `rating`
    /// and `type`. Other keys are ignored. The result is validated.
    pub fn from_params<K, V>(params: &[(K, V)]) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::new("");

        for (key, value) in params {
            let value = value.as_ref();
            match key.as_ref() {
                "q" => query.q = value.to_string(),
                "page" => query.page = parse_number("page", value)?,
                "perpage" => query.per_page = parse_number("perpage", value)?,
                "order_by" => query.order_by = OrderBy::parse(value)?,
                "order_direction" => query.order_direction = OrderDirection::parse(value)?,
                "range" => query.range = Range::parse(value)?,
                "mode" => query.mode = Mode::parse(value)?,
                "rating" => query.ratings = parse_set(value)?,
                "type" => query.types = parse_set(value)?,
                other => tracing::debug!("Ignoring search parameter '{}'", other),
            }
        }

        query.validate()?;
        Ok(query)
    }

    /// Checks the parts of the query the types cannot rule out
    pub fn validate(&self) -> Result<()> {
        if self.q.trim().is_empty() {
            return invalid("q must not be blank");
        }
        if self.page < 1 {
            return invalid("page must be at least 1");
        }
        if !PER_PAGE_CHOICES.contains(&self.per_page) {
            return invalid(&format!(
                "perpage must be one of 24, 48, 72, got {}",
                self.per_page
            ));
        }
        if self.ratings.is_empty() {
            return invalid("at least one rating must be selected");
        }
        if self.types.is_empty() {
            return invalid("at least one type must be selected");
        }
        Ok(())
    }

    /// Site path for this query, relative to the origin
    pub fn to_path(&self) -> String {
        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair("q", self.q.trim())
            .append_pair("page", &self.page.to_string())
            .append_pair("perpage", &self.per_page.to_string())
            .append_pair("order-by", self.order_by.as_str())
            .append_pair("order-direction", self.order_direction.as_str())
            .append_pair("range", self.range.as_str())
            .append_pair("mode", self.mode.as_str());

        for rating in &self.ratings {
            form.append_pair(&format!("rating-{}", rating.as_str()), "1");
        }
        for kind in &self.types {
            form.append_pair(&format!("type-{}", kind.as_str()), "1");
        }

        format!("search/?{}", form.finish())
    }
}

fn invalid(reason: &str) -> Result<()> {
    Err(FaError::InvalidSearchParameters(reason.to_string()))
}

fn parse_number(param: &str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| {
        FaError::InvalidSearchParameters(format!(
            "{} must be a positive number, got '{}'",
            param, value
        ))
    })
}

fn parse_set<T: Choice>(value: &str) -> Result<BTreeSet<T>> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(T::parse)
        .collect()
}
