//! Filter definitions and the [`FilterStore`] that holds their current values.

use crate::framework::{ListError, ListRecord};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};
use std::collections::BTreeMap;

/// How a filter value is compared against a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterKind {
    /// The record field of the same name must equal the value.
    Equals,
    /// The record timestamp, read in the viewer's zone, must fall on the
    /// calendar day given as `YYYY-MM-DD`.
    SameDay,
    /// Case-insensitive substring match against any of the listed fields.
    Search { fields: Vec<&'static str> },
}

/// Declares one named filter of a list view.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub name: &'static str,
    pub kind: FilterKind,
    /// Value the filter starts with and returns to on reset.
    pub default: &'static str,
    /// Values meaning "no constraint". The empty string is always one of them.
    pub sentinels: Vec<&'static str>,
}

impl FilterSpec {
    pub fn equals(name: &'static str) -> Self {
        Self {
            name,
            kind: FilterKind::Equals,
            default: "",
            sentinels: Vec::new(),
        }
    }

    pub fn same_day(name: &'static str) -> Self {
        Self {
            name,
            kind: FilterKind::SameDay,
            default: "",
            sentinels: Vec::new(),
        }
    }

    pub fn search(name: &'static str, fields: &[&'static str]) -> Self {
        Self {
            name,
            kind: FilterKind::Search {
                fields: fields.to_vec(),
            },
            default: "",
            sentinels: Vec::new(),
        }
    }

    pub fn with_sentinel(mut self, sentinel: &'static str) -> Self {
        self.sentinels.push(sentinel);
        self
    }

    pub fn with_default(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }

    pub fn is_sentinel(&self, value: &str) -> bool {
        value.is_empty() || self.sentinels.iter().any(|s| *s == value)
    }

    fn validate(&self, value: &str) -> Result<(), ListError> {
        if self.kind == FilterKind::SameDay && !self.is_sentinel(value) {
            parse_day(value)?;
        }
        Ok(())
    }
}

/// A label/value pair rendered as a filter tab.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTab {
    pub label: &'static str,
    pub value: &'static str,
}

/// The tab strip of a view: which filter the tabs drive and the tabs themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTabs {
    pub filter: &'static str,
    pub tabs: Vec<FilterTab>,
}

/// The time zone calendar dates are read in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ViewerZone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl ViewerZone {
    pub fn utc() -> Self {
        ViewerZone::Fixed(Utc.fix())
    }

    /// Calendar date of `instant` as seen by the viewer.
    pub fn date_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        match self {
            ViewerZone::Local => instant.with_timezone(&Local).date_naive(),
            ViewerZone::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }
}

fn parse_day(value: &str) -> Result<NaiveDate, ListError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| ListError::Validation(format!("invalid date '{value}': {e}")))
}

/// Current filter values for one view.
///
/// Values are kept in a `BTreeMap` so resolved query parameters come out in a
/// stable order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStore {
    specs: Vec<FilterSpec>,
    values: BTreeMap<String, String>,
}

impl FilterStore {
    pub fn new(specs: Vec<FilterSpec>) -> Self {
        let values = specs
            .iter()
            .map(|spec| (spec.name.to_string(), spec.default.to_string()))
            .collect();
        Self { specs, values }
    }

    fn spec(&self, name: &str) -> Result<&FilterSpec, ListError> {
        self.specs
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| ListError::Validation(format!("unknown filter '{name}'")))
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ListError> {
        self.spec(name)?.validate(value)?;
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Puts a filter back to "no constraint".
    pub fn clear(&mut self, name: &str) -> Result<(), ListError> {
        self.spec(name)?;
        self.values.insert(name.to_string(), String::new());
        Ok(())
    }

    pub fn reset(&mut self) {
        for spec in &self.specs {
            self.values
                .insert(spec.name.to_string(), spec.default.to_string());
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Filters whose current value constrains the result.
    pub fn active(&self) -> impl Iterator<Item = (&FilterSpec, &str)> {
        self.specs.iter().filter_map(|spec| {
            let value = self.value(spec.name)?;
            (!spec.is_sentinel(value)).then_some((spec, value))
        })
    }

    /// Parameters for a remote query, sentinel values omitted.
    pub fn resolve_query_params(&self) -> BTreeMap<String, String> {
        self.active()
            .map(|(spec, value)| (spec.name.to_string(), value.to_string()))
            .collect()
    }

    /// Compiles the active filters into a predicate over records.
    pub fn predicate(&self, zone: ViewerZone) -> RecordPredicate<'_> {
        let clauses = self
            .active()
            .filter_map(|(spec, value)| match &spec.kind {
                FilterKind::Equals => Some(Clause::Equals {
                    field: spec.name,
                    value,
                }),
                // validated on set, an unparseable value cannot be stored
                FilterKind::SameDay => parse_day(value).ok().map(Clause::SameDay),
                FilterKind::Search { fields } => Some(Clause::Contains {
                    fields,
                    needle: value.to_lowercase(),
                }),
            })
            .collect();
        RecordPredicate { clauses, zone }
    }
}

#[derive(Debug)]
enum Clause<'a> {
    Equals { field: &'a str, value: &'a str },
    SameDay(NaiveDate),
    Contains {
        fields: &'a [&'static str],
        needle: String,
    },
}

/// Conjunction of the active filters of a [`FilterStore`].
#[derive(Debug)]
pub struct RecordPredicate<'a> {
    clauses: Vec<Clause<'a>>,
    zone: ViewerZone,
}

impl RecordPredicate<'_> {
    pub fn matches<T: ListRecord>(&self, record: &T) -> bool {
        self.clauses.iter().all(|clause| match clause {
            Clause::Equals { field, value } => {
                record.field(field).is_some_and(|actual| actual == *value)
            }
            Clause::SameDay(day) => record
                .timestamp()
                .is_some_and(|ts| self.zone.date_of(&ts) == *day),
            Clause::Contains { fields, needle } => fields.iter().any(|field| {
                record
                    .field(field)
                    .is_some_and(|actual| actual.to_lowercase().contains(needle.as_str()))
            }),
        })
    }
}
