//! SOQL query construction for the Salesforce integration.
//!
//! Queries are assembled from validated identifiers and escaped literals so
//! that user-supplied values (search boxes, property names) cannot change the
//! shape of the query.
//!
//! ```
//! use landmark::soql::{Direction, SoqlBuilder};
//!
//! let query = SoqlBuilder::new("Opportunity")
//!     .select(["Id", "Name", "Account.Name"])
//!     .where_eq("StageName", "Closed Won")
//!     .order_by("CloseDate", Direction::Desc)
//!     .limit(10)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     query,
//!     "SELECT Id, Name, Account.Name FROM Opportunity \
//!      WHERE StageName = 'Closed Won' ORDER BY CloseDate DESC LIMIT 10"
//! );
//! ```

use crate::error::{LandmarkError, Result};
use std::fmt;
use tracing::debug;

/// Largest OFFSET Salesforce accepts.
pub const MAX_OFFSET: u32 = 2000;

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "ASC"),
            Direction::Desc => write!(f, "DESC"),
        }
    }
}

/// A literal value in a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub enum SoqlValue {
    /// Quoted and escaped string.
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Null,
    /// Unquoted date or date literal, e.g. `2024-01-31`, `TODAY`, `LAST_N_DAYS:30`.
    DateLiteral(String),
}

impl SoqlValue {
    fn render(&self) -> Result<String> {
        match self {
            SoqlValue::Text(s) => Ok(format!("'{}'", escape(s))),
            SoqlValue::Integer(n) => Ok(n.to_string()),
            SoqlValue::Decimal(x) => {
                if !x.is_finite() {
                    return Err(LandmarkError::query(format!(
                        "Decimal value {} cannot be expressed in SOQL",
                        x
                    )));
                }
                Ok(x.to_string())
            }
            SoqlValue::Boolean(b) => Ok(b.to_string()),
            SoqlValue::Null => Ok("null".to_string()),
            SoqlValue::DateLiteral(s) => {
                let valid = !s.is_empty()
                    && s.chars().all(|c| {
                        c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-' | '+' | '.')
                    });
                if !valid {
                    return Err(LandmarkError::query(format!("Invalid date literal '{}'", s)));
                }
                Ok(s.clone())
            }
        }
    }
}

impl From<&str> for SoqlValue {
    fn from(s: &str) -> Self {
        SoqlValue::Text(s.to_string())
    }
}

impl From<String> for SoqlValue {
    fn from(s: String) -> Self {
        SoqlValue::Text(s)
    }
}

impl From<i64> for SoqlValue {
    fn from(n: i64) -> Self {
        SoqlValue::Integer(n)
    }
}

impl From<i32> for SoqlValue {
    fn from(n: i32) -> Self {
        SoqlValue::Integer(n.into())
    }
}

impl From<f64> for SoqlValue {
    fn from(x: f64) -> Self {
        SoqlValue::Decimal(x)
    }
}

impl From<bool> for SoqlValue {
    fn from(b: bool) -> Self {
        SoqlValue::Boolean(b)
    }
}

/// Escapes a string for use inside single quotes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Checks an object or field name, allowing relationship paths like `Account.Owner.Name`.
pub fn validate_identifier(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.split('.').all(|segment| {
            segment
                .chars()
                .next()
                .map_or(false, |c| c.is_ascii_alphabetic())
                && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if valid {
        Ok(())
    } else {
        Err(LandmarkError::query(format!("Invalid identifier '{}'", name)))
    }
}

#[derive(Debug, Clone)]
enum Condition {
    Compare {
        field: String,
        op: &'static str,
        value: SoqlValue,
    },
    In {
        field: String,
        values: Vec<SoqlValue>,
        negated: bool,
    },
    Raw(String),
}

impl Condition {
    fn render(&self) -> Result<String> {
        match self {
            Condition::Compare { field, op, value } => {
                validate_identifier(field)?;
                Ok(format!("{} {} {}", field, op, value.render()?))
            }
            Condition::In {
                field,
                values,
                negated,
            } => {
                validate_identifier(field)?;
                if values.is_empty() {
                    return Err(LandmarkError::query(format!(
                        "IN list for '{}' must not be empty",
                        field
                    )));
                }
                let rendered = values
                    .iter()
                    .map(SoqlValue::render)
                    .collect::<Result<Vec<_>>>()?;
                let op = if *negated { "NOT IN" } else { "IN" };
                Ok(format!("{} {} ({})", field, op, rendered.join(", ")))
            }
            Condition::Raw(clause) => Ok(format!("({})", clause)),
        }
    }
}

/// Builder for SOQL SELECT statements.
///
/// Conditions are joined with `AND`.
#[derive(Debug, Clone)]
pub struct SoqlBuilder {
    object: String,
    fields: Vec<String>,
    count: bool,
    conditions: Vec<Condition>,
    order_by: Vec<(String, Direction)>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl SoqlBuilder {
    /// Starts a query against `object` (e.g. `Account`, `Property__c`).
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            fields: Vec::new(),
            count: false,
            conditions: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Adds fields to the select list.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Selects `COUNT()` instead of fields.
    pub fn count(mut self) -> Self {
        self.count = true;
        self
    }

    /// Adds `field = value`.
    pub fn where_eq(self, field: impl Into<String>, value: impl Into<SoqlValue>) -> Self {
        self.compare(field, "=", value.into())
    }

    /// Adds `field != value`.
    pub fn where_ne(self, field: impl Into<String>, value: impl Into<SoqlValue>) -> Self {
        self.compare(field, "!=", value.into())
    }

    /// Adds `field > value`.
    pub fn where_gt(self, field: impl Into<String>, value: impl Into<SoqlValue>) -> Self {
        self.compare(field, ">", value.into())
    }

    /// Adds `field < value`.
    pub fn where_lt(self, field: impl Into<String>, value: impl Into<SoqlValue>) -> Self {
        self.compare(field, "<", value.into())
    }

    /// Adds `field LIKE 'pattern'`; `%` and `_` keep their wildcard meaning.
    pub fn where_like(self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.compare(field, "LIKE", SoqlValue::Text(pattern.into()))
    }

    /// Adds `field IN (values)`.
    pub fn where_in<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SoqlValue>,
    {
        self.conditions.push(Condition::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        });
        self
    }

    /// Adds `field NOT IN (values)`.
    pub fn where_not_in<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SoqlValue>,
    {
        self.conditions.push(Condition::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        });
        self
    }

    /// Adds a pre-built clause verbatim, wrapped in parentheses.
    ///
    /// The clause is not validated; never pass user input here.
    pub fn where_raw(mut self, clause: impl Into<String>) -> Self {
        self.conditions.push(Condition::Raw(clause.into()));
        self
    }

    /// Appends an ORDER BY key.
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push((field.into(), direction));
        self
    }

    /// Sets LIMIT.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets OFFSET (at most [`MAX_OFFSET`]).
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    fn compare(mut self, field: impl Into<String>, op: &'static str, value: SoqlValue) -> Self {
        self.conditions.push(Condition::Compare {
            field: field.into(),
            op,
            value,
        });
        self
    }

    /// Renders the query string.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The object or any field name is not a valid identifier
    /// - Neither fields nor `COUNT()` were selected
    /// - An IN list is empty or a literal cannot be rendered
    /// - The offset exceeds [`MAX_OFFSET`]
    pub fn build(&self) -> Result<String> {
        validate_identifier(&self.object)?;

        let select = if self.count {
            "COUNT()".to_string()
        } else {
            if self.fields.is_empty() {
                return Err(LandmarkError::query(format!(
                    "No fields selected from '{}'",
                    self.object
                )));
            }
            for field in &self.fields {
                validate_identifier(field)?;
            }
            self.fields.join(", ")
        };

        let mut query = format!("SELECT {} FROM {}", select, self.object);

        if !self.conditions.is_empty() {
            let clauses = self
                .conditions
                .iter()
                .map(Condition::render)
                .collect::<Result<Vec<_>>>()?;
            query.push_str(" WHERE ");
            query.push_str(&clauses.join(" AND "));
        }

        if !self.order_by.is_empty() {
            let keys = self
                .order_by
                .iter()
                .map(|(field, direction)| -> Result<String> {
                    validate_identifier(field)?;
                    Ok(format!("{} {}", field, direction))
                })
                .collect::<Result<Vec<_>>>()?;
            query.push_str(" ORDER BY ");
            query.push_str(&keys.join(", "));
        }

        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            if offset > MAX_OFFSET {
                return Err(LandmarkError::query(format!(
                    "OFFSET {} exceeds maximum of {}",
                    offset, MAX_OFFSET
                )));
            }
            query.push_str(&format!(" OFFSET {}", offset));
        }

        debug!(object = %self.object, conditions = self.conditions.len(), "Built SOQL query");

        Ok(query)
    }
}
