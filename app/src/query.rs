//! List filters
//!
//! The list page accepts two optional filters: a substring of the
//! substation name and an exact breaker name. [`QuerySpec::build`] turns
//! them into one of four query shapes and [`QuerySpec::select`] applies the
//! shape to a SeaORM select.

use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{EntityTrait, QueryFilter, QueryOrder, Select};
use serde::Deserialize;
use web::Request;

use crate::models::substations::{Column, Entity, Model};

/// How the substation-name filter compares text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameMatch {
    #[default]
    CaseInsensitive,
    CaseSensitive,
}

/// Raw filter inputs from the list page query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilters {
    pub substation_name: Option<String>,
    pub breaker_name: Option<String>,
}

impl ListFilters {
    /// Read filters from the query string; a malformed one counts as empty
    pub fn from_request(req: &Request) -> Self {
        req.query().unwrap_or_default()
    }

    pub fn spec(&self) -> QuerySpec {
        QuerySpec::build(self.substation_name.as_deref(), self.breaker_name.as_deref())
    }
}

/// The shape of a list query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySpec {
    All,
    Name(String),
    Breaker(String),
    NameAndBreaker { name: String, breaker: String },
}

impl QuerySpec {
    /// Blank or whitespace-only inputs count as absent
    pub fn build(name: Option<&str>, breaker: Option<&str>) -> Self {
        let present = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match (present(name), present(breaker)) {
            (None, None) => Self::All,
            (Some(name), None) => Self::Name(name),
            (None, Some(breaker)) => Self::Breaker(breaker),
            (Some(name), Some(breaker)) => Self::NameAndBreaker { name, breaker },
        }
    }

    /// Substring filter on the substation name, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) | Self::NameAndBreaker { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Exact filter on the breaker name, if any
    pub fn breaker(&self) -> Option<&str> {
        match self {
            Self::Breaker(breaker) | Self::NameAndBreaker { breaker, .. } => Some(breaker),
            _ => None,
        }
    }

    /// Select matching rows, oldest first
    ///
    /// The name predicate only narrows the fetch. SQLite's `LIKE` ignores
    /// ASCII case no matter what and its `LOWER()` folds ASCII only, so a
    /// case-insensitive non-ASCII needle gets no SQL predicate at all. Callers
    /// must check rows with [`matches`](Self::matches).
    pub fn select(&self, matching: NameMatch) -> Select<Entity> {
        let mut query = Entity::find();

        if let Some(name) = self.name() {
            let column = Expr::col((Entity, Column::SubstationName));
            match matching {
                NameMatch::CaseInsensitive if name.is_ascii() => {
                    query = query.filter(
                        Expr::expr(Func::lower(column))
                            .like(contains_pattern(&name.to_ascii_lowercase())),
                    );
                }
                NameMatch::CaseInsensitive => {}
                NameMatch::CaseSensitive => {
                    query = query.filter(column.like(contains_pattern(name)));
                }
            }
        }

        if let Some(breaker) = self.breaker() {
            query = query.filter(Expr::col((Entity, Column::BreakerName)).eq(breaker));
        }

        query.order_by_asc(Column::Id)
    }

    /// Whether `record` satisfies this spec
    pub fn matches(&self, record: &Model, matching: NameMatch) -> bool {
        let name_ok = match self.name() {
            None => true,
            Some(name) => match matching {
                NameMatch::CaseSensitive => record.substation_name.contains(name),
                NameMatch::CaseInsensitive => record
                    .substation_name
                    .to_lowercase()
                    .contains(&name.to_lowercase()),
            },
        };
        let breaker_ok = self.breaker().map_or(true, |b| record.breaker_name == b);
        name_ok && breaker_ok
    }
}

/// `%needle%` with LIKE wildcards in `needle` escaped
fn contains_pattern(needle: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sea_orm::{DbBackend, QueryTrait};

    fn record(name: &str, breaker: &str) -> Model {
        Model {
            id: 1,
            substation_name: name.into(),
            full_name: None,
            project_number: None,
            breaker_name: breaker.into(),
            feeding_station_details: "Line 1".into(),
            bay_name: "Bay 1".into(),
        }
    }

    #[test]
    fn test_build_covers_four_shapes() {
        assert_eq!(QuerySpec::build(None, None), QuerySpec::All);
        assert_eq!(QuerySpec::build(Some("  "), Some("")), QuerySpec::All);
        assert_eq!(
            QuerySpec::build(Some(" North "), None),
            QuerySpec::Name("North".into())
        );
        assert_eq!(
            QuerySpec::build(None, Some("B1")),
            QuerySpec::Breaker("B1".into())
        );
        assert_eq!(
            QuerySpec::build(Some("North"), Some("B1")),
            QuerySpec::NameAndBreaker {
                name: "North".into(),
                breaker: "B1".into()
            }
        );
    }

    #[test]
    fn test_filters_from_query_string() {
        let req = Request::builder()
            .get("/?substation_name=North&breaker_name=")
            .build();
        assert_eq!(
            ListFilters::from_request(&req).spec(),
            QuerySpec::Name("North".into())
        );
    }

    #[test]
    fn test_select_sql() {
        let spec = QuerySpec::NameAndBreaker {
            name: "50%_A".into(),
            breaker: "B1".into(),
        };
        let stmt = spec
            .select(NameMatch::CaseInsensitive)
            .build(DbBackend::Sqlite);

        assert!(stmt.sql.contains(r#"LOWER("substations"."substation_name") LIKE ?"#));
        assert!(stmt.sql.contains("ESCAPE"));
        assert!(stmt.sql.contains(r#""substations"."breaker_name" = ?"#));
        assert!(stmt.sql.ends_with(r#"ORDER BY "substations"."id" ASC"#));

        let values = stmt.values.map(|v| v.0).unwrap_or_default();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1], sea_orm::Value::from("B1"));
    }

    #[test]
    fn test_non_ascii_needle_leaves_name_to_matches() {
        let sql = QuerySpec::Name("Ümspann".into())
            .select(NameMatch::CaseInsensitive)
            .build(DbBackend::Sqlite)
            .sql;
        assert!(!sql.contains("LIKE"));

        let sql = QuerySpec::Name("Ümspann".into())
            .select(NameMatch::CaseSensitive)
            .build(DbBackend::Sqlite)
            .sql;
        assert!(sql.contains(r#""substations"."substation_name" LIKE ?"#));
    }

    #[test]
    fn test_all_has_no_where_clause() {
        let sql = QuerySpec::All
            .select(NameMatch::CaseSensitive)
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_matches_respects_case_setting() {
        let north = record("North Yard", "B1");
        let spec = QuerySpec::Name("north".into());

        assert!(spec.matches(&north, NameMatch::CaseInsensitive));
        assert!(!spec.matches(&north, NameMatch::CaseSensitive));
        assert!(!QuerySpec::Breaker("b1".into()).matches(&north, NameMatch::CaseInsensitive));
        assert!(QuerySpec::All.matches(&north, NameMatch::CaseSensitive));

        let ecole = record("ÉCOLE Sub", "B2");
        assert!(QuerySpec::Name("école".into()).matches(&ecole, NameMatch::CaseInsensitive));
        assert!(!QuerySpec::Name("école".into()).matches(&ecole, NameMatch::CaseSensitive));
    }
}
