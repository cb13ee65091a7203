// src/db/filters.rs

use sqlx::{Postgres, QueryBuilder};
use crate::common::params::DateRange;

/// Acrescenta `WHERE alias.data >= .. AND alias.data <= ..` conforme as pontas presentes.
pub(crate) fn push_date_range(qb: &mut QueryBuilder<'_, Postgres>, alias: &str, range: &DateRange) {
    let mut separator = " WHERE ";
    if let Some(from) = range.from {
        qb.push(separator).push(format!("{alias}.data >= ")).push_bind(from);
        separator = " AND ";
    }
    if let Some(to) = range.to {
        qb.push(separator).push(format!("{alias}.data <= ")).push_bind(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn no_bounds_means_no_where() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM fact_producao p");
        push_date_range(&mut qb, "p", &DateRange::default());
        assert_eq!(qb.sql(), "SELECT 1 FROM fact_producao p");
    }

    #[test]
    fn both_bounds_are_inclusive() {
        let range = DateRange {
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            to: NaiveDate::from_ymd_opt(2024, 1, 31),
        };
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM fact_descarte d");
        push_date_range(&mut qb, "d", &range);
        assert_eq!(
            qb.sql(),
            "SELECT 1 FROM fact_descarte d WHERE d.data >= $1 AND d.data <= $2"
        );
    }

    #[test]
    fn only_upper_bound() {
        let range = DateRange { from: None, to: NaiveDate::from_ymd_opt(2024, 1, 31) };
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM fact_producao p");
        push_date_range(&mut qb, "p", &range);
        assert_eq!(qb.sql(), "SELECT 1 FROM fact_producao p WHERE p.data <= $1");
    }
}
