// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures: SQL++ trees as the parser would hand them over
//!
//! Variables carry the parser's `$` prefix and every projection is named,
//! so `SELECT x FROM t AS x` has the projection `$x AS x`.

use qcert_sqlpp::{
    Expr, FromClause, FromTerm, GroupKey, GroupbyClause, OperatorType, Projection, Query,
    SelectBlock, SelectClause, SelectExpression, SelectSetOperation, SetOpType,
    SetOperationInput, SetOperationRight, VariableExpr,
};

/// Sample SQL++ queries for testing
pub struct SqlppFixtures;

impl SqlppFixtures {
    // ===== Basic SELECT queries =====

    /// `SELECT x FROM t AS x WHERE x > 1`
    pub fn select_where() -> Query {
        Query::select(SelectExpression::from_block(Self::select_where_block()))
    }

    /// The SELECT block of [`select_where`](Self::select_where)
    pub fn select_where_block() -> SelectBlock {
        SelectBlock::new(
            SelectClause::regular(vec![Projection::named(Expr::var("$x"), "x")]),
            from(vec![term("$t", "$x")]),
        )
        .with_where(Expr::binary(Expr::var("$x"), OperatorType::Gt, Expr::int(1)))
    }

    /// `SELECT * FROM t`
    pub fn select_star() -> Query {
        Query::select(SelectExpression::from_block(Self::select_star_block("$t")))
    }

    /// `SELECT * FROM <table>`
    pub fn select_star_block(table: &str) -> SelectBlock {
        SelectBlock::new(
            SelectClause::regular(vec![Projection::star()]),
            from(vec![term(table, table)]),
        )
    }

    /// `SELECT DISTINCT name FROM users`
    pub fn select_distinct() -> Query {
        let block = SelectBlock::new(
            SelectClause::regular(vec![Projection::named(Expr::var("$name"), "name")]).distinct(),
            from(vec![term("$users", "$users")]),
        );
        Query::select(SelectExpression::from_block(block))
    }

    /// `SELECT x.bar AS y FROM t AS x`
    pub fn select_field_alias() -> Query {
        let block = SelectBlock::new(
            SelectClause::regular(vec![Projection::named(
                Expr::field(Expr::var("$x"), "bar"),
                "y",
            )]),
            from(vec![term("$t", "$x")]),
        );
        Query::select(SelectExpression::from_block(block))
    }

    /// `SELECT e.name FROM emp AS e, dept AS d WHERE e.dept = d.id`
    pub fn select_two_tables() -> Query {
        let block = SelectBlock::new(
            SelectClause::regular(vec![Projection::named(
                Expr::field(Expr::var("$e"), "name"),
                "name",
            )]),
            from(vec![term("$emp", "$e"), term("$dept", "$d")]),
        )
        .with_where(Expr::binary(
            Expr::field(Expr::var("$e"), "dept"),
            OperatorType::Eq,
            Expr::field(Expr::var("$d"), "id"),
        ));
        Query::select(SelectExpression::from_block(block))
    }

    // ===== Aggregation queries =====

    /// `SELECT status FROM orders AS o GROUP BY o.status AS status HAVING status = "open"`
    pub fn group_by_having() -> Query {
        let block = SelectBlock::new(
            SelectClause::regular(vec![Projection::named(Expr::var("$status"), "status")]),
            from(vec![term("$orders", "$o")]),
        )
        .with_group_by(GroupbyClause::new(vec![GroupKey {
            expr: Expr::field(Expr::var("$o"), "status"),
            var: Some(VariableExpr::new("$status")),
        }]))
        .with_having(Expr::binary(
            Expr::var("$status"),
            OperatorType::Eq,
            Expr::string("open"),
        ));
        Query::select(SelectExpression::from_block(block))
    }

    // ===== Set operations =====

    /// `SELECT * FROM a UNION [ALL] SELECT * FROM b`
    pub fn union(distinct: bool) -> Query {
        Self::set_operation(SetOpType::Union, distinct)
    }

    /// `SELECT * FROM a <op> SELECT * FROM b`
    pub fn set_operation(op_type: SetOpType, distinct: bool) -> Query {
        let set_op = SelectSetOperation::single(block_input(Self::select_star_block("$a")))
            .with_right(SetOperationRight {
                op_type,
                set_semantics: distinct,
                input: block_input(Self::select_star_block("$b")),
            });
        Query::select(SelectExpression::new(set_op))
    }

    /// `SELECT * FROM a UNION SELECT * FROM b INTERSECT SELECT * FROM c`
    pub fn two_right_inputs() -> Query {
        let set_op = SelectSetOperation::single(block_input(Self::select_star_block("$a")))
            .with_right(SetOperationRight {
                op_type: SetOpType::Union,
                set_semantics: true,
                input: block_input(Self::select_star_block("$b")),
            })
            .with_right(SetOperationRight {
                op_type: SetOpType::Intersect,
                set_semantics: false,
                input: block_input(Self::select_star_block("$c")),
            });
        Query::select(SelectExpression::new(set_op))
    }

    // ===== Subqueries =====

    /// `SELECT * FROM (SELECT * FROM t) AS s`
    pub fn from_subquery() -> Query {
        let inner = Expr::Select(Box::new(
            SelectExpression::from_block(Self::select_star_block("$t")).as_subquery(),
        ));
        let block = SelectBlock::new(
            SelectClause::regular(vec![Projection::star()]),
            FromClause::new(vec![FromTerm::new(inner, VariableExpr::new("$s"))]),
        );
        Query::select(SelectExpression::from_block(block))
    }

    // ===== Non-SELECT queries =====

    /// A query whose body is the bare expression `1 = 1`
    pub fn expression_query() -> Query {
        Query::new(Expr::binary(Expr::int(1), OperatorType::Eq, Expr::int(1)))
    }
}

/// FROM clause over the given terms
pub fn from(terms: Vec<FromTerm>) -> FromClause {
    FromClause::new(terms)
}

/// `FROM <table> AS <var>` with a bare variable source
pub fn term(table: &str, var: &str) -> FromTerm {
    FromTerm::new(Expr::var(table), VariableExpr::new(var))
}

fn block_input(block: SelectBlock) -> SetOperationInput {
    SetOperationInput::Select(Box::new(block))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcert_sqlpp::SelectBody;

    #[test]
    fn test_select_where_shape() {
        let block = SqlppFixtures::select_where_block();
        assert!(block.where_clause.is_some());
        assert!(block.group_by.is_none());
        match &block.select_clause.body {
            SelectBody::Regular(regular) => assert_eq!(regular.projections.len(), 1),
            SelectBody::Element(_) => panic!("Expected regular select"),
        }
    }

    #[test]
    fn test_two_right_inputs() {
        let query = SqlppFixtures::two_right_inputs();
        match &query.body {
            Expr::Select(select) => assert_eq!(select.select_set_operation.rights.len(), 2),
            other => panic!("Expected select body, found {:?}", other),
        }
    }
}
